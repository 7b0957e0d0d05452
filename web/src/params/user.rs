use serde::Deserialize;
use std::fmt;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterParams {
    /// Email-shaped login name
    pub username: String,
    pub password: String,
    pub full_name: String,
}

// Manual Debug so the raw password never lands in a log line.
impl fmt::Debug for RegisterParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RegisterParams")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}
