use crate::{AppState, Error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use domain::token;
use domain::user::Credentials;
use log::*;

/// Logs a user in and returns a signed bearer access token.
///
/// The body is OAuth2 password-grant shaped form data. Present the returned
/// token on every protected request, e.g.:
/// curl --header "Authorization: Bearer <access_token>" http://localhost:4000/users
#[utoipa::path(
    post,
    path = "/token",
    request_body(content = domain::user::Credentials, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logs in and returns a bearer access token", body = domain::token::AccessToken),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Form(creds): Form<Credentials>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Login attempt: {creds:?}");

    // One generic 401 for unknown-user and wrong-password alike; the
    // distinction never reaches the client.
    let user = domain::user::authenticate(app_state.db_conn_ref(), &creds).await?;

    let access_token = token::issue(&app_state.config, &user.username)?;

    info!("Issued access token for: {}", user.username);

    Ok(Json(access_token))
}
