use crate::extractors::RejectionType;
use crate::AppState;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
};
use log::*;

/// The subject (username) of a validated bearer token.
///
/// This extractor is the authentication gate for protected routes: it pulls
/// the token out of the `Authorization: Bearer` header and validates it
/// against the process signing key. It holds no state and is evaluated fresh
/// on every request. Every failure mode collapses to the same 401 response so
/// callers cannot distinguish a missing header from an expired or tampered
/// token.
pub(crate) struct AuthenticatedUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let unauthorized = || (StatusCode::UNAUTHORIZED, "Unauthorized".to_string());

        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = bearer.strip_prefix("Bearer ").ok_or_else(unauthorized)?;

        let app_state = AppState::from_ref(state);
        match domain::token::validate(&app_state.config, token) {
            Ok(subject) => Ok(AuthenticatedUser(subject)),
            Err(err) => {
                debug!("Rejected bearer token: {err:?}");
                Err(unauthorized())
            }
        }
    }
}
