use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::params::user::RegisterParams;
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::user as UserApi;
use domain::UserView;
use log::*;
use serde_json::json;

/// POST register a new identity
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterParams,
    responses(
        (status = 201, description = "Successfully registered a new identity"),
        (status = 400, description = "Username already registered"),
        (status = 422, description = "Username is not email-shaped")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(params): Json<RegisterParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Register a new identity: {params:?}");

    let user = UserApi::register(
        app_state.db_conn_ref(),
        params.username,
        params.password,
        params.full_name,
    )
    .await?;

    info!("Registered new identity: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Identity registered"})),
    ))
}

/// GET all registered identities. Requires a valid bearer token; password
/// digests are excluded at query level.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All registered identities, without password digests", body = [UserView]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn index(
    AuthenticatedUser(subject): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all users requested by: {subject}");

    let users = UserApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(users))
}
