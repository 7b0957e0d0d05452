use crate::{AppState, Error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::inquiries::Model;
use domain::inquiry as InquiryApi;
use events::DomainEvent;
use log::*;

/// POST submit a new inquiry.
///
/// The live admin notification is published only after the insert has
/// committed, and it is a side channel: whatever happens during fan-out, the
/// submitted inquiry is already stored and the client gets its 200.
#[utoipa::path(
    post,
    path = "/inquiry",
    request_body = Model,
    responses(
        (status = 200, description = "Successfully stored the inquiry", body = Model),
        (status = 422, description = "Contact email is malformed")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(inquiry_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Inquiry from: {}", inquiry_model.email);

    let inquiry = InquiryApi::create(app_state.db_conn_ref(), inquiry_model).await?;

    match serde_json::to_value(&inquiry) {
        Ok(view) => {
            app_state
                .event_publisher
                .publish(DomainEvent::InquiryCreated { inquiry: view })
                .await;
        }
        Err(e) => {
            error!("Failed to serialize inquiry {} for notification: {e}", inquiry.id);
        }
    }

    Ok(Json(inquiry))
}

/// GET all submitted inquiries, newest first.
#[utoipa::path(
    get,
    path = "/inquiry",
    responses(
        (status = 200, description = "All submitted inquiries, newest first", body = [Model])
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET all Inquiries");

    let inquiries = InquiryApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(inquiries))
}
