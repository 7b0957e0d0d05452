use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Translates domain error kinds to client-facing status codes. Response
// bodies are fixed, non-leaking strings; diagnostic detail stays in the logs.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                    EntityErrorKind::NotFound => {
                        (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
                    }
                    EntityErrorKind::Invalid => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE ENTITY").into_response()
                    }
                    EntityErrorKind::AlreadyExists => {
                        (StatusCode::BAD_REQUEST, "ALREADY EXISTS").into_response()
                    }
                    EntityErrorKind::Unauthenticated => {
                        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
                    }
                    EntityErrorKind::Other(_) => {
                        warn!("Entity error surfaced as 500: {:?}", self.0);
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                    }
                },
                // The gate never tells the caller why a token was rejected
                InternalErrorKind::Token(_) => {
                    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
                }
                InternalErrorKind::Config | InternalErrorKind::Other(_) => {
                    warn!("Internal error surfaced as 500: {:?}", self.0);
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Network => {
                    (StatusCode::BAD_GATEWAY, "BAD GATEWAY").into_response()
                }
                ExternalErrorKind::Other(_) => {
                    warn!("External error surfaced as 500: {:?}", self.0);
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                }
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Error(err.into())
    }
}
