//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries: `domain` depends on `entity_api`, and `web` depends on `domain`,
/// but `web` should never depend directly on `entity_api` error details. Ultimately the
/// various `error_kind`s are used by `web` to return appropriate HTTP status codes and
/// messages to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Token(TokenErrorKind),
    Config,
    Other(String),
}

/// Enum representing the various kinds of entity errors that can bubble up from the
/// entity layer (`entity_api` and `entity`). These errors are translated from the
/// `entity_api` layer and reduced to a subset of kinds that matter to the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Invalid,
    AlreadyExists,
    Unauthenticated,
    Other(String),
}

/// Enum representing why an access token failed validation. The web layer
/// collapses all of these to a single Unauthorized response; the distinction
/// exists for logging and tests.
#[derive(Debug, PartialEq)]
pub enum TokenErrorKind {
    Expired,
    InvalidSignature,
    Malformed,
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            EntityApiErrorKind::RecordAlreadyExists => EntityErrorKind::AlreadyExists,
            EntityApiErrorKind::RecordUnauthenticated => EntityErrorKind::Unauthenticated,
            EntityApiErrorKind::InvalidQueryTerm => EntityErrorKind::Invalid,
            _ => EntityErrorKind::Other("EntityErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

        let token_error_kind = match err.kind() {
            JwtErrorKind::ExpiredSignature => TokenErrorKind::Expired,
            JwtErrorKind::InvalidSignature => TokenErrorKind::InvalidSignature,
            _ => TokenErrorKind::Malformed,
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Token(token_error_kind)),
        }
    }
}
