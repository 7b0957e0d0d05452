//! Inquiry intake and listing.

use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use email_address::EmailAddress;
use entity::inquiries::Model;
use entity_api::inquiry as inquiry_api;
use sea_orm::DatabaseConnection;
use std::str::FromStr;

/// Persists a submitted inquiry after validating the contact email.
pub async fn create(db: &DatabaseConnection, inquiry_model: Model) -> Result<Model, Error> {
    if EmailAddress::from_str(&inquiry_model.email).is_err() {
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Invalid,
            )),
        });
    }

    Ok(inquiry_api::create(db, inquiry_model).await?)
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(inquiry_api::find_all(db).await?)
}
