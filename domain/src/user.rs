//! Identity registration and login flows.

use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::password;
use chrono::Utc;
use email_address::EmailAddress;
use entity::users::{Model, Role};
use entity::Id;
use entity_api::user as user_api;
use log::*;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub use entity_api::user::UserView;

/// Login form fields, OAuth2 password-grant shaped.
#[derive(Clone, Deserialize, ToSchema)]
#[schema(as = domain::user::Credentials)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Manual Debug so a raw secret never lands in a log line.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn unauthenticated() -> Error {
    Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
            EntityErrorKind::Unauthenticated,
        )),
    }
}

/// Registers a new identity: validates the email-shaped username, hashes the
/// password and inserts the record.
///
/// The `exists` pre-check gives the common case a clean error without paying
/// for a hash, but it is advisory only. Two concurrent registrations can both
/// pass it; the unique index on `username` is what actually enforces
/// uniqueness, and the resulting conflict comes back as `AlreadyExists` like
/// any other duplicate.
pub async fn register(
    db: &DatabaseConnection,
    username: String,
    password_to_hash: String,
    full_name: String,
) -> Result<Model, Error> {
    if EmailAddress::from_str(&username).is_err() {
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Invalid,
            )),
        });
    }

    if user_api::exists(db, &username).await? {
        info!("Registration rejected, username already taken: {username}");
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::AlreadyExists,
            )),
        });
    }

    let user_model = Model {
        id: Id::default(),
        password: password::generate_hash(&password_to_hash),
        username,
        full_name,
        role: Role::User,
        created_at: Utc::now().into(),
    };

    Ok(user_api::create(db, user_model).await?)
}

/// Resolves login credentials to an identity record.
///
/// Unknown username and wrong password produce the same error so the login
/// endpoint cannot be used to enumerate registered usernames.
pub async fn authenticate(db: &DatabaseConnection, creds: &Credentials) -> Result<Model, Error> {
    let user = user_api::find_by_username(db, &creds.username).await?;

    match user {
        Some(user) if password::verify(&creds.password, &user.password) => Ok(user),
        _ => {
            info!("Authentication failed for username: {}", creds.username);
            Err(unauthenticated())
        }
    }
}

/// All identity records with the password digest excluded at query level.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<UserView>, Error> {
    Ok(user_api::find_all_excluding_password(db).await?)
}
