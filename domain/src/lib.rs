//! Business logic for the delivery network backend: identity registration and
//! login, password hashing, access-token issue/validate, and inquiry intake.
//!
//! The `web` layer depends on this crate and never reaches below it; errors
//! from the entity layer are translated into the domain error tree here.

pub use entity_api::user::UserView;
pub use entity_api::{inquiries, users, Id};

pub mod error;
pub mod inquiry;
pub mod password;
pub mod token;
pub mod user;
