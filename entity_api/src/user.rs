//! Query/insert contract over the users table.
//!
//! This is the narrow credential-store surface the rest of the system is
//! allowed to use: existence check, insert, lookup by username, and a listing
//! that never reads the password column. There is deliberately no update or
//! delete here.

use super::error::Error;
use chrono::Utc;
use entity::users::{ActiveModel, Column, Entity, Model, Role};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, DatabaseConnection, FromQueryResult, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use utoipa::ToSchema;

/// An identity record as exposed to clients: every persisted field except the
/// password digest, which is excluded at query level rather than filtered
/// after the fact.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, ToSchema)]
#[schema(as = entity_api::user::UserView)]
pub struct UserView {
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

/// Inserts a new identity record. The caller supplies an already-hashed
/// credential in `password`. A unique-key conflict on `username` surfaces as
/// `EntityApiErrorKind::RecordAlreadyExists` via the `DbErr` translation.
pub async fn create(db: &DatabaseConnection, user_model: Model) -> Result<Model, Error> {
    debug!(
        "New User Model to be inserted for username: {}",
        user_model.username
    );

    let now = Utc::now();
    let user_active_model = ActiveModel {
        id: Set(Id::new_v4()),
        username: Set(user_model.username),
        password: Set(user_model.password),
        full_name: Set(user_model.full_name),
        role: Set(Role::User),
        created_at: Set(now.into()),
    };

    Ok(user_active_model.insert(db).await?)
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<Model>, Error> {
    let user = Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(user)
}

pub async fn exists(db: &DatabaseConnection, username: &str) -> Result<bool, Error> {
    let count = Entity::find()
        .filter(Column::Username.eq(username))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Lists all identity records without their password digests, oldest first.
pub async fn find_all_excluding_password(
    db: &DatabaseConnection,
) -> Result<Vec<UserView>, Error> {
    let views = Entity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::Username)
        .column(Column::FullName)
        .column(Column::Role)
        .column(Column::CreatedAt)
        .order_by_asc(Column::CreatedAt)
        .into_model::<UserView>()
        .all(db)
        .await?;

    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityApiErrorKind;
    use crate::test_support::connect_migrated;

    fn test_model(username: &str) -> Model {
        Model {
            id: Id::default(),
            username: username.to_string(),
            password: "$argon2id$not-a-real-digest".to_string(),
            full_name: "Test User".to_string(),
            role: Role::User,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn create_then_find_by_username_round_trips() {
        let db = connect_migrated().await;

        let created = create(&db, test_model("a@b.com")).await.unwrap();
        assert_eq!(created.role, Role::User);

        let found = find_by_username(&db, "a@b.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.full_name, "Test User");

        assert!(exists(&db, "a@b.com").await.unwrap());
        assert!(!exists(&db, "someone-else@b.com").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_already_exists_not_a_system_error() {
        let db = connect_migrated().await;

        create(&db, test_model("dup@b.com")).await.unwrap();
        let err = create(&db, test_model("dup@b.com")).await.unwrap_err();
        assert_eq!(err.error_kind, EntityApiErrorKind::RecordAlreadyExists);

        // Exactly one record survives the conflict
        let all = find_all_excluding_password(&db).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn user_view_schema_exposes_every_field() {
        let schema = <UserView as utoipa::PartialSchema>::schema();
        let value = serde_json::to_value(&schema).unwrap();

        let properties = value["properties"].as_object().unwrap();
        for field in ["id", "username", "full_name", "role", "created_at"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
        assert!(!properties.contains_key("password"));
    }

    #[tokio::test]
    async fn listing_never_contains_the_password_digest() {
        let db = connect_migrated().await;

        create(&db, test_model("a@b.com")).await.unwrap();
        let views = find_all_excluding_password(&db).await.unwrap();

        let json = serde_json::to_value(&views).unwrap();
        let first = &json.as_array().unwrap()[0];
        assert!(first.get("password").is_none());
        assert_eq!(first["username"], "a@b.com");
        assert_eq!(first["role"], "user");
    }
}
