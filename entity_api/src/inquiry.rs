//! Store-and-list operations for the inquiries table.

use super::error::Error;
use chrono::Utc;
use entity::inquiries::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};

pub async fn create(db: &DatabaseConnection, inquiry_model: Model) -> Result<Model, Error> {
    debug!("New Inquiry to be inserted from: {}", inquiry_model.email);

    let now = Utc::now();
    let inquiry_active_model = ActiveModel {
        id: Set(Id::new_v4()),
        name: Set(inquiry_model.name),
        company: Set(inquiry_model.company),
        email: Set(inquiry_model.email),
        budget: Set(inquiry_model.budget),
        service: Set(inquiry_model.service),
        date: Set(inquiry_model.date),
        time: Set(inquiry_model.time),
        message: Set(inquiry_model.message),
        created_at: Set(now.into()),
    };

    Ok(inquiry_active_model.insert(db).await?)
}

/// Newest inquiries first, matching the admin dashboard's expectation.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    let inquiries = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;

    Ok(inquiries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::connect_migrated;

    fn test_model(name: &str) -> Model {
        Model {
            id: Id::default(),
            name: name.to_string(),
            company: Some("ACME".to_string()),
            email: "contact@acme.com".to_string(),
            budget: None,
            service: "delivery".to_string(),
            date: "2025-09-01".to_string(),
            time: "10:00".to_string(),
            message: "Need a quote".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn create_then_list_newest_first() {
        let db = connect_migrated().await;

        let first = create(&db, test_model("First")).await.unwrap();
        // Force a strictly later timestamp for deterministic ordering
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = create(&db, test_model("Second")).await.unwrap();

        let all = find_all(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }
}
