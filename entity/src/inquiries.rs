//! SeaORM Entity for the inquiries table.
//! Stores service inquiries submitted through the public contact form.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::inquiries::Model)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Id,

    pub name: String,

    pub company: Option<String>,

    pub email: String,

    pub budget: Option<String>,

    /// Which service offering the inquiry is about
    pub service: String,

    /// Requested consultation date, client-formatted
    pub date: String,

    /// Requested consultation time, client-formatted
    pub time: String,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
