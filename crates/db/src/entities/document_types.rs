//! `SeaORM` Entity for document_types table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "document_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub fee: Decimal,
    pub processing_days: i16,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_requests::Entity")]
    DocumentRequests,
}

impl Related<super::document_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
