use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    pub is_active: bool,
    #[sea_orm(unique)]
    pub slug: String,
    /// Free-text event type ("Exhibition", "Talk", ...).
    pub kind: String,
    /// Storage path of the display image.
    pub image: Option<String>,
    pub total_seats: Option<i32>,
    pub is_admission: bool,
    pub admission_price: Option<i32>,
    pub start_date: Date,
    pub end_date: Date,
    pub time: String,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    pub created: DateTime,
    pub updated: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_artist::Relation::Artist.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::event_artist::Relation::Event.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
