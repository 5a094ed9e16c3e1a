use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::services::ratchet::RatchetEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "event_ratchets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub suffix: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl RatchetEntity for Entity {
    fn key_column() -> Column {
        Column::Title
    }

    fn suffix_column() -> Column {
        Column::Suffix
    }
}
