use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "artworks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    /// Title plus ratchet suffix, e.g. "Monsoon-002". Source of `slug`.
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub is_active: bool,
    #[sea_orm(unique)]
    pub inventory_name: String,
    #[sea_orm(unique)]
    pub internal_name: String,
    pub artist_id: Uuid,
    pub year: String,
    pub is_representative: bool,
    pub genre_id: Uuid,
    pub style_class: StyleClass,
    pub medium_description: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub image_height: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub image_width: Option<f64>,
    pub measurement_units: Unit,
    #[sea_orm(column_type = "Double", nullable)]
    pub height_metric: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub width_metric: Option<f64>,
    pub metric_units: Unit,
    #[sea_orm(column_type = "Double", nullable)]
    pub height_imperial: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub width_imperial: Option<f64>,
    pub imperial_units: Unit,
    pub price: i32,
    pub is_price_displayed: bool,
    pub alternative_pricing_message: String,
    pub status: Status,
    pub created: DateTime,
    pub updated: DateTime,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(4))")]
pub enum StyleClass {
    #[sea_orm(string_value = "TRAD")]
    #[serde(rename = "TRAD")]
    Traditional,
    #[sea_orm(string_value = "ABST")]
    #[serde(rename = "ABST")]
    Abstract,
    #[sea_orm(string_value = "FIGU")]
    #[serde(rename = "FIGU")]
    Figurative,
    #[sea_orm(string_value = "SEMA")]
    #[serde(rename = "SEMA")]
    SemiAbstract,
    #[sea_orm(string_value = "SEMF")]
    #[serde(rename = "SEMF")]
    SemiFigurative,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum Unit {
    #[sea_orm(string_value = "C")]
    #[serde(rename = "C")]
    Centimetres,
    #[sea_orm(string_value = "I")]
    #[serde(rename = "I")]
    Inches,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(4))")]
pub enum Status {
    #[sea_orm(string_value = "AVAL")]
    #[serde(rename = "AVAL")]
    Available,
    #[sea_orm(string_value = "SOLD")]
    #[serde(rename = "SOLD")]
    Sold,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artist::Entity",
        from = "Column::ArtistId",
        to = "super::artist::Column::Id",
        on_delete = "Cascade"
    )]
    Artist,
    #[sea_orm(
        belongs_to = "super::genre::Entity",
        from = "Column::GenreId",
        to = "super::genre::Column::Id",
        on_delete = "Cascade"
    )]
    Genre,
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
