use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{
    EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_text, nullable};
use crate::entities::artwork::{self, Entity as Artwork, Status, StyleClass, Unit};
use crate::entities::{artist, genre};
use crate::error::AppError;
use crate::pagination::{PaginatedResponse, Pagination};
use crate::services::search::{artwork_fields, normalize_query, search_condition};
use crate::state::AppState;
use crate::tracking::Tracked;

const DEFAULT_PRICING_MESSAGE: &str = "Please inquire";

fn default_true() -> bool {
    true
}

fn default_units() -> Unit {
    Unit::Inches
}

fn default_status() -> Status {
    Status::Available
}

fn default_pricing_message() -> String {
    DEFAULT_PRICING_MESSAGE.to_string()
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateArtworkRequest {
    title: String,
    inventory_name: String,
    internal_name: String,
    artist_id: Uuid,
    genre_id: Uuid,
    year: String,
    style_class: StyleClass,
    medium_description: String,
    #[serde(default)]
    description: String,
    image_height: Option<f64>,
    image_width: Option<f64>,
    #[serde(default = "default_units")]
    measurement_units: Unit,
    #[serde(default)]
    price: i32,
    #[serde(default)]
    is_price_displayed: bool,
    #[serde(default = "default_pricing_message")]
    alternative_pricing_message: String,
    #[serde(default = "default_status")]
    status: Status,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    is_representative: bool,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateArtworkRequest {
    title: Option<String>,
    inventory_name: Option<String>,
    internal_name: Option<String>,
    artist_id: Option<Uuid>,
    genre_id: Option<Uuid>,
    year: Option<String>,
    style_class: Option<StyleClass>,
    medium_description: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    image_height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    image_width: Option<Option<f64>>,
    measurement_units: Option<Unit>,
    price: Option<i32>,
    is_price_displayed: Option<bool>,
    alternative_pricing_message: Option<String>,
    status: Option<Status>,
    is_active: Option<bool>,
    is_representative: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminArtworkResponse {
    id: Uuid,
    title: String,
    name: String,
    slug: String,
    is_active: bool,
    inventory_name: String,
    internal_name: String,
    artist_id: Uuid,
    genre_id: Uuid,
    year: String,
    is_representative: bool,
    style_class: StyleClass,
    medium_description: String,
    description: String,
    image_height: Option<f64>,
    image_width: Option<f64>,
    measurement_units: Unit,
    height_metric: Option<f64>,
    width_metric: Option<f64>,
    height_imperial: Option<f64>,
    width_imperial: Option<f64>,
    price: i32,
    is_price_displayed: bool,
    alternative_pricing_message: String,
    status: Status,
    created: chrono::NaiveDateTime,
    updated: chrono::NaiveDateTime,
}

impl From<artwork::Model> for AdminArtworkResponse {
    fn from(artwork: artwork::Model) -> Self {
        AdminArtworkResponse {
            id: artwork.id,
            title: artwork.title,
            name: artwork.name,
            slug: artwork.slug,
            is_active: artwork.is_active,
            inventory_name: artwork.inventory_name,
            internal_name: artwork.internal_name,
            artist_id: artwork.artist_id,
            genre_id: artwork.genre_id,
            year: artwork.year,
            is_representative: artwork.is_representative,
            style_class: artwork.style_class,
            medium_description: artwork.medium_description,
            description: artwork.description,
            image_height: artwork.image_height,
            image_width: artwork.image_width,
            measurement_units: artwork.measurement_units,
            height_metric: artwork.height_metric,
            width_metric: artwork.width_metric,
            height_imperial: artwork.height_imperial,
            width_imperial: artwork.width_imperial,
            price: artwork.price,
            is_price_displayed: artwork.is_price_displayed,
            alternative_pricing_message: artwork.alternative_pricing_message,
            status: artwork.status,
            created: artwork.created,
            updated: artwork.updated,
        }
    }
}

fn check_artwork(artwork: &artwork::Model) -> Result<(), AppError> {
    check_text("title", &artwork.title, 100)?;
    check_text("inventory_name", &artwork.inventory_name, 100)?;
    check_text("internal_name", &artwork.internal_name, 100)?;
    check_text("year", &artwork.year, 4)?;
    check_text("medium_description", &artwork.medium_description, 100)?;
    if artwork.alternative_pricing_message.chars().count() > 100 {
        return Err(AppError::BadRequest(
            "alternative_pricing_message must be at most 100 characters".to_string(),
        ));
    }
    if artwork.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }
    for dimension in [artwork.image_height, artwork.image_width].into_iter().flatten() {
        if !dimension.is_finite() || dimension < 0.0 {
            return Err(AppError::BadRequest("dimensions must be non-negative numbers".to_string()));
        }
    }
    Ok(())
}

async fn check_references(state: &AppState, artist_id: Uuid, genre_id: Uuid) -> Result<(), AppError> {
    if artist::Entity::find_by_id(artist_id).one(&state.db).await?.is_none() {
        return Err(AppError::BadRequest("Unknown artist".to_string()));
    }
    if genre::Entity::find_by_id(genre_id).one(&state.db).await?.is_none() {
        return Err(AppError::BadRequest("Unknown genre".to_string()));
    }
    Ok(())
}

async fn find_artwork(state: &AppState, id: Uuid) -> Result<artwork::Model, AppError> {
    Artwork::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Artwork not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/admin/artworks",
    request_body = CreateArtworkRequest,
    responses(
        (status = 201, description = "Artwork created", body = AdminArtworkResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Inventory or internal name already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn create_artwork(
    State(state): State<AppState>,
    Json(payload): Json<CreateArtworkRequest>,
) -> Result<(StatusCode, Json<AdminArtworkResponse>), AppError> {
    let now = chrono::Utc::now().naive_utc();
    let artwork = artwork::Model {
        id: Uuid::new_v4(),
        title: payload.title.trim().to_string(),
        name: String::new(),
        slug: String::new(),
        is_active: payload.is_active,
        inventory_name: payload.inventory_name,
        internal_name: payload.internal_name,
        artist_id: payload.artist_id,
        year: payload.year,
        is_representative: payload.is_representative,
        genre_id: payload.genre_id,
        style_class: payload.style_class,
        medium_description: payload.medium_description,
        description: payload.description,
        image_height: payload.image_height,
        image_width: payload.image_width,
        measurement_units: payload.measurement_units,
        height_metric: None,
        width_metric: None,
        metric_units: Unit::Centimetres,
        height_imperial: None,
        width_imperial: None,
        imperial_units: Unit::Inches,
        price: payload.price,
        is_price_displayed: payload.is_price_displayed,
        alternative_pricing_message: payload.alternative_pricing_message,
        status: payload.status,
        created: now,
        updated: now,
    };
    check_artwork(&artwork)?;
    check_references(&state, artwork.artist_id, artwork.genre_id).await?;

    let saved = state.store.save(Tracked::new(artwork)).await?.into_inner();
    tracing::info!(slug = %saved.slug, "Artwork created");
    Ok((StatusCode::CREATED, Json(AdminArtworkResponse::from(saved))))
}

#[utoipa::path(
    get,
    path = "/admin/artworks",
    params(Pagination),
    responses(
        (status = 200, description = "Artworks by title", body = PaginatedResponse<AdminArtworkResponse>)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn list_artworks(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<AdminArtworkResponse>>, AppError> {
    let mut query = Artwork::find().order_by_asc(artwork::Column::Title);
    if let Some(q) = pagination.search() {
        query = query
            .join(JoinType::InnerJoin, artwork::Relation::Genre.def())
            .filter(search_condition(&normalize_query(q), &artwork_fields()));
    }

    let total = query.clone().count(&state.db).await?;
    let artworks = query
        .limit(pagination.limit())
        .offset(pagination.offset())
        .all(&state.db)
        .await?;

    Ok(Json(PaginatedResponse::new(
        artworks.into_iter().map(AdminArtworkResponse::from).collect(),
        total,
        pagination.page(),
        pagination.limit(),
    )))
}

#[utoipa::path(
    get,
    path = "/admin/artworks/{id}",
    params(
        ("id" = String, Path, description = "Artwork ID")
    ),
    responses(
        (status = 200, description = "Artwork", body = AdminArtworkResponse),
        (status = 404, description = "Artwork not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn get_artwork(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdminArtworkResponse>, AppError> {
    Ok(Json(AdminArtworkResponse::from(find_artwork(&state, id).await?)))
}

#[utoipa::path(
    put,
    path = "/admin/artworks/{id}",
    params(
        ("id" = String, Path, description = "Artwork ID")
    ),
    request_body = UpdateArtworkRequest,
    responses(
        (status = 200, description = "Artwork updated", body = AdminArtworkResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Artwork not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn update_artwork(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArtworkRequest>,
) -> Result<Json<AdminArtworkResponse>, AppError> {
    let mut artwork = Tracked::loaded(find_artwork(&state, id).await?);

    if let Some(title) = payload.title {
        artwork.title = title.trim().to_string();
    }
    if let Some(inventory_name) = payload.inventory_name {
        artwork.inventory_name = inventory_name;
    }
    if let Some(internal_name) = payload.internal_name {
        artwork.internal_name = internal_name;
    }
    if let Some(artist_id) = payload.artist_id {
        artwork.artist_id = artist_id;
    }
    if let Some(genre_id) = payload.genre_id {
        artwork.genre_id = genre_id;
    }
    if let Some(year) = payload.year {
        artwork.year = year;
    }
    if let Some(style_class) = payload.style_class {
        artwork.style_class = style_class;
    }
    if let Some(medium_description) = payload.medium_description {
        artwork.medium_description = medium_description;
    }
    if let Some(description) = payload.description {
        artwork.description = description;
    }
    if let Some(image_height) = payload.image_height {
        artwork.image_height = image_height;
    }
    if let Some(image_width) = payload.image_width {
        artwork.image_width = image_width;
    }
    if let Some(units) = payload.measurement_units {
        artwork.measurement_units = units;
    }
    if let Some(price) = payload.price {
        artwork.price = price;
    }
    if let Some(is_price_displayed) = payload.is_price_displayed {
        artwork.is_price_displayed = is_price_displayed;
    }
    if let Some(message) = payload.alternative_pricing_message {
        artwork.alternative_pricing_message = message;
    }
    if let Some(status) = payload.status {
        artwork.status = status;
    }
    if let Some(is_active) = payload.is_active {
        artwork.is_active = is_active;
    }
    if let Some(is_representative) = payload.is_representative {
        artwork.is_representative = is_representative;
    }

    check_artwork(&artwork)?;
    if artwork.has_changed(artwork::Column::ArtistId) || artwork.has_changed(artwork::Column::GenreId) {
        check_references(&state, artwork.artist_id, artwork.genre_id).await?;
    }

    let saved = state.store.save(artwork).await?.into_inner();
    Ok(Json(AdminArtworkResponse::from(saved)))
}

#[utoipa::path(
    delete,
    path = "/admin/artworks/{id}",
    params(
        ("id" = String, Path, description = "Artwork ID")
    ),
    responses(
        (status = 204, description = "Artwork deleted"),
        (status = 404, description = "Artwork not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn delete_artwork(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let artwork = find_artwork(&state, id).await?;
    state.store.delete(artwork).await?;
    Ok(StatusCode::NO_CONTENT)
}
