use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::sea_query::IntoColumnRef;
use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_text;
use crate::entities::genre::{self, Entity as Genre};
use crate::error::AppError;
use crate::pagination::{PaginatedResponse, Pagination};
use crate::services::search::{normalize_query, search_condition};
use crate::state::AppState;
use crate::tracking::Tracked;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateGenreRequest {
    name: String,
    location: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_true")]
    is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateGenreRequest {
    name: Option<String>,
    location: Option<String>,
    description: Option<String>,
    is_active: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminGenreResponse {
    id: Uuid,
    name: String,
    slug: String,
    is_active: bool,
    location: String,
    description: String,
}

impl From<genre::Model> for AdminGenreResponse {
    fn from(genre: genre::Model) -> Self {
        AdminGenreResponse {
            id: genre.id,
            name: genre.name,
            slug: genre.slug,
            is_active: genre.is_active,
            location: genre.location,
            description: genre.description,
        }
    }
}

async fn find_genre(state: &AppState, id: Uuid) -> Result<genre::Model, AppError> {
    Genre::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Genre not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/admin/genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created", body = AdminGenreResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Genre name already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<CreateGenreRequest>,
) -> Result<(StatusCode, Json<AdminGenreResponse>), AppError> {
    check_text("name", &payload.name, 60)?;
    check_text("location", &payload.location, 100)?;

    let genre = genre::Model {
        id: Uuid::new_v4(),
        name: payload.name.trim().to_string(),
        slug: String::new(),
        is_active: payload.is_active,
        location: payload.location,
        description: payload.description,
    };

    let saved = state.store.save(Tracked::new(genre)).await?.into_inner();
    tracing::info!(slug = %saved.slug, "Genre created");
    Ok((StatusCode::CREATED, Json(AdminGenreResponse::from(saved))))
}

#[utoipa::path(
    get,
    path = "/admin/genres",
    params(Pagination),
    responses(
        (status = 200, description = "Genres by name", body = PaginatedResponse<AdminGenreResponse>)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<AdminGenreResponse>>, AppError> {
    let mut query = Genre::find().order_by_asc(genre::Column::Name);
    if let Some(q) = pagination.search() {
        let fields = [(genre::Entity, genre::Column::Name).into_column_ref()];
        query = query.filter(search_condition(&normalize_query(q), &fields));
    }

    let total = query.clone().count(&state.db).await?;
    let genres = query
        .limit(pagination.limit())
        .offset(pagination.offset())
        .all(&state.db)
        .await?;

    Ok(Json(PaginatedResponse::new(
        genres.into_iter().map(AdminGenreResponse::from).collect(),
        total,
        pagination.page(),
        pagination.limit(),
    )))
}

#[utoipa::path(
    get,
    path = "/admin/genres/{id}",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre", body = AdminGenreResponse),
        (status = 404, description = "Genre not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdminGenreResponse>, AppError> {
    Ok(Json(AdminGenreResponse::from(find_genre(&state, id).await?)))
}

#[utoipa::path(
    put,
    path = "/admin/genres/{id}",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    request_body = UpdateGenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = AdminGenreResponse),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre name already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGenreRequest>,
) -> Result<Json<AdminGenreResponse>, AppError> {
    let mut genre = Tracked::loaded(find_genre(&state, id).await?);

    if let Some(name) = payload.name {
        check_text("name", &name, 60)?;
        genre.name = name.trim().to_string();
    }
    if let Some(location) = payload.location {
        check_text("location", &location, 100)?;
        genre.location = location;
    }
    if let Some(description) = payload.description {
        genre.description = description;
    }
    if let Some(is_active) = payload.is_active {
        genre.is_active = is_active;
    }

    let saved = state.store.save(genre).await?.into_inner();
    Ok(Json(AdminGenreResponse::from(saved)))
}

#[utoipa::path(
    delete,
    path = "/admin/genres/{id}",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre and its artworks deleted"),
        (status = 404, description = "Genre not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let genre = find_genre(&state, id).await?;
    state.store.delete(genre).await?;
    Ok(StatusCode::NO_CONTENT)
}
