use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_text, read_file_field};
use crate::entities::artist::{self, Entity as Artist};
use crate::error::AppError;
use crate::middleware::auth::AdminUser;
use crate::pagination::{PaginatedResponse, Pagination};
use crate::services::search::{artist_fields, normalize_query, search_condition};
use crate::services::storage::upload_path;
use crate::state::AppState;
use crate::tracking::Tracked;

const NAME_MAX: usize = 30;

fn default_true() -> bool {
    true
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateArtistRequest {
    first_name: String,
    last_name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_true")]
    is_active: bool,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateArtistRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    description: Option<String>,
    is_active: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminArtistResponse {
    id: Uuid,
    first_name: String,
    last_name: String,
    slug: String,
    is_active: bool,
    description: String,
    biography: Option<String>,
    created: chrono::NaiveDateTime,
    updated: chrono::NaiveDateTime,
}

impl From<artist::Model> for AdminArtistResponse {
    fn from(artist: artist::Model) -> Self {
        AdminArtistResponse {
            id: artist.id,
            first_name: artist.first_name,
            last_name: artist.last_name,
            slug: artist.slug,
            is_active: artist.is_active,
            description: artist.description,
            biography: artist.biography,
            created: artist.created,
            updated: artist.updated,
        }
    }
}

async fn find_artist(state: &AppState, id: Uuid) -> Result<artist::Model, AppError> {
    Artist::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Artist not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/admin/artists",
    request_body = CreateArtistRequest,
    responses(
        (status = 201, description = "Artist created", body = AdminArtistResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn create_artist(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Json(payload): Json<CreateArtistRequest>,
) -> Result<(StatusCode, Json<AdminArtistResponse>), AppError> {
    check_text("first_name", &payload.first_name, NAME_MAX)?;
    check_text("last_name", &payload.last_name, NAME_MAX)?;

    let now = chrono::Utc::now().naive_utc();
    let artist = artist::Model {
        id: Uuid::new_v4(),
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        slug: String::new(),
        is_active: payload.is_active,
        description: payload.description,
        biography: None,
        created: now,
        updated: now,
    };

    let saved = state.store.save(Tracked::new(artist)).await?.into_inner();
    tracing::info!(admin = %admin.username, slug = %saved.slug, "Artist created");

    Ok((StatusCode::CREATED, Json(AdminArtistResponse::from(saved))))
}

#[utoipa::path(
    get,
    path = "/admin/artists",
    params(Pagination),
    responses(
        (status = 200, description = "Artists, by last name", body = PaginatedResponse<AdminArtistResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn list_artists(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<AdminArtistResponse>>, AppError> {
    let mut query = Artist::find()
        .order_by_asc(artist::Column::LastName)
        .order_by_asc(artist::Column::FirstName);
    if let Some(q) = pagination.search() {
        query = query.filter(search_condition(&normalize_query(q), &artist_fields()));
    }

    let total = query.clone().count(&state.db).await?;
    let artists = query
        .limit(pagination.limit())
        .offset(pagination.offset())
        .all(&state.db)
        .await?;

    Ok(Json(PaginatedResponse::new(
        artists.into_iter().map(AdminArtistResponse::from).collect(),
        total,
        pagination.page(),
        pagination.limit(),
    )))
}

#[utoipa::path(
    get,
    path = "/admin/artists/{id}",
    params(
        ("id" = String, Path, description = "Artist ID")
    ),
    responses(
        (status = 200, description = "Artist", body = AdminArtistResponse),
        (status = 404, description = "Artist not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdminArtistResponse>, AppError> {
    Ok(Json(AdminArtistResponse::from(find_artist(&state, id).await?)))
}

#[utoipa::path(
    put,
    path = "/admin/artists/{id}",
    params(
        ("id" = String, Path, description = "Artist ID")
    ),
    request_body = UpdateArtistRequest,
    responses(
        (status = 200, description = "Artist updated", body = AdminArtistResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Artist not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArtistRequest>,
) -> Result<Json<AdminArtistResponse>, AppError> {
    let mut artist = Tracked::loaded(find_artist(&state, id).await?);

    if let Some(first_name) = payload.first_name {
        check_text("first_name", &first_name, NAME_MAX)?;
        artist.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = payload.last_name {
        check_text("last_name", &last_name, NAME_MAX)?;
        artist.last_name = last_name.trim().to_string();
    }
    if let Some(description) = payload.description {
        artist.description = description;
    }
    if let Some(is_active) = payload.is_active {
        artist.is_active = is_active;
    }

    tracing::debug!(changed = ?artist.changed_field_names(), "Updating artist");
    let saved = state.store.save(artist).await?.into_inner();
    Ok(Json(AdminArtistResponse::from(saved)))
}

#[utoipa::path(
    delete,
    path = "/admin/artists/{id}",
    params(
        ("id" = String, Path, description = "Artist ID")
    ),
    responses(
        (status = 204, description = "Artist deleted"),
        (status = 404, description = "Artist not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn delete_artist(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let artist = find_artist(&state, id).await?;
    let slug = artist.slug.clone();
    state.store.delete(artist).await?;
    tracing::info!(admin = %admin.username, slug = %slug, "Artist deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the artist's biography with an uploaded PDF.
#[utoipa::path(
    post,
    path = "/admin/artists/{id}/biography",
    params(
        ("id" = String, Path, description = "Artist ID")
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Biography stored", body = AdminArtistResponse),
        (status = 400, description = "Missing file or not a PDF"),
        (status = 404, description = "Artist not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn upload_biography(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<AdminArtistResponse>, AppError> {
    let artist = Tracked::loaded(find_artist(&state, id).await?);
    let upload = read_file_field(multipart).await?;

    if upload.content_type != "application/pdf" {
        return Err(AppError::BadRequest("Biography must be a PDF".to_string()));
    }

    let path = upload_path("biographies", &artist.slug, "pdf");
    let saved = state
        .store
        .attach(artist, &path, upload.data, &upload.content_type, |artist, path| {
            artist.biography = Some(path)
        })
        .await?;

    tracing::info!(path = %path, "Biography uploaded");
    Ok(Json(AdminArtistResponse::from(saved.into_inner())))
}
