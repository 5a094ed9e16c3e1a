use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use sea_orm::sea_query::IntoColumnRef;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_text, nullable, read_file_field, Upload};
use crate::entities::event::{self, Entity as Event};
use crate::entities::{artist, event_artist};
use crate::error::AppError;
use crate::pagination::{PaginatedResponse, Pagination};
use crate::services::search::{normalize_query, search_condition};
use crate::services::storage::upload_path;
use crate::state::AppState;
use crate::tracking::Tracked;
use crate::utils::get_extension;
use crate::utils::image_processor::fit_within;

const DEFAULT_TIME: &str = "6:00 pm - 9:00 pm";

fn default_true() -> bool {
    true
}

fn default_time() -> String {
    DEFAULT_TIME.to_string()
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEventRequest {
    title: String,
    kind: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default = "default_time")]
    time: String,
    location: String,
    #[serde(default)]
    details: String,
    total_seats: Option<i32>,
    #[serde(default)]
    is_admission: bool,
    admission_price: Option<i32>,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    artist_ids: Vec<Uuid>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateEventRequest {
    title: Option<String>,
    kind: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    time: Option<String>,
    location: Option<String>,
    details: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    total_seats: Option<Option<i32>>,
    is_admission: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    admission_price: Option<Option<i32>>,
    is_active: Option<bool>,
    /// Replaces the featured artists when present.
    artist_ids: Option<Vec<Uuid>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminEventResponse {
    id: Uuid,
    title: String,
    slug: String,
    is_active: bool,
    kind: String,
    image: Option<String>,
    total_seats: Option<i32>,
    is_admission: bool,
    admission_price: Option<i32>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    time: String,
    location: String,
    details: String,
    artist_ids: Vec<Uuid>,
    created: chrono::NaiveDateTime,
    updated: chrono::NaiveDateTime,
}

impl AdminEventResponse {
    fn new(event: event::Model, artist_ids: Vec<Uuid>) -> Self {
        AdminEventResponse {
            id: event.id,
            title: event.title,
            slug: event.slug,
            is_active: event.is_active,
            kind: event.kind,
            image: event.image,
            total_seats: event.total_seats,
            is_admission: event.is_admission,
            admission_price: event.admission_price,
            start_date: event.start_date,
            end_date: event.end_date,
            time: event.time,
            location: event.location,
            details: event.details,
            artist_ids,
            created: event.created,
            updated: event.updated,
        }
    }
}

fn check_event(event: &event::Model) -> Result<(), AppError> {
    check_text("title", &event.title, 128)?;
    check_text("kind", &event.kind, 30)?;
    check_text("time", &event.time, 30)?;
    check_text("location", &event.location, 128)?;
    if event.end_date < event.start_date {
        return Err(AppError::BadRequest("end_date must not be before start_date".to_string()));
    }
    if event.total_seats.is_some_and(|seats| seats < 0) {
        return Err(AppError::BadRequest("total_seats must not be negative".to_string()));
    }
    if event.admission_price.is_some_and(|price| price < 0) {
        return Err(AppError::BadRequest("admission_price must not be negative".to_string()));
    }
    Ok(())
}

async fn find_event(state: &AppState, id: Uuid) -> Result<event::Model, AppError> {
    Event::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Event not found".to_string()))
}

async fn featured_artist_ids<C: ConnectionTrait>(db: &C, event: &event::Model) -> Result<Vec<Uuid>, AppError> {
    let artists = event
        .find_related(artist::Entity)
        .order_by_asc(artist::Column::LastName)
        .order_by_asc(artist::Column::FirstName)
        .all(db)
        .await?;
    Ok(artists.into_iter().map(|artist| artist.id).collect())
}

/// Deduplicated `artist_ids`, or 400 if any of them names no artist. Runs
/// before the event is written so a rejected request leaves nothing behind.
async fn known_artist_ids<C: ConnectionTrait>(db: &C, artist_ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
    let mut ids = artist_ids.to_vec();
    ids.sort();
    ids.dedup();

    if !ids.is_empty() {
        let known = artist::Entity::find()
            .filter(artist::Column::Id.is_in(ids.clone()))
            .count(db)
            .await?;
        if known != ids.len() as u64 {
            return Err(AppError::BadRequest("Unknown artist in artist_ids".to_string()));
        }
    }
    Ok(ids)
}

/// Replaces the featured artists of an event in one transaction.
async fn set_featured_artists(state: &AppState, event_id: Uuid, ids: Vec<Uuid>) -> Result<(), AppError> {
    let txn = state.db.begin().await?;
    event_artist::Entity::delete_many()
        .filter(event_artist::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?;
    if !ids.is_empty() {
        let links = ids.into_iter().map(|artist_id| event_artist::ActiveModel {
            event_id: Set(event_id),
            artist_id: Set(artist_id),
        });
        event_artist::Entity::insert_many(links).exec(&txn).await?;
    }
    txn.commit().await?;
    Ok(())
}

/// Extension for a stored event image, from its MIME type or else its file name.
fn image_extension(mime: &str, upload: &Upload) -> Option<String> {
    image::ImageFormat::from_mime_type(mime)
        .and_then(|format| format.extensions_str().first())
        .map(|ext| ext.to_string())
        .or_else(|| upload.filename.as_deref().and_then(get_extension))
}

#[utoipa::path(
    post,
    path = "/admin/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = AdminEventResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Event title already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<AdminEventResponse>), AppError> {
    let now = chrono::Utc::now().naive_utc();
    let event = event::Model {
        id: Uuid::new_v4(),
        title: payload.title.trim().to_string(),
        is_active: payload.is_active,
        slug: String::new(),
        kind: payload.kind,
        image: None,
        total_seats: payload.total_seats,
        is_admission: payload.is_admission,
        admission_price: payload.admission_price,
        start_date: payload.start_date,
        end_date: payload.end_date,
        time: payload.time,
        location: payload.location,
        details: payload.details,
        created: now,
        updated: now,
    };
    check_event(&event)?;
    let featured = known_artist_ids(&state.db, &payload.artist_ids).await?;

    let saved = state.store.save(Tracked::new(event)).await?.into_inner();
    set_featured_artists(&state, saved.id, featured).await?;
    let artist_ids = featured_artist_ids(&state.db, &saved).await?;

    tracing::info!(slug = %saved.slug, artists = artist_ids.len(), "Event created");
    Ok((StatusCode::CREATED, Json(AdminEventResponse::new(saved, artist_ids))))
}

#[utoipa::path(
    get,
    path = "/admin/events",
    params(Pagination),
    responses(
        (status = 200, description = "Events, latest first", body = PaginatedResponse<AdminEventResponse>)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<AdminEventResponse>>, AppError> {
    let mut query = Event::find().order_by_desc(event::Column::StartDate);
    if let Some(q) = pagination.search() {
        let fields = [(event::Entity, event::Column::Title).into_column_ref()];
        query = query.filter(search_condition(&normalize_query(q), &fields));
    }

    let total = query.clone().count(&state.db).await?;
    let events = query
        .limit(pagination.limit())
        .offset(pagination.offset())
        .all(&state.db)
        .await?;

    let mut data = Vec::with_capacity(events.len());
    for event in events {
        let artist_ids = featured_artist_ids(&state.db, &event).await?;
        data.push(AdminEventResponse::new(event, artist_ids));
    }

    Ok(Json(PaginatedResponse::new(
        data,
        total,
        pagination.page(),
        pagination.limit(),
    )))
}

#[utoipa::path(
    get,
    path = "/admin/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event", body = AdminEventResponse),
        (status = 404, description = "Event not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdminEventResponse>, AppError> {
    let event = find_event(&state, id).await?;
    let artist_ids = featured_artist_ids(&state.db, &event).await?;
    Ok(Json(AdminEventResponse::new(event, artist_ids)))
}

#[utoipa::path(
    put,
    path = "/admin/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = AdminEventResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Event not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<AdminEventResponse>, AppError> {
    let mut event = Tracked::loaded(find_event(&state, id).await?);

    if let Some(title) = payload.title {
        event.title = title.trim().to_string();
    }
    if let Some(kind) = payload.kind {
        event.kind = kind;
    }
    if let Some(start_date) = payload.start_date {
        event.start_date = start_date;
    }
    if let Some(end_date) = payload.end_date {
        event.end_date = end_date;
    }
    if let Some(time) = payload.time {
        event.time = time;
    }
    if let Some(location) = payload.location {
        event.location = location;
    }
    if let Some(details) = payload.details {
        event.details = details;
    }
    if let Some(total_seats) = payload.total_seats {
        event.total_seats = total_seats;
    }
    if let Some(is_admission) = payload.is_admission {
        event.is_admission = is_admission;
    }
    if let Some(admission_price) = payload.admission_price {
        event.admission_price = admission_price;
    }
    if let Some(is_active) = payload.is_active {
        event.is_active = is_active;
    }
    check_event(&event)?;
    let featured = match payload.artist_ids {
        Some(artist_ids) => Some(known_artist_ids(&state.db, &artist_ids).await?),
        None => None,
    };

    let saved = state.store.save(event).await?.into_inner();
    if let Some(featured) = featured {
        set_featured_artists(&state, saved.id, featured).await?;
    }
    let artist_ids = featured_artist_ids(&state.db, &saved).await?;
    Ok(Json(AdminEventResponse::new(saved, artist_ids)))
}

#[utoipa::path(
    delete,
    path = "/admin/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let event = find_event(&state, id).await?;
    state.store.delete(event).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stores a display image for the event, scaled down to the configured bounds.
#[utoipa::path(
    post,
    path = "/admin/events/{id}/image",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = AdminEventResponse),
        (status = 400, description = "Missing file or not an image"),
        (status = 404, description = "Event not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Back Office"
)]
pub async fn upload_event_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<AdminEventResponse>, AppError> {
    let event = Tracked::loaded(find_event(&state, id).await?);
    let upload = read_file_field(multipart).await?;

    if !upload.content_type.starts_with("image/") {
        return Err(AppError::BadRequest("Event image must be an image".to_string()));
    }

    let (max_width, max_height) = (state.event_image_max_width, state.event_image_max_height);
    let original = upload.data.clone();
    let (data, mime) = tokio::task::spawn_blocking(move || fit_within(&original, max_width, max_height))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Image task failed: {}", e)))??;

    let ext = image_extension(&mime, &upload)
        .ok_or(AppError::BadRequest("Unsupported image type".to_string()))?;
    let path = upload_path("events", &event.slug, &ext);
    let saved = state
        .store
        .attach(event, &path, data, &mime, |event, path| event.image = Some(path))
        .await?
        .into_inner();

    tracing::info!(path = %path, "Event image uploaded");
    let artist_ids = featured_artist_ids(&state.db, &saved).await?;
    Ok(Json(AdminEventResponse::new(saved, artist_ids)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: Option<&str>) -> Upload {
        Upload {
            filename: filename.map(str::to_string),
            content_type: "image/png".to_string(),
            data: vec![1],
        }
    }

    #[test]
    fn image_extension_prefers_the_mime_type() {
        assert_eq!(image_extension("image/png", &upload(Some("poster.JPG"))).as_deref(), Some("png"));
        assert_eq!(
            image_extension("application/octet-stream", &upload(Some("poster.JPG"))).as_deref(),
            Some("jpg")
        );
        assert_eq!(image_extension("application/octet-stream", &upload(None)), None);
    }

    #[test]
    fn events_may_not_end_before_they_start() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        let now = chrono::Utc::now().naive_utc();
        let mut event = event::Model {
            id: Uuid::new_v4(),
            title: "Monsoon Show".to_string(),
            is_active: true,
            slug: String::new(),
            kind: "Exhibition".to_string(),
            image: None,
            total_seats: None,
            is_admission: false,
            admission_price: None,
            start_date: day(10),
            end_date: day(12),
            time: DEFAULT_TIME.to_string(),
            location: "Main hall".to_string(),
            details: String::new(),
            created: now,
            updated: now,
        };
        assert!(check_event(&event).is_ok());

        event.end_date = day(9);
        assert!(matches!(check_event(&event), Err(AppError::BadRequest(_))));
    }
}
