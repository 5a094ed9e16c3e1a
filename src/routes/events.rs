use axum::{
    extract::{Path, State},
    response::Json,
};
use sea_orm::{ModelTrait, QueryOrder};

use crate::entities::artist;
use crate::error::AppError;
use crate::routes::views::EventView;
use crate::services::catalog::EventQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/event/{slug}",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Event details", body = EventView),
        (status = 404, description = "Event not found")
    ),
    tag = "Events"
)]
pub async fn event_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventView>, AppError> {
    let event = EventQuery::new()
        .active()
        .slug(slug)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Event not found".to_string()))?;

    let artists = event
        .find_related(artist::Entity)
        .order_by_asc(artist::Column::LastName)
        .order_by_asc(artist::Column::FirstName)
        .all(&state.db)
        .await?;

    Ok(Json(EventView::new(event, &artists, state.files.as_ref())))
}

#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Active events, newest first", body = [EventView]),
        (status = 404, description = "No events")
    ),
    tag = "Events"
)]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventView>>, AppError> {
    let events = EventQuery::new().active().all(&state.db).await?;
    if events.is_empty() {
        return Err(AppError::NotFound("No events found".to_string()));
    }

    let mut views = Vec::with_capacity(events.len());
    for event in events {
        let artists = event.find_related(artist::Entity).all(&state.db).await?;
        views.push(EventView::new(event, &artists, state.files.as_ref()));
    }

    Ok(Json(views))
}
