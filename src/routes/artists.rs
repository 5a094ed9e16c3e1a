use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::routes::views::{artwork_views, ArtistView, ArtworkView};
use crate::services::catalog::{ArtistQuery, ArtworkQuery};
use crate::services::listing::{self, Category};
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArtistPage {
    pub artist: ArtistView,
    pub artworks: Vec<ArtworkView>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArtistsPage {
    pub category: String,
    pub artworks: Vec<ArtworkView>,
}

#[utoipa::path(
    get,
    path = "/artist/{slug}",
    params(
        ("slug" = String, Path, description = "Artist slug")
    ),
    responses(
        (status = 200, description = "Artist with their active artworks", body = ArtistPage),
        (status = 404, description = "Artist not found or has no active artworks")
    ),
    tag = "Gallery"
)]
pub async fn artist_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ArtistPage>, AppError> {
    let artist = ArtistQuery::new()
        .active()
        .slug(&slug)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Artist not found".to_string()))?;

    let rows = ArtworkQuery::new()
        .by_artist(artist.id)
        .active()
        .orderly()
        .all(&state.db)
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("No artworks found for artist".to_string()));
    }

    Ok(Json(ArtistPage {
        artist: ArtistView::new(artist, state.files.as_ref()),
        artworks: artwork_views(rows),
    }))
}

/// Representative artworks of the artists in a category.
#[utoipa::path(
    get,
    path = "/artists/{category}",
    params(
        ("category" = String, Path, description = "new, all, contemporary or traditional")
    ),
    responses(
        (status = 200, description = "Representative artworks", body = ArtistsPage),
        (status = 404, description = "Unknown category or nothing to show")
    ),
    tag = "Gallery"
)]
pub async fn artists_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ArtistsPage>, AppError> {
    let parsed = Category::parse(&category)
        .ok_or_else(|| AppError::NotFound(format!("Unknown category '{}'", category)))?;

    let rows = listing::representative_artworks(&state.db, parsed, state.recent_days).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No artists found".to_string()));
    }

    Ok(Json(ArtistsPage {
        category,
        artworks: artwork_views(rows),
    }))
}
