use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::routes::views::{artwork_views, ArtworkView};
use crate::services::catalog::ArtworkQuery;
use crate::services::listing::{self, Category};
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArtworkPage {
    pub selected_artwork: ArtworkView,
    pub other_artworks: Vec<ArtworkView>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArtworksPage {
    pub category: String,
    pub artworks: Vec<ArtworkView>,
}

#[utoipa::path(
    get,
    path = "/artwork/{artist_slug}/{slug}",
    params(
        ("artist_slug" = String, Path, description = "Artist slug"),
        ("slug" = String, Path, description = "Artwork slug")
    ),
    responses(
        (status = 200, description = "Artwork and the artist's other active artworks", body = ArtworkPage),
        (status = 404, description = "Artwork not found")
    ),
    tag = "Gallery"
)]
pub async fn artwork_detail(
    State(state): State<AppState>,
    Path((artist_slug, slug)): Path<(String, String)>,
) -> Result<Json<ArtworkPage>, AppError> {
    let selected = ArtworkQuery::new()
        .active()
        .by_artist_slug(&artist_slug)
        .slug(&slug)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Artwork not found".to_string()))?;

    let others = ArtworkQuery::new()
        .by_artist_slug(&artist_slug)
        .excluding(&slug)
        .active()
        .orderly()
        .all(&state.db)
        .await?;

    Ok(Json(ArtworkPage {
        selected_artwork: ArtworkView::from(selected),
        other_artworks: artwork_views(others),
    }))
}

/// Every active artwork of the artists in a category, artist by artist.
#[utoipa::path(
    get,
    path = "/artworks/{category}",
    params(
        ("category" = String, Path, description = "new, all, contemporary or traditional")
    ),
    responses(
        (status = 200, description = "Artworks grouped by artist", body = ArtworksPage),
        (status = 404, description = "Unknown category or nothing to show")
    ),
    tag = "Gallery"
)]
pub async fn artworks_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ArtworksPage>, AppError> {
    let parsed = Category::parse(&category)
        .ok_or_else(|| AppError::NotFound(format!("Unknown category '{}'", category)))?;

    let rows = listing::artworks_by_artist(&state.db, parsed, state.recent_days).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No artworks found".to_string()));
    }

    Ok(Json(ArtworksPage {
        category,
        artworks: artwork_views(rows),
    }))
}
