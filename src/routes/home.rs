use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::error::AppError;
use crate::routes::views::{artwork_views, ArtworkView};
use crate::services::catalog::ArtworkQuery;
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HomeResponse {
    pub artworks: Vec<ArtworkView>,
}

/// One representative artwork per artist, for the landing page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Representative artworks", body = HomeResponse),
        (status = 404, description = "Nothing to show")
    ),
    tag = "Gallery"
)]
pub async fn root(State(state): State<AppState>) -> Result<Json<HomeResponse>, AppError> {
    let rows = ArtworkQuery::new()
        .representative()
        .active()
        .all(&state.db)
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("No artworks found".to_string()));
    }

    Ok(Json(HomeResponse {
        artworks: artwork_views(rows),
    }))
}
