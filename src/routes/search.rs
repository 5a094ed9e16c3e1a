use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::AppError;
use crate::routes::views::{artwork_views, ArtistSummary, ArtworkView};
use crate::services::search::{search_artists, search_artworks};
use crate::state::AppState;

#[derive(Deserialize, IntoParams)]
pub struct SearchParams {
    /// Terms separated by spaces; `"quoted phrases"` match as a whole.
    pub q: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SearchResults {
    pub query: String,
    pub artworks: Vec<ArtworkView>,
    pub artists: Vec<ArtistSummary>,
}

#[utoipa::path(
    get,
    path = "/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching active artworks and artists", body = SearchResults)
    ),
    tag = "Gallery"
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, AppError> {
    let query = params.q.unwrap_or_default();

    let artworks = search_artworks(&state.db, &query).await?;
    let artists = search_artists(&state.db, &query).await?;
    tracing::debug!(
        query = %query,
        artworks = artworks.len(),
        artists = artists.len(),
        "Search"
    );

    Ok(Json(SearchResults {
        query,
        artworks: artwork_views(artworks),
        artists: artists.iter().map(ArtistSummary::from).collect(),
    }))
}
