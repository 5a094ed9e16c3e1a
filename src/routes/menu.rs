use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::error::AppError;
use crate::routes::views::{ArtistSummary, GenreLink};
use crate::services::catalog::{ArtistQuery, ArtworkQuery, Bucket, GenreQuery};
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct GenreArtists {
    pub genre: GenreLink,
    pub artists: Vec<ArtistSummary>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MenuResponse {
    pub genres: Vec<GenreLink>,
    pub new_artists: Vec<ArtistSummary>,
    pub contemporary_artists: Vec<ArtistSummary>,
    pub traditional_artists: Vec<GenreArtists>,
    pub all_artists: Vec<ArtistSummary>,
}

/// Sidebar menus shared by every page.
#[utoipa::path(
    get,
    path = "/menu",
    responses(
        (status = 200, description = "Sidebar menus", body = MenuResponse)
    ),
    tag = "Gallery"
)]
pub async fn menu(State(state): State<AppState>) -> Result<Json<MenuResponse>, AppError> {
    let db = &state.db;
    let traditional_genres = GenreQuery::new().bucket(Bucket::Traditional).all(db).await?;

    let new_artists = ArtistQuery::new()
        .recent(state.recent_days)
        .active()
        .orderly()
        .all(db)
        .await?;

    let contemporary = ArtworkQuery::new()
        .contemporary()
        .orderly()
        .distinctly()
        .active()
        .all(db)
        .await?;

    let mut traditional_artists = Vec::with_capacity(traditional_genres.len());
    for genre in &traditional_genres {
        let rows = ArtworkQuery::new()
            .genre(&genre.name)
            .orderly()
            .distinctly()
            .active()
            .all(db)
            .await?;
        traditional_artists.push(GenreArtists {
            genre: GenreLink::from(genre),
            artists: rows.iter().map(|(_, artist)| ArtistSummary::from(artist)).collect(),
        });
    }

    let all_artists = ArtistQuery::new().active().orderly().all(db).await?;

    Ok(Json(MenuResponse {
        genres: traditional_genres.iter().map(GenreLink::from).collect(),
        new_artists: new_artists.iter().map(ArtistSummary::from).collect(),
        contemporary_artists: contemporary
            .iter()
            .map(|(_, artist)| ArtistSummary::from(artist))
            .collect(),
        traditional_artists,
        all_artists: all_artists.iter().map(ArtistSummary::from).collect(),
    }))
}
