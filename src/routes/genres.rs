use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::AppError;
use crate::routes::views::GenreView;
use crate::services::catalog::GenreQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/learn/{slug}",
    params(
        ("slug" = String, Path, description = "Genre slug")
    ),
    responses(
        (status = 200, description = "Genre description", body = GenreView),
        (status = 404, description = "Genre not found")
    ),
    tag = "Gallery"
)]
pub async fn learn(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<GenreView>, AppError> {
    let genre = GenreQuery::new()
        .slug(slug)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Genre not found".to_string()))?;

    Ok(Json(GenreView::from(genre)))
}
