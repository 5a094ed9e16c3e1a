use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::error::AppError;
use crate::services::sitemap;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "Sitemap of public pages", content_type = "application/xml")
    ),
    tag = "Gallery"
)]
pub async fn sitemap_xml(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries = sitemap::collect_entries(&state.db).await?;
    let xml = sitemap::render(&state.site_url, &entries)?;

    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}
