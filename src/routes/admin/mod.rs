//! Back-office CRUD. Every write goes through the store so lifecycle hooks run.

pub mod artists;
pub mod artworks;
pub mod events;
pub mod genres;

use axum::extract::Multipart;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

pub(crate) struct Upload {
    pub filename: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Reads the `file` field of a multipart body.
pub(crate) async fn read_file_field(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Invalid multipart data".to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().map(str::to_string);
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::BadRequest("Failed to read file bytes".to_string()))?;

            if data.is_empty() {
                return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
            }

            return Ok(Upload {
                filename,
                content_type,
                data: data.to_vec(),
            });
        }
    }

    Err(AppError::BadRequest("No file field found".to_string()))
}

/// For `#[serde(default, deserialize_with = "nullable")]` on update fields:
/// an absent key stays `None`, an explicit `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Non-blank and at most `max` characters.
pub(crate) fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
