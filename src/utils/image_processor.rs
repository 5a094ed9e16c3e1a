use image::ImageFormat;
use std::io::Cursor;
use crate::error::AppError;

/// Shrinks an uploaded image so it fits inside `max_width` x `max_height`,
/// keeping aspect ratio and the original encoding. Images that already fit
/// are returned untouched.
pub fn fit_within(data: &[u8], max_width: u32, max_height: u32) -> Result<(Vec<u8>, String), AppError> {
    let format = image::guess_format(data)
        .map_err(|e| AppError::BadRequest(format!("Unrecognised image format: {}", e)))?;
    let mime_type = mime_for(format);

    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| AppError::BadRequest(format!("Failed to load image: {}", e)))?;

    if img.width() <= max_width && img.height() <= max_height {
        return Ok((data.to_vec(), mime_type.to_string()));
    }

    let resized = img.resize(max_width, max_height, image::imageops::FilterType::Lanczos3);

    let mut buffer = Cursor::new(Vec::new());
    resized
        .write_to(&mut buffer, format)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode image: {}", e)))?;

    Ok((buffer.into_inner(), mime_type.to_string()))
}

pub fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Avif => "image/avif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        _ => "application/octet-stream",
    }
}
