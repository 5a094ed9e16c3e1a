pub mod image_processor;
pub mod slug;

/// File extension of an uploaded file name, lower-cased.
pub fn get_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| ext.to_ascii_lowercase())
}
