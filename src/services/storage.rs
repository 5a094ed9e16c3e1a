use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::AppError;

/// Where uploaded biographies and event images live.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn put(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    async fn delete(&self, path: &str) -> Result<(), AppError>;

    /// Public URL a client can fetch `path` from.
    fn url(&self, path: &str) -> String;
}

/// Deletes `path`, ignoring failures. A file that is already gone or cannot
/// be removed is not the caller's problem.
pub async fn delete_quietly(store: &dyn FileStore, path: &str) {
    let _ = store.delete(path).await;
}

/// Files under a directory on the local disk, served from `base_url`.
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    root: PathBuf,
    base_url: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !safe || path.is_empty() {
            return Err(AppError::BadRequest(format!("Invalid storage path '{}'", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, path: &str, data: Vec<u8>, _content_type: &str) -> Result<(), AppError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::InternalServerError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        tokio::fs::write(&target, data).await.map_err(|e| {
            AppError::InternalServerError(format!("Failed to write {}: {}", target.display(), e))
        })?;
        tracing::debug!(path, "Stored file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let target = self.resolve(path)?;
        tokio::fs::remove_file(&target).await.map_err(|e| {
            AppError::InternalServerError(format!("Failed to delete {}: {}", target.display(), e))
        })?;
        tracing::debug!(path, "Deleted file");
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Storage path for an upload: `{dir}/{slug}-{8 hex chars}.{ext}`. The
/// random part keeps a replacement from overwriting the file it replaces.
pub fn upload_path(dir: &str, slug: &str, ext: &str) -> String {
    let unique = uuid::Uuid::new_v4().simple().to_string();
    format!("{}/{}-{}.{}", dir, slug, &unique[..8], ext)
}
