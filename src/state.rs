use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::services::catalog::DEFAULT_RECENT_DAYS;
use crate::services::storage::FileStore;
use crate::services::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: Store,
    pub files: Arc<dyn FileStore>,
    pub jwt_secret: String,
    pub site_url: String,
    pub recent_days: i64,
    pub event_image_max_width: u32,
    pub event_image_max_height: u32,
}

impl AppState {
    /// State with default site settings; `from_config` overrides them.
    pub fn new(db: DatabaseConnection, files: Arc<dyn FileStore>, jwt_secret: impl Into<String>) -> Self {
        Self {
            store: Store::new(db.clone(), files.clone()),
            db,
            files,
            jwt_secret: jwt_secret.into(),
            site_url: "http://localhost:3000".to_string(),
            recent_days: DEFAULT_RECENT_DAYS,
            event_image_max_width: 1200,
            event_image_max_height: 800,
        }
    }

    pub fn from_config(db: DatabaseConnection, files: Arc<dyn FileStore>, config: &Config) -> Self {
        Self {
            site_url: config.site_url.clone(),
            recent_days: config.recent_days,
            event_image_max_width: config.event_image_max_width,
            event_image_max_height: config.event_image_max_height,
            ..Self::new(db, files, config.jwt_secret.clone())
        }
    }
}
