use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub site_url: String,
    pub recent_days: i64,
    pub storage_backend: StorageBackend,
    pub media_root: PathBuf,
    pub media_url: String,
    pub s3_bucket_name: String,
    pub s3_endpoint: Option<String>,
    pub aws_region: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub event_image_max_width: u32,
    pub event_image_max_height: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let storage_backend = match optional("STORAGE_BACKEND").as_deref() {
            None | Some("local") => StorageBackend::Local,
            Some("s3") => StorageBackend::S3,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: parsed("BIND_ADDR", "0.0.0.0:3000")?,
            site_url: optional("SITE_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            recent_days: parsed("RECENT_DAYS", "30")?,
            storage_backend,
            media_root: PathBuf::from(optional("MEDIA_ROOT").unwrap_or_else(|| "./media".to_string())),
            media_url: optional("MEDIA_URL").unwrap_or_else(|| "/media".to_string()),
            s3_bucket_name: optional("S3_BUCKET_NAME").unwrap_or_else(|| "gallery-media".to_string()),
            s3_endpoint: optional("S3_ENDPOINT"),
            aws_region: optional("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_access_key_id: optional("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: optional("AWS_SECRET_ACCESS_KEY"),
            event_image_max_width: parsed("EVENT_IMAGE_MAX_WIDTH", "1200")?,
            event_image_max_height: parsed("EVENT_IMAGE_MAX_HEIGHT", "800")?,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn parsed<T: std::str::FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = optional(key).unwrap_or_else(|| default.to_string());
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Loads the configuration once; later calls return the cached value.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}
