use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::validation::MAX_IMAGE_BYTES;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_PREVIEW_TTL_SECS: u64 = 3600;
pub const DEFAULT_MAX_PREVIEWS: usize = 256;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub predict_url: String,
    pub cors_origins: Option<String>,
    pub preview_ttl: Duration,
    /// Previews held at once; the oldest is dropped to make room.
    pub max_previews: usize,
    /// Request body limit for `/upload`, including multipart framing.
    pub max_upload_bytes: usize,
    pub uploads_per_minute: u64,
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("[freshcheck] Invalid {} value {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let port: u16 = parse_env("PORT", DEFAULT_PORT);

        let predict_url =
            std::env::var("PREDICT_URL").unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string());

        let cors_origins = std::env::var("CORS_ORIGINS").ok();

        let preview_ttl =
            Duration::from_secs(parse_env("PREVIEW_TTL_SECS", DEFAULT_PREVIEW_TTL_SECS));

        let max_previews = parse_env("MAX_PREVIEWS", DEFAULT_MAX_PREVIEWS).max(1);

        let max_upload_bytes = parse_env(
            "MAX_UPLOAD_BYTES",
            (MAX_IMAGE_BYTES + 1024 * 1024) as usize,
        );

        let uploads_per_minute = parse_env("UPLOADS_PER_MINUTE", 30u64).max(1);

        Self {
            port,
            predict_url,
            cors_origins,
            preview_ttl,
            max_previews,
            max_upload_bytes,
            uploads_per_minute,
        }
    }

    /// Settings for serving against `predict_url` without reading the environment.
    pub fn for_upstream(predict_url: impl Into<String>) -> Self {
        Self {
            port: DEFAULT_PORT,
            predict_url: predict_url.into(),
            cors_origins: None,
            preview_ttl: Duration::from_secs(DEFAULT_PREVIEW_TTL_SECS),
            max_previews: DEFAULT_MAX_PREVIEWS,
            max_upload_bytes: (MAX_IMAGE_BYTES + 1024 * 1024) as usize,
            uploads_per_minute: 30,
        }
    }
}
