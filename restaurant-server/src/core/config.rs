//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Notes |
//! |----------|---------|-------|
//! | ENVIRONMENT | development | development \| staging \| production |
//! | HTTP_PORT | 8080 | |
//! | DATABASE_URL | (unset) | unset → in-memory store |
//! | JWT_SECRET | dev placeholder | required outside development |
//! | MEDIA_S3_BUCKET | (unset) | set → S3 uploader, otherwise local disk |
//! | MEDIA_PUBLIC_BASE_URL | see below | prefix of returned media URLs |
//! | WORK_DIR | ./data | local uploads live in `{WORK_DIR}/uploads` |
//! | MAX_UPLOAD_BYTES | 10485760 | per attachment |
//! | LOG_LEVEL | info | |
//! | LOG_DIR | (unset) | daily log files when the directory exists |
//!
//! `MEDIA_PUBLIC_BASE_URL` defaults to `https://{bucket}.s3.amazonaws.com`
//! with S3 and to `http://localhost:{HTTP_PORT}` with local uploads.

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default per-attachment limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    pub http_port: u16,
    /// PostgreSQL connection URL
    pub database_url: Option<String>,
    /// JWT signing secret
    pub jwt_secret: String,
    /// S3 bucket for restaurant media
    pub media_s3_bucket: Option<String>,
    /// Prefix of every returned media URL
    pub media_public_base_url: String,
    pub work_dir: String,
    pub max_upload_bytes: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 8080,
            database_url: None,
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            media_s3_bucket: None,
            media_public_base_url: "http://localhost:8080".into(),
            work_dir: "./data".into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let media_s3_bucket = std::env::var("MEDIA_S3_BUCKET")
            .ok()
            .filter(|s| !s.is_empty());
        let media_public_base_url = std::env::var("MEDIA_PUBLIC_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| match &media_s3_bucket {
                Some(bucket) => format!("https://{bucket}.s3.amazonaws.com"),
                None => format!("http://localhost:{http_port}"),
            });

        Ok(Self {
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            http_port,
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            media_s3_bucket,
            media_public_base_url,
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Directory served at `/uploads`
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
