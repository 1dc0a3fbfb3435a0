//! Shared server state

use std::sync::Arc;

use crate::auth::{JwtConfig, JwtService};
use crate::core::{Config, Result, ServerError};
use crate::db::{MemoryProfileStore, PgProfileStore, ProfileStore};
use crate::services::{LocalMediaUploader, MediaUploader, ProfileMutationService, S3MediaUploader};

/// State handed to every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub jwt_service: Arc<JwtService>,
    pub mutations: ProfileMutationService,
}

impl ServerState {
    /// Assemble state from already-built collaborators
    pub fn new(
        config: Config,
        store: Arc<dyn ProfileStore>,
        uploader: Arc<dyn MediaUploader>,
    ) -> Self {
        let jwt_service = JwtService::with_config(JwtConfig::new(config.jwt_secret.clone()));
        let mutations = ProfileMutationService::new(store, uploader, config.max_upload_bytes);
        Self {
            config: Arc::new(config),
            jwt_service: Arc::new(jwt_service),
            mutations,
        }
    }

    /// Build the store and uploader selected by the configuration
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn ProfileStore> = match &config.database_url {
            Some(url) => {
                let store = PgProfileStore::connect(url)
                    .await
                    .map_err(ServerError::Database)?;
                tracing::info!("PostgreSQL store ready");
                Arc::new(store)
            }
            None => {
                if !config.is_development() {
                    return Err(ServerError::Config(format!(
                        "DATABASE_URL must be set in {} environment",
                        config.environment
                    )));
                }
                tracing::warn!("DATABASE_URL not set, using in-memory store");
                Arc::new(MemoryProfileStore::new())
            }
        };

        let uploader: Arc<dyn MediaUploader> = match &config.media_s3_bucket {
            Some(bucket) => {
                let aws_config =
                    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
                let client = aws_sdk_s3::Client::new(&aws_config);
                tracing::info!(bucket = %bucket, "S3 media uploader ready");
                Arc::new(S3MediaUploader::new(
                    client,
                    bucket.clone(),
                    &config.media_public_base_url,
                ))
            }
            None => {
                let root = config.uploads_dir();
                tokio::fs::create_dir_all(&root).await?;
                tracing::info!(root = %root.display(), "Local media uploader ready");
                Arc::new(LocalMediaUploader::new(root, &config.media_public_base_url))
            }
        };

        Ok(Self::new(config.clone(), store, uploader))
    }
}
