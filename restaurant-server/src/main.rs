use restaurant_server::{Config, Server, init_logger_with_file};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        "Starting restaurant-server (env: {}, store: {}, media: {})",
        config.environment,
        if config.database_url.is_some() { "postgres" } else { "memory" },
        if config.media_s3_bucket.is_some() { "s3" } else { "local" },
    );

    Server::new(config).run().await?;

    Ok(())
}
