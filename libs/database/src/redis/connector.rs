use redis::RedisError;
use redis::aio::ConnectionManager;
use tracing::info;

use super::RedisConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect to redis and return a multiplexed connection manager.
pub async fn connect_from_config(config: &RedisConfig) -> Result<ConnectionManager, RedisError> {
    let client = redis::Client::open(config.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    info!("Successfully connected to redis");
    Ok(manager)
}

/// Connect to redis with automatic retry on failure.
pub async fn connect_from_config_with_retry(
    config: &RedisConfig,
    retry_config: Option<RetryConfig>,
) -> Result<ConnectionManager, RedisError> {
    match retry_config {
        Some(retry_config) => {
            retry_with_backoff(|| connect_from_config(config), retry_config).await
        }
        None => retry(|| connect_from_config(config)).await,
    }
}
