//! Fixed-TTL redis cache for catalog reads.
//!
//! Expiry is purely time-based; writes never invalidate. Cache failures
//! degrade to the underlying read with a warning.

use redis::{AsyncCommands, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// Default cache window for list/detail responses.
pub const DEFAULT_TTL_SECONDS: u64 = 60;

#[derive(Clone)]
pub struct CatalogCache {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl CatalogCache {
    pub fn new(client: ConnectionManager) -> Self {
        Self::with_ttl(client, DEFAULT_TTL_SECONDS)
    }

    pub fn with_ttl(client: ConnectionManager, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
        }
    }

    fn key(suffix: &str) -> String {
        format!("cache:catalog:{}", suffix)
    }

    pub async fn get<T: DeserializeOwned>(&self, suffix: &str) -> Option<T> {
        let mut client = self.client.clone();
        match client.get::<_, Option<String>>(Self::key(suffix)).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", suffix, e);
                None
            }
        }
    }

    pub async fn put<T: Serialize>(&self, suffix: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cache serialization failed for '{}': {}", suffix, e);
                return;
            }
        };

        let mut client = self.client.clone();
        if let Err(e) = client
            .set_ex::<_, _, ()>(Self::key(suffix), raw, self.ttl_seconds)
            .await
        {
            warn!("Cache write failed for '{}': {}", suffix, e);
        }
    }
}
