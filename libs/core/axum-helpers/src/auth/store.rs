//! Token revocation stores.
//!
//! Logout works by blacklisting a token's `jti` until the token's
//! natural expiry. The store trait keeps the JWT layer independent of
//! the backing storage: redis in production, an in-memory map in tests.

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Storage backend for revoked token ids.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Mark a token id as revoked for `ttl_seconds`.
    async fn blacklist(&self, jti: &str, ttl_seconds: u64) -> eyre::Result<()>;

    /// Check whether a token id has been revoked.
    async fn is_blacklisted(&self, jti: &str) -> eyre::Result<bool>;
}

/// Redis-backed revocation store.
#[derive(Clone)]
pub struct RedisAuthStore {
    client: ConnectionManager,
}

impl RedisAuthStore {
    pub fn new(manager: ConnectionManager) -> Self {
        tracing::info!("Redis auth store initialized");
        Self { client: manager }
    }

    fn key(jti: &str) -> String {
        format!("jwt:blacklist:{}", jti)
    }
}

#[async_trait]
impl AuthStore for RedisAuthStore {
    async fn blacklist(&self, jti: &str, ttl_seconds: u64) -> eyre::Result<()> {
        let mut client = self.client.clone();
        client
            .set_ex::<_, _, ()>(Self::key(jti), "1", ttl_seconds)
            .await?;
        Ok(())
    }

    async fn is_blacklisted(&self, jti: &str) -> eyre::Result<bool> {
        let mut client = self.client.clone();
        let exists: bool = client.exists(Self::key(jti)).await?;
        Ok(exists)
    }
}

/// In-memory revocation store (for development/testing).
#[derive(Default)]
pub struct InMemoryAuthStore {
    entries: RwLock<HashMap<String, Instant>>,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthStore for InMemoryAuthStore {
    async fn blacklist(&self, jti: &str, ttl_seconds: u64) -> eyre::Result<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .write()
            .await
            .insert(jti.to_string(), expires_at);
        Ok(())
    }

    async fn is_blacklisted(&self, jti: &str) -> eyre::Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(jti)
            .is_some_and(|expires_at| *expires_at > Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_blacklist() {
        let store = InMemoryAuthStore::new();

        assert!(!store.is_blacklisted("abc").await.unwrap());

        store.blacklist("abc", 60).await.unwrap();
        assert!(store.is_blacklisted("abc").await.unwrap());
        assert!(!store.is_blacklisted("other").await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_blacklist_expiry() {
        let store = InMemoryAuthStore::new();

        store.blacklist("gone", 0).await.unwrap();
        assert!(!store.is_blacklisted("gone").await.unwrap());
    }
}
