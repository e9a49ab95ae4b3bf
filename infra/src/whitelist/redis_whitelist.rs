//! Redis implementation of the `WhitelistStore` capability.
//!
//! Each whitelisted refresh token is a key `token-wl:<jti>` (behind the
//! optional configured prefix) holding an empty value, with Redis enforcing
//! the TTL. `consume` is a single `DEL` sent exactly once, so only one
//! concurrent caller can observe the key being removed, and a lost reply is
//! reported as an outage.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use snip_core::errors::TokenError;
use snip_core::repositories::WhitelistStore;
use snip_shared::config::cache::CacheConfig;

use crate::cache::RedisClient;

/// Key namespace for whitelisted refresh token identifiers
pub const WHITELIST_KEY_PREFIX: &str = "token-wl:";

/// Whitelist store keeping refresh token identifiers in Redis
#[derive(Clone)]
pub struct RedisWhitelistStore {
    client: RedisClient,
}

impl RedisWhitelistStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Ping Redis; used by the health endpoint
    pub async fn is_healthy(&self) -> bool {
        self.client.health_check().await.unwrap_or(false)
    }

    fn key(&self, id: Uuid) -> String {
        whitelist_key(self.client.config(), id)
    }
}

/// Full Redis key for a whitelisted identifier
pub(crate) fn whitelist_key(config: &CacheConfig, id: Uuid) -> String {
    config.make_key(&format!("{}{}", WHITELIST_KEY_PREFIX, id))
}

#[async_trait]
impl WhitelistStore for RedisWhitelistStore {
    async fn register(&self, id: Uuid, ttl: Duration) -> Result<(), TokenError> {
        let key = self.key(id);
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);

        // Redis rejects a zero expiry; such an entry is born expired
        if ttl_ms == 0 {
            tracing::debug!(jti = %id, "zero whitelist ttl, clearing entry instead");
            self.client.delete(&key).await?;
            return Ok(());
        }

        self.client.set_with_expiry_ms(&key, "", ttl_ms).await?;
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, TokenError> {
        Ok(self.client.exists(&self.key(id)).await?)
    }

    async fn remove(&self, id: Uuid) -> Result<(), TokenError> {
        self.client.delete(&self.key(id)).await?;
        Ok(())
    }

    async fn consume(&self, id: Uuid) -> Result<bool, TokenError> {
        Ok(self.client.take(&self.key(id)).await?)
    }
}
