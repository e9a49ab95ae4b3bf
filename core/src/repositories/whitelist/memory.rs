//! In-process whitelist store
//!
//! Backs the token manager in tests and single-node setups. Expiry follows
//! the tokio clock so paused-time tests can advance past a TTL. Expired
//! entries are dropped whenever a new id is registered, so the map stays
//! bounded by the number of live refresh tokens.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::errors::TokenError;

use super::r#trait::WhitelistStore;

/// Whitelist held in a shared map of identifier to deadline
#[derive(Clone, Default)]
pub struct MemoryWhitelist {
    entries: Arc<RwLock<HashMap<Uuid, Instant>>>,
}

impl MemoryWhitelist {
    /// Create an empty whitelist
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry whose deadline has passed, returning how many
    pub async fn purge_expired(&self) -> usize {
        purge(&mut *self.entries.write().await, Instant::now())
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|deadline| **deadline > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn purge(entries: &mut HashMap<Uuid, Instant>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, deadline| *deadline > now);
    let purged = before - entries.len();
    if purged > 0 {
        tracing::debug!(purged, "purged expired whitelist entries");
    }
    purged
}

#[async_trait]
impl WhitelistStore for MemoryWhitelist {
    async fn register(&self, id: Uuid, ttl: Duration) -> Result<(), TokenError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        purge(&mut entries, now);
        // A zero TTL yields an entry that is already expired
        entries.insert(id, now + ttl);
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, TokenError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&id)
            .is_some_and(|deadline| *deadline > Instant::now()))
    }

    async fn remove(&self, id: Uuid) -> Result<(), TokenError> {
        self.entries.write().await.remove(&id);
        Ok(())
    }

    async fn consume(&self, id: Uuid) -> Result<bool, TokenError> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(&id)
            .is_some_and(|deadline| deadline > Instant::now()))
    }
}
