//! Whitelist store trait defining the refresh token presence registry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::TokenError;

/// Presence registry for refresh token identifiers
///
/// An entry for `id` means "the refresh token with this identifier has not
/// been consumed, revoked or expired". Entries carry their own TTL and
/// disappear without notification once it elapses; implementations must
/// report an expired entry exactly like one that was never registered.
///
/// Every method fails only with [`TokenError::StoreUnavailable`].
///
/// # Example
/// ```no_run
/// # use std::time::Duration;
/// # use uuid::Uuid;
/// # use snip_core::repositories::WhitelistStore;
/// # async fn example(store: &impl WhitelistStore) -> Result<(), snip_core::errors::TokenError> {
/// let id = Uuid::new_v4();
/// store.register(id, Duration::from_secs(60)).await?;
/// assert!(store.exists(id).await?);
///
/// // Exactly one caller observes `true`
/// assert!(store.consume(id).await?);
/// assert!(!store.consume(id).await?);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait WhitelistStore: Send + Sync {
    /// Registers `id` for `ttl`
    ///
    /// Re-registering an existing id resets its TTL.
    async fn register(&self, id: Uuid, ttl: Duration) -> Result<(), TokenError>;

    /// Checks whether `id` is currently registered
    async fn exists(&self, id: Uuid) -> Result<bool, TokenError>;

    /// Removes `id`; removing a missing id is not an error
    async fn remove(&self, id: Uuid) -> Result<(), TokenError>;

    /// Atomically removes `id` and reports whether it was present
    ///
    /// When the same id is consumed concurrently, exactly one caller
    /// receives `Ok(true)`.
    async fn consume(&self, id: Uuid) -> Result<bool, TokenError>;
}

#[async_trait]
impl<T: WhitelistStore + ?Sized> WhitelistStore for Arc<T> {
    async fn register(&self, id: Uuid, ttl: Duration) -> Result<(), TokenError> {
        (**self).register(id, ttl).await
    }

    async fn exists(&self, id: Uuid) -> Result<bool, TokenError> {
        (**self).exists(id).await
    }

    async fn remove(&self, id: Uuid) -> Result<(), TokenError> {
        (**self).remove(id).await
    }

    async fn consume(&self, id: Uuid) -> Result<bool, TokenError> {
        (**self).consume(id).await
    }
}
