//! # Infrastructure Layer
//!
//! Concrete backings for the capabilities defined in `snip_core`.
//!
//! ## Architecture
//!
//! - **Cache**: Redis client with retry, backoff and per-command timeouts
//! - **Whitelist**: `WhitelistStore` implementation on top of that client

use snip_core::errors::TokenError;

/// Cache module - Redis client and operations
pub mod cache;

/// Whitelist module - refresh token whitelist backed by Redis
pub mod whitelist;

pub use cache::RedisClient;
pub use whitelist::RedisWhitelistStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Redis did not answer within the configured deadline
    #[error("Cache operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Every infrastructure failure reaching the token manager is a store outage
impl From<InfrastructureError> for TokenError {
    fn from(err: InfrastructureError) -> Self {
        TokenError::store_unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_errors_become_store_unavailable() {
        let err: TokenError = InfrastructureError::Timeout { timeout_ms: 250 }.into();
        assert!(matches!(err, TokenError::StoreUnavailable { .. }));
        assert!(err.is_retryable());

        let err: TokenError = InfrastructureError::Config("bad url".to_string()).into();
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
    }
}
