//! Cache module for Redis-based storage
//!
//! Provides the Redis client used by the refresh token whitelist, including
//! connection retry, command timeouts and the handful of key operations the
//! whitelist needs.

pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use snip_shared::config::cache::CacheConfig;
