//! Refresh token whitelist backed by Redis

pub mod redis_whitelist;

pub use redis_whitelist::RedisWhitelistStore;
