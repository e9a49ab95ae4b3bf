//! Shared configuration and common types for the Snip server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error response body returned by the API

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use types::ErrorResponse;
