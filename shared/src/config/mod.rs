//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing secret, algorithm and lifetimes
//! - `cache` - Redis connection backing the refresh token whitelist
//! - `environment` - deployment environment detection
//! - `logging` - tracing filter and output format
//! - `server` - HTTP server and cookie configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token configuration
    pub jwt: JwtConfig,

    /// Whitelist store configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Self {
            environment,
            server: ServerConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Token cookies are `Secure` and `HttpOnly` only in production
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_development() {
        let config = AppConfig::default();
        assert!(config.environment.is_development());
        assert!(!config.secure_cookies());
        assert!(config.jwt.validate().is_ok());
    }

    #[test]
    fn test_production_uses_secure_cookies() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.secure_cookies());
    }
}
