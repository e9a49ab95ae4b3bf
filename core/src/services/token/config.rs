//! Configuration for the token service

use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;
use snip_shared::config::JwtConfig;

use crate::domain::entities::JWT_ISSUER;
use crate::errors::{DomainError, DomainResult};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_expiry: Duration,
    /// Refresh token lifetime, also used as the whitelist TTL
    pub refresh_token_expiry: Duration,
    /// Issuer stamped into and required from every token
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS512,
            access_token_expiry: Duration::minutes(15),
            refresh_token_expiry: Duration::minutes(43_200),
            issuer: JWT_ISSUER.to_string(),
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with the given secret and default lifetimes
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Builds the service configuration from the loaded `JwtConfig`
    ///
    /// Only HMAC algorithms are accepted since tokens are signed with a
    /// single shared secret.
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        config
            .validate()
            .map_err(|message| DomainError::Validation { message })?;

        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            DomainError::Validation {
                message: format!("unsupported JWT algorithm: {}", config.algorithm),
            }
        })?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(DomainError::Validation {
                message: format!(
                    "JWT algorithm {} requires key material, only HMAC is supported",
                    config.algorithm
                ),
            });
        }

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            access_token_expiry: lifetime("access", config.access_token_expiry)?,
            refresh_token_expiry: lifetime("refresh", config.refresh_token_expiry)?,
            issuer: config.issuer.clone(),
        })
    }

    /// Sets the access token lifetime
    pub fn with_access_expiry(mut self, expiry: Duration) -> Self {
        self.access_token_expiry = expiry;
        self
    }

    /// Sets the refresh token lifetime
    pub fn with_refresh_expiry(mut self, expiry: Duration) -> Self {
        self.refresh_token_expiry = expiry;
        self
    }
}

/// Converts a lifetime in seconds, rejecting values that cannot be added to
/// the current time when a token is signed
fn lifetime(kind: &str, seconds: i64) -> DomainResult<Duration> {
    Duration::try_seconds(seconds)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| DomainError::Validation {
            message: format!("{} token expiry of {}s is out of range", kind, seconds),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = TokenServiceConfig::default();
        assert_eq!(config.algorithm, Algorithm::HS512);
        assert_eq!(config.access_token_expiry, Duration::minutes(15));
        assert_eq!(config.refresh_token_expiry, Duration::days(30));
        assert_eq!(config.issuer, "url-shortener");
    }

    #[test]
    fn test_from_jwt_config() {
        let mut jwt = JwtConfig::new("a-strong-secret");
        jwt.algorithm = "HS256".to_string();
        jwt.access_token_expiry = 60;
        jwt.refresh_token_expiry = 3600;

        let config = TokenServiceConfig::from_jwt_config(&jwt).unwrap();
        assert_eq!(config.jwt_secret, "a-strong-secret");
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expiry, Duration::seconds(60));
        assert_eq!(config.refresh_token_expiry, Duration::hours(1));
    }

    #[test]
    fn test_from_jwt_config_rejects_unknown_algorithm() {
        let mut jwt = JwtConfig::new("secret");
        jwt.algorithm = "none".to_string();
        assert!(matches!(
            TokenServiceConfig::from_jwt_config(&jwt),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_from_jwt_config_rejects_asymmetric_algorithm() {
        let mut jwt = JwtConfig::new("secret");
        jwt.algorithm = "RS256".to_string();
        assert!(matches!(
            TokenServiceConfig::from_jwt_config(&jwt),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_from_jwt_config_rejects_invalid_lifetimes() {
        let mut jwt = JwtConfig::new("secret");
        jwt.access_token_expiry = 0;
        assert!(TokenServiceConfig::from_jwt_config(&jwt).is_err());
    }

    #[test]
    fn test_from_jwt_config_rejects_unrepresentable_lifetime() {
        let mut jwt = JwtConfig::new("secret");
        jwt.refresh_token_expiry = 9_000_000_000_000;
        assert!(jwt.validate().is_ok());

        let err = TokenServiceConfig::from_jwt_config(&jwt).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref message } if message.contains("refresh")));

        jwt.refresh_token_expiry = i64::MAX;
        assert!(matches!(
            TokenServiceConfig::from_jwt_config(&jwt),
            Err(DomainError::Validation { .. })
        ));
    }
}
