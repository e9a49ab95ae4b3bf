//! Token signing configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing and lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to sign and verify every token
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds, also the whitelist TTL
    pub refresh_token_expiry: i64,

    /// Issuer claim stamped into every token
    pub issuer: String,

    /// HMAC algorithm name (HS256, HS384, HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,        // 15 minutes
            refresh_token_expiry: 2_592_000, // 30 days
            issuer: default_issuer(),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load from `JWT_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Reject configurations that would produce unusable or unsafe tokens
    ///
    /// The access lifetime must stay strictly below the refresh lifetime: access
    /// tokens are never checked against the whitelist, so their TTL bounds how
    /// long a revoked session keeps working.
    pub fn validate(&self) -> Result<(), String> {
        if self.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }
        if self.access_token_expiry <= 0 || self.refresh_token_expiry <= 0 {
            return Err("token lifetimes must be positive".to_string());
        }
        if self.access_token_expiry >= self.refresh_token_expiry {
            return Err(format!(
                "access token expiry ({}s) must be shorter than refresh token expiry ({}s)",
                self.access_token_expiry, self.refresh_token_expiry
            ));
        }
        Ok(())
    }
}

fn default_algorithm() -> String {
    String::from("HS512")
}

fn default_issuer() -> String {
    String::from("url-shortener")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 43_200 * 60);
        assert_eq!(config.algorithm, "HS512");
        assert_eq!(config.issuer, "url-shortener");
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1_209_600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let config = JwtConfig::new("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_access_longer_than_refresh() {
        let mut config = JwtConfig::new("secret");
        config.access_token_expiry = config.refresh_token_expiry;
        let err = config.validate().unwrap_err();
        assert!(err.contains("must be shorter"));
    }
}
