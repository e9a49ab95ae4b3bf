//! Log output configuration for the server binary

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::environment::Environment;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Filter directive and format handed to `tracing-subscriber`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `snip_core=debug,info`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Human-readable debug output locally, JSON at info elsewhere
    pub fn for_environment(environment: Environment) -> Self {
        if environment.is_development() {
            Self {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            }
        } else {
            Self {
                level: "info".to_string(),
                format: LogFormat::Json,
            }
        }
    }

    /// Environment defaults with `LOG_LEVEL` and `LOG_FORMAT` applied on top
    pub fn from_env(environment: Environment) -> Self {
        Self::for_environment(environment).with_overrides(
            std::env::var("LOG_LEVEL").ok().as_deref(),
            std::env::var("LOG_FORMAT").ok().as_deref(),
        )
    }

    fn with_overrides(mut self, level: Option<&str>, format: Option<&str>) -> Self {
        if let Some(level) = level.map(str::trim).filter(|l| !l.is_empty()) {
            self.level = level.to_string();
        }
        if let Some(format) = format {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(message) => tracing::warn!(%message, "ignoring LOG_FORMAT"),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_environment() {
        let dev = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev.level, "debug");
        assert_eq!(dev.format, LogFormat::Pretty);

        let prod = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod.level, "info");
        assert_eq!(prod.format, LogFormat::Json);
        assert_eq!(LoggingConfig::for_environment(Environment::Staging), prod);
    }

    #[test]
    fn test_overrides() {
        let config = LoggingConfig::for_environment(Environment::Production)
            .with_overrides(Some("snip_core=trace,warn"), Some("Compact"));
        assert_eq!(config.level, "snip_core=trace,warn");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_blank_or_bad_overrides_keep_defaults() {
        let config = LoggingConfig::for_environment(Environment::Development)
            .with_overrides(Some("  "), Some("xml"));
        assert_eq!(config, LoggingConfig::for_environment(Environment::Development));
    }
}
