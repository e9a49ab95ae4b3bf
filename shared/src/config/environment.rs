//! Deployment environment

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Where the server runs; drives cookie security and logging defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Accepted spellings for each environment
const ALIASES: &[(&str, Environment)] = &[
    ("development", Environment::Development),
    ("dev", Environment::Development),
    ("local", Environment::Development),
    ("staging", Environment::Staging),
    ("stage", Environment::Staging),
    ("test", Environment::Staging),
    ("production", Environment::Production),
    ("prod", Environment::Production),
];

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Reads `ENVIRONMENT`, then `ENV`
    ///
    /// Unset or unrecognized values mean development.
    pub fn from_env() -> Self {
        let value = env::var("ENVIRONMENT").or_else(|_| env::var("ENV")).ok();
        Self::from_value(value.as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        match value.map(str::parse::<Self>) {
            Some(Ok(environment)) => environment,
            Some(Err(unknown)) => {
                tracing::warn!(%unknown, "unrecognized environment, using development");
                Self::default()
            }
            None => Self::default(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
            .map(|(_, environment)| *environment)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!("Prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" local ".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!("qa".parse::<Environment>(), Err("qa".to_string()));
    }

    #[test]
    fn test_missing_or_unknown_value_is_development() {
        assert_eq!(Environment::from_value(None), Environment::Development);
        assert_eq!(Environment::from_value(Some("qa")), Environment::Development);
        assert_eq!(Environment::from_value(Some("production")), Environment::Production);
    }

    #[test]
    fn test_display_parses_back() {
        for environment in [
            Environment::Development,
            Environment::Staging,
            Environment::Production,
        ] {
            assert_eq!(environment.to_string().parse::<Environment>(), Ok(environment));
        }
    }
}
