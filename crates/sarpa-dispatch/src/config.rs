//! Core configuration: resolver budget and matcher limit.
//!
//! Loaded from an optional TOML file; every field defaults when the file
//! or field is absent.
//!
//! ```toml
//! [resolver]
//! timeout_ms = 5000
//!
//! [matcher]
//! limit = 5
//! ```

use crate::matcher::MatchConfig;
use sarpa_geo::{DEFAULT_RESOLVE_TIMEOUT_MS, ResolverConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable settings for the whole core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub resolver: ResolverSection,
    pub matcher: MatcherSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSection {
    pub timeout_ms: u64,
}

impl Default for ResolverSection {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_RESOLVE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSection {
    pub limit: Option<usize>,
}

impl CoreConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(format!("{}: {e}", path.display()))),
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            timeout_ms: self.resolver.timeout_ms,
        }
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            limit: self.matcher.limit,
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = CoreConfig::default();
        assert_eq!(config.resolver.timeout_ms, DEFAULT_RESOLVE_TIMEOUT_MS);
        assert_eq!(config.matcher.limit, None);
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let config =
            CoreConfig::from_toml("[matcher]\nlimit = 5\n").expect("partial toml should parse");
        assert_eq!(config.matcher.limit, Some(5));
        assert_eq!(config.resolver.timeout_ms, DEFAULT_RESOLVE_TIMEOUT_MS);
        assert_eq!(config.match_config(), MatchConfig { limit: Some(5) });
    }

    #[test]
    fn full_toml_parses() {
        let config = CoreConfig::from_toml("[resolver]\ntimeout_ms = 2500\n[matcher]\nlimit = 3\n")
            .expect("full toml should parse");
        assert_eq!(config.resolver_config().timeout_ms, 2_500);
        assert_eq!(config.matcher.limit, Some(3));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = CoreConfig::load("/nonexistent/sarpa.toml")
            .expect("missing config file should default");
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = CoreConfig::from_toml("matcher = limit").expect_err("garbage must not parse");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
