use std::path::PathBuf;
use thiserror::Error;

use crate::record::{RecordOptions, DEFAULT_SOURCE_URL_TEMPLATE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// URL prefix the galaxy name is appended to
    pub source_url_template: String,
    pub cache: CacheConfig,
    /// User-Agent sent with catalog requests
    pub user_agent: String,
}

#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Directory holding `{name}_hyperleda_http.html` files
    pub dir: Option<PathBuf>,
    /// Download pages that are not cached yet
    pub enabled: bool,
    /// Re-download pages even when cached
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url_template: DEFAULT_SOURCE_URL_TEMPLATE.to_string(),
            cache: CacheConfig::default(),
            user_agent: concat!("hyperleda/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let source_url_template = lookup("HYPERLEDA_URL").unwrap_or(defaults.source_url_template);

        let dir = lookup("HYPERLEDA_CACHE_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let enabled = lookup("HYPERLEDA_CACHE").is_some_and(|v| parse_flag(&v));
        let force = lookup("HYPERLEDA_FORCE_CACHE").is_some_and(|v| parse_flag(&v));

        let user_agent = lookup("HYPERLEDA_USER_AGENT").unwrap_or(defaults.user_agent);

        let config = Config {
            source_url_template,
            cache: CacheConfig {
                dir,
                enabled,
                force,
            },
            user_agent,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.source_url_template.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "HYPERLEDA_URL cannot be empty".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "HYPERLEDA_USER_AGENT cannot be empty".to_string(),
            ));
        }

        if (self.cache.enabled || self.cache.force) && self.cache.dir.is_none() {
            tracing::warn!(
                "HYPERLEDA_CACHE or HYPERLEDA_FORCE_CACHE is set without HYPERLEDA_CACHE_DIR. \
                 Pages will be read remotely and not cached."
            );
        }

        Ok(())
    }

    /// Options for building a record with this configuration.
    pub fn record_options(&self) -> RecordOptions {
        RecordOptions {
            source_url_template: Some(self.source_url_template.clone()),
            cache: self.cache.enabled,
            cache_dir: self.cache.dir.clone(),
            force_cache: self.cache.force,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.source_url_template, DEFAULT_SOURCE_URL_TEMPLATE);
        assert!(config.cache.dir.is_none());
        assert!(!config.cache.enabled);
        assert!(!config.cache.force);
    }

    #[test]
    fn test_cache_settings() {
        let config = load(&[
            ("HYPERLEDA_CACHE_DIR", "/var/cache/leda"),
            ("HYPERLEDA_CACHE", "true"),
            ("HYPERLEDA_FORCE_CACHE", "0"),
        ])
        .unwrap();

        let options = config.record_options();
        assert_eq!(options.cache_dir, Some(PathBuf::from("/var/cache/leda")));
        assert!(options.cache);
        assert!(!options.force_cache);
        assert_eq!(
            options.source_url_template.as_deref(),
            Some(DEFAULT_SOURCE_URL_TEMPLATE)
        );
    }

    #[test]
    fn test_blank_cache_dir_is_unset() {
        let config = load(&[("HYPERLEDA_CACHE_DIR", "  ")]).unwrap();
        assert!(config.cache.dir.is_none());
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = load(&[("HYPERLEDA_URL", "")]);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
