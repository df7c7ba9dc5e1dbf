//! Optional TOML configuration.
//!
//! Every field has a default, so a missing file or an empty one yields a
//! working setup against the public endpoints:
//!
//! ```toml
//! [api]
//! followers_query_hash = "c76146de99bb02f6415203be841dd25a"
//!
//! [pagination]
//! page_size = 50
//! page_delay_ms = 300
//!
//! [logging]
//! level = "debug"
//! format = "compact"
//! log_file = "audit.log"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{consts, prelude::*, Error};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Endpoints and persisted query selectors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
    #[serde(default = "default_followers_query_hash")]
    pub followers_query_hash: String,
    #[serde(default = "default_followings_query_hash")]
    pub followings_query_hash: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_referer")]
    pub referer: String,
}

fn default_search_url() -> String {
    consts::SEARCH_URL.to_string()
}

fn default_graphql_url() -> String {
    consts::GRAPHQL_URL.to_string()
}

fn default_followers_query_hash() -> String {
    consts::FOLLOWERS_QUERY_HASH.to_string()
}

fn default_followings_query_hash() -> String {
    consts::FOLLOWINGS_QUERY_HASH.to_string()
}

fn default_user_agent() -> String {
    consts::DEFAULT_USER_AGENT.to_string()
}

fn default_referer() -> String {
    consts::DEFAULT_REFERER.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            graphql_url: default_graphql_url(),
            followers_query_hash: default_followers_query_hash(),
            followings_query_hash: default_followings_query_hash(),
            user_agent: default_user_agent(),
            referer: default_referer(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    /// Nodes requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Fixed pause between page requests, in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
}

fn default_page_size() -> u32 {
    consts::DEFAULT_PAGE_SIZE
}

fn default_page_delay_ms() -> u64 {
    consts::DEFAULT_PAGE_DELAY.as_millis() as u64
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_delay_ms: default_page_delay_ms(),
        }
    }
}

impl PaginationConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: pretty, json, compact
    #[serde(default)]
    pub format: LogFormat,
    /// Mirror every event as JSON into this file; stderr switches to JSON too
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(Error::InvalidConfig(format!(
                "unknown log format '{s}'. Use: pretty, json, compact"
            ))),
        }
    }
}

impl AuditConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| Error::io(path.display(), e))?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.pagination.page_size == 0 {
            return Err(Error::InvalidConfig(
                "pagination.page_size must be greater than zero".into(),
            ));
        }
        let required = [
            ("api.search_url", &self.api.search_url),
            ("api.graphql_url", &self.api.graphql_url),
            ("api.followers_query_hash", &self.api.followers_query_hash),
            ("api.followings_query_hash", &self.api.followings_query_hash),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AuditConfig::from_toml_str("").unwrap();
        assert_eq!(config.pagination.page_size, 50);
        assert_eq!(config.pagination.page_delay(), Duration::from_millis(300));
        assert_eq!(config.api.graphql_url, consts::GRAPHQL_URL);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config = AuditConfig::from_toml_str(
            r#"
            [pagination]
            page_size = 12

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.pagination.page_size, 12);
        assert_eq!(config.pagination.page_delay_ms, 300);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_log_file_optional() {
        let config = AuditConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging.log_file, None);

        let config = AuditConfig::from_toml_str(
            r#"
            [logging]
            level = "debug"
            log_file = "runs/audit.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.log_file.as_deref(), Some("runs/audit.log"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_zero_page_size_invalid() {
        let config = AuditConfig::from_toml_str("[pagination]\npage_size = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_delay_does_not_parse() {
        assert!(AuditConfig::from_toml_str("[pagination]\npage_delay_ms = -1\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.toml");
        std::fs::write(&path, "[api]\nfollowings_query_hash = \"abc\"\n").unwrap();

        let config = AuditConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.api.followings_query_hash, "abc");
        assert!(AuditConfig::load(None).is_ok());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
