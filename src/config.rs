//! Configuration module
//!
//! Loaded from a TOML file; every section has defaults so a missing file
//! still yields a runnable configuration. `JWT_SECRET` and `DATABASE_URL`
//! override the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::application::identity::{EmailUniqueness, DEFAULT_PAGE_SIZE};
use crate::infrastructure::crypto::jwt::{JwtConfig, DEFAULT_EXPIRATION_HOURS};
use crate::infrastructure::crypto::password::DEFAULT_COST;
use crate::infrastructure::DatabaseConfig;

/// `database.url` value selecting the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// sea-orm connection URL, or `memory`
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
        }
    }
}

impl DatabaseSettings {
    pub fn is_memory(&self) -> bool {
        self.url.eq_ignore_ascii_case(MEMORY_DATABASE_URL)
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: JwtConfig::default().secret,
            jwt_expiration_hours: DEFAULT_EXPIRATION_HOURS,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl SecurityConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            expiration_hours: self.jwt_expiration_hours,
            ..JwtConfig::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    /// An edit may keep the account's own email when true.
    pub exclude_self_on_update: bool,
    pub default_page_size: u64,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            exclude_self_on_update: true,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AccountsConfig {
    pub fn email_uniqueness(&self) -> EmailUniqueness {
        EmailUniqueness::from_exclude_self(self.exclude_self_on_update)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub accounts: AccountsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read `path` (defaults when it does not exist) and apply
    /// environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `JWT_SECRET` / `DATABASE_URL` from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(secret) = lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            self.security.jwt_secret = secret;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
            self.database.url = url;
        }
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "security.bcrypt_cost must be between 4 and 31".into(),
            ));
        }
        if self.accounts.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "accounts.default_page_size must be at least 1".into(),
            ));
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::Invalid("database.url is empty".into()));
        }
        Ok(())
    }
}

/// `~/.config/staff-accounts/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("staff-accounts")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.jwt_expiration_hours, 24);
        assert!(config.accounts.exclude_self_on_update);
        assert_eq!(config.accounts.default_page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sections_override_individually() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [database]
            url = "memory"

            [accounts]
            exclude_self_on_update = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.database.is_memory());
        assert_eq!(config.accounts.email_uniqueness(), EmailUniqueness::Collection);
    }

    #[test]
    fn environment_wins_over_file() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "JWT_SECRET" => Some("from-env".into()),
            "DATABASE_URL" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.security.jwt_secret, "from-env");
        assert_eq!(config.database.url, DatabaseConfig::default().url);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = AppConfig::load(Path::new("/nonexistent/staff-accounts.toml")).unwrap();
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.accounts.default_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = 1"),
            Err(ConfigError::Parse(_))
        ));
    }
}
