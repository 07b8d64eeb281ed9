//! Configuration module for inkpost.

use serde::Deserialize;
use std::path::Path;

use crate::{BlogError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin without credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Which persistence layer backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Relational store (SQLite through sqlx).
    #[default]
    Sqlite,
    /// In-process document collections.
    Document,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Store backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Connection URL for the relational backend.
    #[serde(default = "default_db_url")]
    pub url: String,
}

fn default_db_url() -> String {
    "sqlite://data/inkpost.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: default_db_url(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// JWT secret key. Startup fails when empty.
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Reject tokens that no longer match the one stored on the user.
    #[serde(default)]
    pub strict_revocation: bool,
}

fn default_token_ttl() -> u64 {
    3600 // 1 hour
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
            strict_revocation: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/inkpost.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BlogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    ///
    /// A missing file is not an error: defaults are used and the environment
    /// still applies.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(BlogError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BlogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `INKPOST_JWT_SECRET` (or `JWT_SECRET`): JWT secret key
    /// - `PORT`: listen port
    /// - `DATABASE_URL`: relational store URL
    pub fn apply_env_overrides(&mut self) {
        let secret = non_empty_var("INKPOST_JWT_SECRET").or_else(|| non_empty_var("JWT_SECRET"));
        if let Some(secret) = secret {
            self.auth.jwt_secret = secret;
        }

        if let Some(port) = non_empty_var("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(url) = non_empty_var("DATABASE_URL") {
            self.database.url = url;
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the JWT secret is empty or the token TTL is zero.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(BlogError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via the INKPOST_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(BlogError::Config(
                "token_ttl_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.database.backend, StoreBackend::Sqlite);
        assert_eq!(config.database.url, "sqlite://data/inkpost.db");

        assert!(config.auth.jwt_secret.is_empty());
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert!(!config.auth.strict_revocation);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/inkpost.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]

[database]
backend = "document"
url = "sqlite://custom/blog.db"

[auth]
jwt_secret = "test-secret-key"
token_ttl_secs = 600
strict_revocation = true

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);

        assert_eq!(config.database.backend, StoreBackend::Document);
        assert_eq!(config.database.url, "sqlite://custom/blog.db");

        assert_eq!(config.auth.jwt_secret, "test-secret-key");
        assert_eq!(config.auth.token_ttl_secs, 600);
        assert!(config.auth.strict_revocation);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[auth]
jwt_secret = "partial"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.auth.jwt_secret, "partial");
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.backend, StoreBackend::Sqlite);
    }

    #[test]
    fn test_parse_unknown_backend() {
        let toml = r#"
[database]
backend = "mongodb"
"#;
        let result = Config::parse(toml);
        assert!(matches!(result, Err(BlogError::Config(_))));
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        if let Err(BlogError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(BlogError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9090").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
    }

    // Env vars are process-wide, so every override is checked in one test.
    #[test]
    fn test_apply_env_overrides() {
        let saved: Vec<(&str, Option<String>)> =
            ["INKPOST_JWT_SECRET", "JWT_SECRET", "PORT", "DATABASE_URL"]
                .into_iter()
                .map(|k| (k, std::env::var(k).ok()))
                .collect();

        std::env::remove_var("INKPOST_JWT_SECRET");
        std::env::set_var("JWT_SECRET", "fallback-secret");
        std::env::set_var("PORT", "7000");
        std::env::set_var("DATABASE_URL", "sqlite::memory:");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.auth.jwt_secret, "fallback-secret");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.url, "sqlite::memory:");

        std::env::set_var("INKPOST_JWT_SECRET", "primary-secret");
        std::env::set_var("PORT", "not-a-port");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.auth.jwt_secret, "primary-secret");
        assert_eq!(config.server.port, 5000);

        std::env::set_var("INKPOST_JWT_SECRET", "");
        std::env::remove_var("JWT_SECRET");
        let mut config = Config::default();
        config.auth.jwt_secret = "original-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.auth.jwt_secret, "original-secret");

        for (key, value) in saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_validate_without_secret() {
        let config = Config::default();

        let result = config.validate();
        if let Err(BlogError::Config(msg)) = result {
            assert!(msg.contains("jwt_secret"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_zero_ttl() {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config.auth.token_ttl_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_with_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();

        assert!(config.validate().is_ok());
    }
}
