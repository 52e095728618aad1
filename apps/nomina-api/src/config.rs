//! API configuration module.
//!
//! Configuration is layered with the `config` crate:
//!
//! ```text
//! built-in defaults  ──►  ./nomina.toml (optional)  ──►  environment
//!                                                        HTTP_HOST, HTTP_PORT,
//!                                                        DATABASE_PATH, ...
//! ```
//!
//! Later sources win. Environment variable names are the upper-case form of
//! the field names (`JWT_EXPIRY_SECS` → `jwt_expiry_secs`).

use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

/// Signing secret used when none is configured in a debug build.
const DEV_JWT_SECRET: &str = "nomina-dev-secret-do-not-use-in-production";

/// Minimum secret length accepted outside debug builds (HS256 key size).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind.
    pub http_host: String,

    /// HTTP port.
    pub http_port: u16,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// Connection pool size.
    pub database_max_connections: u32,

    /// HS256 signing secret.
    pub jwt_secret: String,

    /// Token lifetime in seconds (default: 2 hours).
    pub jwt_expiry_secs: i64,

    /// Allowed CORS origin; `*` or unset allows any.
    pub cors_allow_origin: Option<String>,
}

impl ApiConfig {
    /// Load configuration from defaults, `nomina.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("nomina").required(false))
            .add_source(Environment::default().try_parsing(true));

        Self::from_builder(builder)
    }

    /// Load configuration from a TOML document layered over the defaults.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let default_secret = if cfg!(debug_assertions) {
            DEV_JWT_SECRET
        } else {
            ""
        };

        let config: ApiConfig = builder
            .set_default("http_host", "0.0.0.0")?
            .set_default("http_port", 4000)?
            .set_default("database_path", "./data/nomina.db")?
            .set_default("database_max_connections", 5)?
            .set_default("jwt_secret", default_secret)?
            .set_default("jwt_expiry_secs", 7200)?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check the values that can't be expressed in the types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }

        if !cfg!(debug_assertions) && self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::InvalidValue(format!(
                "JWT_SECRET must be at least {} bytes",
                MIN_JWT_SECRET_LEN
            )));
        }

        if self.jwt_expiry_secs <= 0 {
            return Err(ConfigError::InvalidValue(
                "JWT_EXPIRY_SECS must be positive".to_string(),
            ));
        }

        if self.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// `host:port` to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_toml("").unwrap();
        assert_eq!(config.http_port, 4000);
        assert_eq!(config.jwt_expiry_secs, 7200);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn test_toml_overrides() {
        let config = ApiConfig::from_toml(
            r#"
            http_port = 8080
            database_path = "/var/lib/nomina/nomina.db"
            jwt_secret = "0123456789abcdef0123456789abcdef"
            jwt_expiry_secs = 600
            cors_allow_origin = "http://localhost:3000"
            "#,
        )
        .unwrap();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.jwt_expiry_secs, 600);
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/nomina/nomina.db")
        );
        assert_eq!(
            config.cors_allow_origin.as_deref(),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = ApiConfig::from_toml(r#"jwt_secret = """#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn test_invalid_expiry_rejected() {
        let err = ApiConfig::from_toml("jwt_expiry_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
