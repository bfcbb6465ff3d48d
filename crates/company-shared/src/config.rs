//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_HTTP_PORT, DEFAULT_LOCALE, DEFAULT_MAX_CONNECTIONS,
    SUPPORTED_LOCALES,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub i18n: I18nSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Mounts the `/messages` diagnostics routes.
    pub demo_endpoints: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct I18nSettings {
    pub default_locale: String,
    pub supported_locales: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("i18n.supported_locales")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    /// Builds a configuration from an inline TOML document layered over the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let supported: Vec<String> = SUPPORTED_LOCALES.iter().map(|l| l.to_string()).collect();

        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", DEFAULT_HTTP_PORT)?
            .set_default("app.name", "company-server")?
            .set_default("app.demo_endpoints", false)?
            .set_default("database.backend", "postgres")?
            .set_default("database.url", "postgres://localhost:5432/companies")?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", DEFAULT_ACQUIRE_TIMEOUT_SECS)?
            .set_default("database.run_migrations", false)?
            .set_default("i18n.default_locale", DEFAULT_LOCALE)?
            .set_default("i18n.supported_locales", supported)?
            .set_default("logging.format", "json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_sources() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert_eq!(config.i18n.default_locale, "ja");
        assert_eq!(config.i18n.supported_locales, vec!["ja", "en", "ko"]);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.directory.is_none());
        assert!(!config.app.demo_endpoints);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [app]
            port = 9090
            demo_endpoints = true

            [database]
            backend = "memory"

            [i18n]
            default_locale = "en"
            supported_locales = ["en", "ko"]

            [logging]
            format = "pretty"
            directory = "logs"
            "#,
        )
        .unwrap();

        assert_eq!(config.app.port, 9090);
        assert!(config.app.demo_endpoints);
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.i18n.supported_locales, vec!["en", "ko"]);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.directory.as_deref(), Some("logs"));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = AppConfig::from_toml_str("[database]\nbackend = \"mysql\"\n");
        assert!(result.is_err());
    }
}
