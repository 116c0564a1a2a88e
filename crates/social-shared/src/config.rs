//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_WRITE_TIMEOUT_MS, DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_LIFETIME_DAYS,
    DEFAULT_SWEEP_INTERVAL_SECS,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub cors: CorsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub lifetime_days: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub sweep_interval_secs: u64,
    pub cache_write_timeout_ms: u64,
}

impl SessionSettings {
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.lifetime_days)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn cache_write_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_write_timeout_ms)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            lifetime_days: DEFAULT_SESSION_LIFETIME_DAYS,
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            cookie_secure: true,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            cache_write_timeout_ms: DEFAULT_CACHE_WRITE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?.build()?.try_deserialize()
    }

    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let session = SessionSettings::default();
        Ok(Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "social-server")?
            .set_default("database.url", "postgres://localhost/social_network")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("session.lifetime_days", session.lifetime_days)?
            .set_default("session.cookie_name", session.cookie_name)?
            .set_default("session.cookie_secure", session.cookie_secure)?
            .set_default("session.sweep_interval_secs", session.sweep_interval_secs)?
            .set_default("session.cache_write_timeout_ms", session.cache_write_timeout_ms)?
            .set_default("cors.allowed_origin", "http://localhost:8081")?
            .set_default("log.level", "info")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.env, "test");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.session.lifetime_days, 30);
        assert_eq!(config.session.cookie_name, "session_token");
        assert_eq!(config.session.lifetime(), chrono::Duration::days(30));
        assert!(config.log.directory.is_none());
    }
}
