//! Configuration for the Bazaar API

use axum_helpers::JwtConfig;
use core_config::{ConfigError, FromEnv, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use database::redis::RedisConfig;

pub use core_config::Environment;

/// Media file serving configuration.
///
/// Image fields store paths relative to `root`; files are served under
/// `url_prefix`.
#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub root: String,
    pub url_prefix: String,
}

impl FromEnv for MediaConfig {
    /// Reads MEDIA_ROOT (default "media") and MEDIA_URL (default "/media").
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            root: env_or_default("MEDIA_ROOT", "media"),
            url_prefix: env_or_default("MEDIA_URL", "/media"),
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub media: MediaConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            media: MediaConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
