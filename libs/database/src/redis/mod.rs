pub mod config;
pub mod connector;

pub use config::RedisConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use redis::aio::ConnectionManager;
