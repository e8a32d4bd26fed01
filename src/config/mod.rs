pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::{
    AppConfig, GeneralConfig, LoggingConfig, QueryApiConfig, SessionConfig, StatsConfig,
};
pub use envconfig::EnvConfig;
