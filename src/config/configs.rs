use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::stats::{SchemaStatsEngine, TableMatch};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub query_api: QueryApiConfig,
    pub stats: StatsConfig,
    pub sessions: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl QueryApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for QueryApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_QUERY_API_URL.to_string(),
            timeout_secs: defaults::DEFAULT_QUERY_API_TIMEOUT_SECS as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    pub table_match: TableMatch,
    pub bytes_per_cell: u64,
}

impl StatsConfig {
    pub fn engine(&self) -> SchemaStatsEngine {
        SchemaStatsEngine::new(self.table_match, self.bytes_per_cell)
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            table_match: defaults::DEFAULT_TABLE_MATCH
                .parse()
                .unwrap_or(TableMatch::Exact),
            bytes_per_cell: defaults::DEFAULT_BYTES_PER_CELL as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: defaults::DEFAULT_MAX_SESSIONS as usize,
        }
    }
}
