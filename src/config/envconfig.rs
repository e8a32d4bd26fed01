use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use config_rs::{Config, ConfigBuilder, builder::DefaultState};
use serde::de::DeserializeOwned;

/// Configuration read from `APP_*` environment variables, nested with `__`
/// (`APP_QUERY_API__BASE_URL` -> `query_api.base_url`).
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn load_dotenv() {
        // .env next to the manifest first, then the working directory
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn builder() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(
            config_rs::Environment::with_prefix(Self::PREFIX)
                .prefix_separator("_")
                .separator(Self::SEPARATOR)
                .try_parsing(true),
        )
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();
        Self::build(Self::builder())
    }

    /// Environment config with explicit dotted-key overrides on top; skips `.env`.
    fn from_env_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let mut builder = Self::builder();
        for (key, value) in overrides {
            builder = builder
                .set_override(*key, *value)
                .with_context(|| format!("invalid config override {key}"))?;
        }
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
