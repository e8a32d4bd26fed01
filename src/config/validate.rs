use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    let base_url = cfg.query_api.base_url.trim();
    if base_url.is_empty() {
        errors.push("query_api.base_url must not be empty".to_string());
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(format!(
            "query_api.base_url ({base_url}) must start with http:// or https://"
        ));
    }

    if cfg.query_api.timeout_secs == 0 {
        errors.push("query_api.timeout_secs must be > 0".to_string());
    }

    if cfg.stats.bytes_per_cell == 0 {
        errors.push("stats.bytes_per_cell must be > 0".to_string());
    }

    if cfg.sessions.max_sessions == 0 {
        errors.push("sessions.max_sessions must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{AppConfig, EnvConfig},
        stats::TableMatch,
    };

    use super::validate;

    #[test]
    fn defaults_are_valid() {
        validate(&AppConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn collects_every_error() {
        let mut cfg = AppConfig::default();
        cfg.general.host = " ".to_string();
        cfg.query_api.base_url = "ftp://example.com".to_string();
        cfg.sessions.max_sessions = 0;

        let err = validate(&cfg).expect_err("config should be rejected");
        let message = err.to_string();
        assert!(message.contains("general.host must not be empty"));
        assert!(message.contains("must start with http:// or https://"));
        assert!(message.contains("sessions.max_sessions must be > 0"));
    }

    #[test]
    fn overrides_reach_nested_sections() {
        let cfg = AppConfig::from_env_with(&[
            ("stats.table_match", "prefix"),
            ("stats.bytes_per_cell", "8"),
            ("query_api.base_url", "http://nlq.internal:5000"),
        ])
        .expect("config should load");

        assert_eq!(cfg.stats.table_match, TableMatch::Prefix);
        assert_eq!(cfg.stats.engine().bytes_per_cell(), 8);
        assert_eq!(cfg.query_api.base_url, "http://nlq.internal:5000");
    }
}
