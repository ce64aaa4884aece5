use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Process configuration loaded from environment variables (and `.env`).
/// Only numeric values can fail; everything else has a default or is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub companies_config: PathBuf,
    pub keywords_config: PathBuf,
    pub data_dir: PathBuf,
    pub report_dir: PathBuf,
    pub log_dir: PathBuf,
    pub http_timeout: Duration,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub ai_top_n: usize,
    pub github_token: Option<String>,
    pub github_repository: Option<String>,
    pub github_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            companies_config: or("COMPANIES_CONFIG", "config/companies.yaml").into(),
            keywords_config: or("KEYWORDS_CONFIG", "config/keywords.yaml").into(),
            data_dir: or("DATA_DIR", "data").into(),
            report_dir: or("REPORT_DIR", "report").into(),
            log_dir: or("LOG_DIR", "logs").into(),
            http_timeout: Duration::from_secs(parse_var(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                30,
            )?),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            openai_base_url: or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            ai_top_n: parse_var("AI_TOP_N", get("AI_TOP_N"), 5)?,
            github_token: get("GITHUB_TOKEN"),
            github_repository: get("GITHUB_REPOSITORY"),
            github_api_url: or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            port: parse_var("PORT", get("PORT"), 8080)?,
            rust_log: or("RUST_LOG", "info"),
        })
    }
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.companies_config, PathBuf::from("config/companies.yaml"));
        assert_eq!(config.keywords_config, PathBuf::from("config/keywords.yaml"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.report_dir, PathBuf::from("report"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.ai_top_n, 5);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("GITHUB_TOKEN", "  "),
            ("AI_TOP_N", "3"),
            ("HTTP_TIMEOUT_SECS", " 10 "),
            ("REPORT_DIR", "out/reports"),
            ("LOG_DIR", "/var/log/jobscout"),
        ])
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.github_token, None);
        assert_eq!(config.ai_top_n, 3);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.report_dir, PathBuf::from("out/reports"));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/jobscout"));
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(config_from(&[("AI_TOP_N", "-1")]).is_err());
    }
}
