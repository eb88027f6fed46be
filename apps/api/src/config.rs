use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::ml::ats::DEFAULT_ATS_SCALE;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset collaborators fall back to built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON vocabulary overriding the built-in tables.
    pub vocabulary_path: Option<PathBuf>,
    /// External resume parsing API. Unset → every resume parses to empty data.
    pub resume_parser_url: Option<String>,
    pub resume_parser_api_key: Option<String>,
    /// Naive Bayes role model artifact. Unset → catalog-based classifier.
    pub role_model_path: Option<PathBuf>,
    pub career_catalog_path: Option<PathBuf>,
    pub job_listings_path: Option<PathBuf>,
    pub ats_score_scale: f64,
    pub upstream_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            vocabulary_path: None,
            resume_parser_url: None,
            resume_parser_api_key: None,
            role_model_path: None,
            career_catalog_path: None,
            job_listings_path: None,
            ats_score_scale: DEFAULT_ATS_SCALE,
            upstream_timeout_secs: 30,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            vocabulary_path: optional_env("VOCABULARY_PATH").map(PathBuf::from),
            resume_parser_url: optional_env("RESUME_PARSER_URL"),
            resume_parser_api_key: optional_env("RESUME_PARSER_API_KEY"),
            role_model_path: optional_env("ROLE_MODEL_PATH").map(PathBuf::from),
            career_catalog_path: optional_env("CAREER_CATALOG_PATH").map(PathBuf::from),
            job_listings_path: optional_env("JOB_LISTINGS_PATH").map(PathBuf::from),
            ats_score_scale: parse_env("ATS_SCORE_SCALE", defaults.ats_score_scale)?,
            upstream_timeout_secs: parse_env(
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout_secs,
            )?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if !(self.ats_score_scale.is_finite() && self.ats_score_scale > 0.0) {
            anyhow::bail!(
                "ATS_SCORE_SCALE must be a positive number, got {}",
                self.ats_score_scale
            );
        }
        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be at least 1");
        }
        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be at least 1");
        }
        Ok(())
    }
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.upstream_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_upload_bytes, 10_485_760);
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        let config = Config {
            ats_score_scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            upstream_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_unset_uses_default() {
        assert_eq!(
            parse_env::<u16>("SKILLSCOPE_TEST_UNSET_PORT", 8080).unwrap(),
            8080
        );
    }
}
