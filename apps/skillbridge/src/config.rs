use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::matching::scorer::ScoringConfig;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Absent → text generation disabled, fallback insights only.
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub llm_max_tokens: u32,
    /// JSON vocabulary replacing the built-in tables.
    pub vocabulary_path: Option<PathBuf>,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8000).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(
                parse_env("LLM_TIMEOUT_SECS", 30)
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS", 300)
                .context("LLM_MAX_TOKENS must be a positive integer")?,
            vocabulary_path: optional_env("SKILL_VOCABULARY_PATH").map(PathBuf::from),
            scoring: ScoringConfig::default(),
        })
    }
}

/// Set and non-blank, trimmed.
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
            .with_context(|| format!("Invalid value for '{key}': {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("SKILLBRIDGE_TEST_UNSET_PORT", 8000).unwrap();
        assert_eq!(value, 8000);
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("SKILLBRIDGE_TEST_TIMEOUT", " 12 ");
        let value: u64 = parse_env("SKILLBRIDGE_TEST_TIMEOUT", 30).unwrap();
        assert_eq!(value, 12);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SKILLBRIDGE_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("SKILLBRIDGE_TEST_BAD_PORT", 8000).unwrap_err();
        assert!(err.to_string().contains("SKILLBRIDGE_TEST_BAD_PORT"));
    }

    #[test]
    fn test_blank_optional_env_is_none() {
        std::env::set_var("SKILLBRIDGE_TEST_BLANK_KEY", "   ");
        assert!(optional_env("SKILLBRIDGE_TEST_BLANK_KEY").is_none());
    }
}
