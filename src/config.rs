//! # Configuration
//!
//! Everything the service needs from its environment, read once at startup.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `GEMINI_API_KEY` | yes | |
//! | `GEMINI_MODEL` | no | `gemini-1.5-flash` |
//! | `SPREADSHEET_ID` | yes | |
//! | `SHEET_RANGE` | no | `Sheet1!A:I` |
//! | `GOOGLE_APPLICATION_CREDENTIALS` | no | ambient Google credentials |
//! | `PORT` | no | `3000` |
//! | `EXTRACT_MAX_ATTEMPTS` | no | `3` |
//! | `EXTRACT_RETRY_DELAY_SECS` | no | `5` |

use crate::extractor::RetryPolicy;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_RANGE: &str = "Sheet1!A:I";
pub const DEFAULT_PORT: u16 = 3000;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub spreadsheet_id: String,
    pub sheet_range: String,
    pub credentials_path: Option<PathBuf>,
    pub port: u16,
    pub retry: RetryPolicy,
}

impl Config {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let defaults = RetryPolicy::default();
        let max_attempts = match get("EXTRACT_MAX_ATTEMPTS") {
            Some(raw) => parse::<u32>("EXTRACT_MAX_ATTEMPTS", &raw).and_then(|n| {
                if n == 0 {
                    Err(ConfigError::Invalid {
                        key: "EXTRACT_MAX_ATTEMPTS",
                        value: raw.clone(),
                    })
                } else {
                    Ok(n)
                }
            })?,
            None => defaults.max_attempts,
        };
        let delay = match get("EXTRACT_RETRY_DELAY_SECS") {
            Some(raw) => Duration::from_secs(parse("EXTRACT_RETRY_DELAY_SECS", &raw)?),
            None => defaults.delay,
        };

        Ok(Self {
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            spreadsheet_id: required("SPREADSHEET_ID")?,
            sheet_range: get("SHEET_RANGE").unwrap_or_else(|| DEFAULT_RANGE.to_string()),
            credentials_path: get("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from),
            port: match get("PORT") {
                Some(raw) => parse("PORT", &raw)?,
                None => DEFAULT_PORT,
            },
            retry: RetryPolicy {
                max_attempts,
                delay,
            },
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
