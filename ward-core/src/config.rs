use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "WARD_BASE_URL";
pub const ENV_PAGE_LIMIT: &str = "WARD_PAGE_LIMIT";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "WARD_SEARCH_DEBOUNCE_MS";

/// Client settings. The empty base URL keeps requests relative to the page
/// origin, which is what the browser build wants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WardConfig {
    pub base_url: String,
    /// Rows per roster page.
    pub page_limit: u32,
    /// Quiet period before a roster search is sent.
    pub search_debounce_ms: u64,
}

impl Default for WardConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_limit: 10,
            search_debounce_ms: 300,
        }
    }
}

impl WardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `WARD_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            cfg.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_PAGE_LIMIT) {
            cfg.page_limit = parse_number(ENV_PAGE_LIMIT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEARCH_DEBOUNCE_MS) {
            cfg.search_debounce_ms = parse_number(ENV_SEARCH_DEBOUNCE_MS, &raw)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}
