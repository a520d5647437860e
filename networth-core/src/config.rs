//! TOML configuration: rate provider settings and default goal inputs.
//!
//! ```toml
//! [rates]
//! url = "https://www.bcb.gov.br/api/servico/sitebcb/historicotaxasjuros"
//! timeout_secs = 30
//! max_retries = 2
//! cache_ttl_hours = 24
//!
//! [goal]
//! fixed_costs = 4000.0
//! net_salary = 9000.0
//! ```
//!
//! Every field is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rates: RatesConfig,
    pub goal: GoalDefaults,
}

/// Rate provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub cache_ttl_hours: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            url: crate::data::bcb::DEFAULT_URL.to_string(),
            timeout_secs: 30,
            max_retries: 2,
            base_delay_ms: 500,
            cache_ttl_hours: 24,
        }
    }
}

impl RatesConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(60 * 60))
    }
}

/// Defaults for the goal screen's numeric inputs (the start date always comes from the caller).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalDefaults {
    pub fixed_costs: f64,
    pub gross_salary: f64,
    pub net_salary: f64,
    pub annual_rate: Option<f64>,
    pub annual_goal: Option<f64>,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if given and present, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            Some(p) => {
                tracing::debug!(path = %p.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
