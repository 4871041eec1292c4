//! Pricing configuration.
//!
//! The volumetric divisor and bracket table look like constants but are
//! market conventions that differ per carrier (4000/5000/6000 divisors are
//! all in the wild), so both are data here, loadable from a JSON file and
//! defaulted to the values the platform ships with.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::info;

use crate::domain::BracketTable;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Divisor for volumetric weight, cm³ per kg.
    pub volumetric_divisor: f64,
    /// Published weight ceilings, ascending, in kg.
    pub brackets: BracketTable,
    /// Currency of all quoted prices.
    pub currency: String,
    /// Per-provider fetch budget; a slower carrier is skipped, not awaited.
    pub fetch_timeout_secs: u64,
    /// Cap on the number of options returned to display callers.
    pub max_options: Option<usize>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            volumetric_divisor: 5000.0,
            brackets: BracketTable::default(),
            currency: "USD".to_string(),
            fetch_timeout_secs: 8,
            max_options: None,
        }
    }
}

impl PricingConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        info!(path = %path.display(), "loaded pricing config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.volumetric_divisor.is_finite() || self.volumetric_divisor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "volumetric divisor must be positive, got {}",
                self.volumetric_divisor
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must be set".to_string()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
