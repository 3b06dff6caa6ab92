//! Engine runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the engine. The
//! engine itself never reads environment variables, so evaluations stay deterministic across
//! threads and test harnesses.

use crate::constants::{DEFAULT_CURRENCY_MINOR_UNITS, MAX_CURRENCY_MINOR_UNITS};
use crate::{EngineError, EngineResult};

/// Engine configuration resolved at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    currency_minor_units: u32,
}

impl EngineConfig {
    /// Create a new `EngineConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `currency_minor_units` exceeds
    /// [`MAX_CURRENCY_MINOR_UNITS`].
    pub fn new(currency_minor_units: u32) -> EngineResult<Self> {
        if currency_minor_units > MAX_CURRENCY_MINOR_UNITS {
            return Err(EngineError::InvalidConfig(format!(
                "currency_minor_units must be at most {MAX_CURRENCY_MINOR_UNITS}, got {currency_minor_units}"
            )));
        }

        Ok(Self {
            currency_minor_units,
        })
    }

    /// Number of decimal places monetary results are rounded to.
    pub fn currency_minor_units(&self) -> u32 {
        self.currency_minor_units
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency_minor_units: DEFAULT_CURRENCY_MINOR_UNITS,
        }
    }
}

/// Parse the currency scale from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_CURRENCY_MINOR_UNITS`].
pub fn currency_minor_units_from_env_value(value: Option<String>) -> EngineResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(DEFAULT_CURRENCY_MINOR_UNITS);
    };

    let parsed = value.parse::<u32>().map_err(|_| {
        EngineError::InvalidConfig(format!(
            "currency minor units must be a non-negative integer, got '{value}'"
        ))
    })?;

    EngineConfig::new(parsed).map(|config| config.currency_minor_units())
}
