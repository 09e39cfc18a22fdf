//! Configuration type definitions.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Settings for the payroll generation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maximum number of employees processed concurrently. Bounds load on
    /// the shared stores behind the engine.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Per-employee timeout for the external read phase, in seconds.
    /// Expiry is a hard failure for that employee; there is no retry.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl GenerationConfig {
    /// Returns the read timeout as a [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

/// Settings for the reconciliation matcher.
///
/// All three thresholds default to `0.01`. `auto_match_threshold` and
/// `minor_variance_ratio` are fractions of the internal amount;
/// `exact_epsilon` is an absolute amount in currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Fuzzy matching acceptance threshold: an external row is a candidate
    /// when `|external - internal| / internal` is below this fraction.
    #[serde(default = "default_ratio")]
    pub auto_match_threshold: Decimal,
    /// Variances strictly below this absolute amount classify as exact.
    #[serde(default = "default_ratio")]
    pub exact_epsilon: Decimal,
    /// Variances below this fraction of the internal amount classify as
    /// minor; everything above is major.
    #[serde(default = "default_ratio")]
    pub minor_variance_ratio: Decimal,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            auto_match_threshold: default_ratio(),
            exact_epsilon: default_ratio(),
            minor_variance_ratio: default_ratio(),
        }
    }
}

/// Top-level engine configuration.
///
/// # Example
///
/// ```
/// use payroll_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.generation.max_concurrency, 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Payroll generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Reconciliation matcher settings.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

impl EngineConfig {
    /// Validates all configured values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when a threshold is outside
    /// its allowed range or the worker pool would be empty.
    pub fn validate(&self) -> EngineResult<()> {
        if self.generation.max_concurrency == 0 {
            return Err(EngineError::InvalidConfig {
                field: "generation.max_concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.generation.read_timeout_secs == 0 {
            return Err(EngineError::InvalidConfig {
                field: "generation.read_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let fractions = [
            (
                "reconciliation.auto_match_threshold",
                self.reconciliation.auto_match_threshold,
            ),
            (
                "reconciliation.minor_variance_ratio",
                self.reconciliation.minor_variance_ratio,
            ),
        ];
        for (field, value) in fractions {
            if value <= Decimal::ZERO || value >= Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must be a fraction between 0 and 1, got {value}"),
                });
            }
        }
        if self.reconciliation.exact_epsilon < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "reconciliation.exact_epsilon".to_string(),
                message: format!(
                    "must not be negative, got {}",
                    self.reconciliation.exact_epsilon
                ),
            });
        }
        Ok(())
    }
}

fn default_max_concurrency() -> usize {
    8
}

fn default_read_timeout_secs() -> u64 {
    10
}

fn default_ratio() -> Decimal {
    // 0.01
    Decimal::new(1, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// CFG-001: defaults are usable without a file
    #[test]
    fn test_defaults_validate() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reconciliation.auto_match_threshold, dec("0.01"));
        assert_eq!(config.reconciliation.exact_epsilon, dec("0.01"));
        assert_eq!(config.generation.read_timeout_secs, 10);
    }

    /// CFG-002: zero concurrency is rejected
    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = EngineConfig::default();
        config.generation.max_concurrency = 0;
        match config.validate().unwrap_err() {
            EngineError::InvalidConfig { field, .. } => {
                assert_eq!(field, "generation.max_concurrency");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    /// CFG-003: threshold of 1 or more is rejected
    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = EngineConfig::default();
        config.reconciliation.auto_match_threshold = Decimal::ONE;
        assert!(config.validate().is_err());

        config.reconciliation.auto_match_threshold = dec("0.99");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        let mut config = EngineConfig::default();
        config.reconciliation.exact_epsilon = dec("-0.01");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "reconciliation:\n  auto_match_threshold: \"0.02\"\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.reconciliation.auto_match_threshold, dec("0.02"));
        assert_eq!(config.reconciliation.exact_epsilon, dec("0.01"));
        assert_eq!(config.generation.max_concurrency, 8);
    }
}
