//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Loads and provides access to engine configuration.
///
/// # File format
///
/// ```yaml
/// generation:
///   max_concurrency: 8
///   read_timeout_secs: 10
/// reconciliation:
///   auto_match_threshold: "0.01"
///   exact_epsilon: "0.01"
///   minor_variance_ratio: "0.01"
/// ```
///
/// Every field is optional; omitted fields take the documented defaults.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("pool size: {}", loader.config().generation.max_concurrency);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file and validates it.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file does not exist.
    /// - [`EngineError::ConfigParseError`] if the YAML cannot be parsed.
    /// - [`EngineError::InvalidConfig`] if a value is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: display.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&contents).map_err(|e| EngineError::ConfigParseError {
                path: display,
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if a value is out of range.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
