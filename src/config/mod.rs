//! Configuration for the payroll engine.
//!
//! This module provides the engine's tunable settings (worker pool size,
//! read timeouts, reconciliation thresholds) with sensible defaults and an
//! optional YAML file loader.
//!
//! # Example
//!
//! ```
//! use payroll_engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, GenerationConfig, ReconciliationConfig};
