//! # Payroll Engine
//!
//! A payroll generation and payment reconciliation engine for
//! multi-tenant HR platforms.
//!
//! The engine turns monthly inputs (salary structures, attendance,
//! leave, one-off adjustments) into immutable payroll records through a
//! staged calculation pipeline, moves records through a strict status
//! state machine, and reconciles internal payment intents against
//! external settlement feeds with deterministic matching.
//!
//! ## Architecture
//!
//! - **models**: domain types (pay periods, salary structures,
//!   attendance, adjustments, payroll records, settlements,
//!   reconciliation artifacts)
//! - **calculation**: the pure pipeline stages (structure resolution,
//!   attendance aggregation, two-phase component calculation,
//!   adjustment application, record assembly)
//! - **reconciliation**: the payment matcher and discrepancy tracker
//! - **stores**: persistence traits plus an in-memory implementation
//! - **engine**: batch orchestration on a bounded worker pool
//! - **config**: tunables loaded from YAML
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use payroll_engine::config::EngineConfig;
//! use payroll_engine::engine::{PayrollEngine, StoreSet};
//! use payroll_engine::models::PayPeriod;
//! use payroll_engine::stores::memory::InMemoryStore;
//!
//! # async fn run() -> payroll_engine::error::EngineResult<()> {
//! let store = Arc::new(InMemoryStore::new());
//! let engine = PayrollEngine::new(StoreSet::from_single(store), EngineConfig::default());
//!
//! let period = PayPeriod::new(5, 2024)?;
//! let outcome = engine
//!     .generate_batch(&["emp_001".to_string()], period)
//!     .await;
//! println!("{} records created", outcome.succeeded.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod reconciliation;
pub mod stores;
