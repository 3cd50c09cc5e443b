#![forbid(unsafe_code)]
//! foundernet-core library.
//!
//! Entity records for companies and founders, the read-only
//! [`EntityStore`](store::EntityStore) that indexes them, and the
//! [`AnalysisConfig`](config::AnalysisConfig) consumed by the analysis engine.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` at I/O and parse boundaries; typed
//!   [`EntityError`](error::EntityError) for store validation.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod store;

pub use config::AnalysisConfig;
pub use error::EntityError;
pub use model::{Company, EducationRecord, Founder, WorkRecord};
pub use store::EntityStore;
