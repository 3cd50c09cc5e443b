#![forbid(unsafe_code)]
//! foundernet-analysis library.
//!
//! Turns an [`EntityStore`](foundernet_core::EntityStore) into a weighted,
//! undirected founder relationship graph and answers analytical queries over
//! it: hub and pipeline counts, weighted betweenness, modularity clusters,
//! talent flows, and a single ranked insight feed.
//!
//! # Conventions
//!
//! - **Errors**: Metric queries are total and return plain values. Use
//!   `anyhow::Result` only at serialization boundaries.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod analyzer;
pub mod graph;
pub mod insight;
pub mod metrics;
pub mod report;

pub use analyzer::NetworkAnalyzer;
pub use graph::{FounderGraph, GraphStats, RelationshipKind};
pub use insight::{Insight, InsightCategory, MetricResults};
pub use report::NetworkReport;
