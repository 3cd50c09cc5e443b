//! Founder relationship graph.
//!
//! # Overview
//!
//! This module derives an undirected, weighted petgraph graph from the
//! entity store. Every founder is a node; an edge joins two founders who
//! co-founded a company, studied at the same institution, or worked at the
//! same employer. The graph feeds every centrality and community metric.
//!
//! ## Pipeline
//!
//! ```text
//! EntityStore (founders + companies)
//!        ↓  build::FounderGraph::build()
//! FounderGraph (UnGraph, one edge per founder pair, weights summed)
//!   └─ contributions: every rule application, in order
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, component count, isolated founders, …)
//! ```
//!
//! ## Cache Invalidation
//!
//! [`FounderGraph::content_hash`] is a BLAKE3 hash of the contribution list.
//! Compare it against a stored value to detect when results need recomputing.

pub mod build;
pub mod stats;

pub use build::{EdgeContribution, EdgeData, FounderGraph, RelationshipKind};
pub use stats::GraphStats;
