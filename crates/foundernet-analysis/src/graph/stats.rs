//! Basic graph statistics for the founder graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of founders.
//! - **edge_count**: Number of connected founder pairs.
//! - **contribution_count**: Number of rule applications behind those edges.
//! - **density**: `2E / (N(N-1))` for the undirected graph. A complete graph
//!   has density 1.0; an empty or single-node graph has density 0.0.
//! - **component_count**: Number of connected components. Isolated founders
//!   each count as one component.
//! - **isolated_node_count**: Founders with no relationship to anyone.
//! - **max_degree**: Most relationships held by a single founder.
//! - **total_weight**: Sum of accumulated edge weights.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::FounderGraph;

/// Summary statistics for a founder graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub contribution_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    pub total_weight: f64,
}

impl GraphStats {
    /// Compute statistics from a [`FounderGraph`].
    #[must_use]
    pub fn from_graph(fg: &FounderGraph) -> Self {
        let node_count = fg.node_count();
        let edge_count = fg.edge_count();

        let density = if node_count < 2 {
            0.0
        } else {
            (2 * edge_count) as f64 / (node_count * (node_count - 1)) as f64
        };

        let degrees: Vec<usize> = fg
            .graph
            .node_indices()
            .map(|idx| fg.graph.neighbors(idx).count())
            .collect();

        Self {
            node_count,
            edge_count,
            contribution_count: fg.contributions.len(),
            density,
            component_count: connected_components(&fg.graph),
            isolated_node_count: degrees.iter().filter(|&&d| d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            total_weight: fg.total_weight(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
