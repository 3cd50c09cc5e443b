//! Weighted betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a founder lies on shortest
//! paths between other pairs of founders. High-betweenness founders are
//! "connectors" bridging otherwise separate networks.
//!
//! # Edge Costs
//!
//! Edge weight is relationship *strength*, so stronger relationships must
//! be cheaper to traverse. The traversal cost of an edge is `1 / weight`:
//! two co-founders (weight 3.0) are closer than two alumni (weight 1.0).
//!
//! # Algorithm
//!
//! Brandes (2001) with Dijkstra in place of BFS:
//!
//! 1. For each source `s`, run Dijkstra to compute shortest-path costs,
//!    shortest-path counts `sigma`, and predecessor lists.
//! 2. Accumulate dependency scores in reverse settling order.
//! 3. Sum the dependency scores across all sources.
//!
//! Path costs are floating point, so two paths tie when their costs agree
//! within a relative tolerance of `1e-12`.
//!
//! Complexity: O(V·E + V²·log V).
//!
//! # Output
//!
//! Scores are **not** normalized. Because the graph is undirected, every
//! unordered pair is seen from both endpoints; the Brandes sum is halved so
//! each pair contributes at most 1.0 to any node.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::build::FounderGraph;

const PATH_TIE_TOLERANCE: f64 = 1e-12;

/// A founder and their betweenness score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRank {
    pub founder_id: String,
    pub name: String,
    pub centrality: f64,
}

/// Compute raw betweenness for every node, indexed by `NodeIndex::index()`.
///
/// Returns an empty vector for an empty graph. Isolated nodes and nodes on
/// no shortest path score 0.0.
#[must_use]
#[instrument(skip(fg), fields(nodes = fg.node_count(), edges = fg.edge_count()))]
pub fn betweenness_centrality(fg: &FounderGraph) -> Vec<f64> {
    let n = fg.node_count();
    if n == 0 {
        return Vec::new();
    }

    let adjacency: Vec<Vec<(usize, f64)>> = fg
        .adjacency()
        .into_iter()
        .map(|neighbors| {
            neighbors
                .into_iter()
                .map(|(w, weight)| (w, 1.0 / weight))
                .collect()
        })
        .collect();

    // Node-indexed betweenness accumulator.
    let mut cb = vec![0.0_f64; n];

    for s in 0..n {
        // Stack: nodes in settling order (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        // predecessors[w]: nodes immediately preceding w on shortest paths from s.
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        // sigma[t]: number of shortest paths from s to t.
        let mut sigma = vec![0.0_f64; n];
        sigma[s] = 1.0;
        let mut dist = vec![f64::INFINITY; n];
        dist[s] = 0.0;
        let mut settled = vec![false; n];

        let mut heap = BinaryHeap::new();
        heap.push(Frontier { cost: 0.0, node: s });

        while let Some(Frontier { cost, node: v }) = heap.pop() {
            if settled[v] || cost > dist[v] {
                continue;
            }
            settled[v] = true;
            stack.push(v);

            for &(w, edge_cost) in &adjacency[v] {
                if settled[w] {
                    continue;
                }
                let alt = dist[v] + edge_cost;
                if same_cost(alt, dist[w]) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                } else if alt < dist[w] {
                    dist[w] = alt;
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    heap.push(Frontier { cost: alt, node: w });
                }
            }
        }

        // Accumulate dependencies in reverse settling order.
        let mut delta = vec![0.0_f64; n];

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    // Undirected: each pair was counted from both endpoints.
    for score in &mut cb {
        *score /= 2.0;
    }

    debug!(max = cb.iter().copied().fold(0.0_f64, f64::max), "betweenness computed");
    cb
}

/// Rank founders by betweenness, highest first, keeping the first `top_n`.
///
/// Returns an empty list when the graph has no edges. Equal scores keep
/// node (store) order.
#[must_use]
pub fn centrality_rankings(fg: &FounderGraph, top_n: usize) -> Vec<CentralityRank> {
    if fg.edge_count() == 0 {
        return Vec::new();
    }

    let scores = betweenness_centrality(fg);
    let mut ranked: Vec<CentralityRank> = fg
        .graph
        .node_indices()
        .map(|idx| {
            let founder = &fg.graph[idx];
            CentralityRank {
                founder_id: founder.id.clone(),
                name: founder.name.clone(),
                centrality: scores[idx.index()],
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.centrality.total_cmp(&a.centrality));
    ranked.truncate(top_n);
    ranked
}

fn same_cost(a: f64, b: f64) -> bool {
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    (a - b).abs() <= PATH_TIE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Min-heap entry for Dijkstra. Ties on cost pop the lower node index first.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
