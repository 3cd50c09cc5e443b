//! Graph construction from the entity store.
//!
//! # Overview
//!
//! This module groups founders by a shared key and connects every pair in
//! each group. Three rules run in a fixed order:
//!
//! 1. **Co-founder**: founders listing the same company id
//!    (context = company display name, or the id when unknown).
//! 2. **Same institution**: founders listing the same trimmed institution.
//! 3. **Same employer**: founders listing the same trimmed employer,
//!    excluding the unknown placeholder.
//!
//! ## One Edge Per Pair
//!
//! petgraph allows parallel edges; we never create them. When a later rule
//! (or a second shared institution) connects a pair that already has an
//! edge, its weight is added to the existing edge. The edge keeps the kind
//! and context of its *first* contribution as a display hint. The complete
//! provenance is in [`FounderGraph::contributions`].
//!
//! ## Determinism
//!
//! Nodes are added in store order, groups are visited in first-encountered
//! key order, and members within a group in store order. Building the same
//! store twice yields identical node indices, edges, and content hash.

use std::collections::HashMap;
use std::fmt;

use foundernet_core::config::EdgeWeights;
use foundernet_core::normalize::{employer_key, institution_key};
use foundernet_core::{EntityStore, Founder};
use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

// ---------------------------------------------------------------------------
// Edge payloads
// ---------------------------------------------------------------------------

/// The rule that produced an edge contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    CoFounder,
    SameInstitution,
    SameEmployer,
}

impl RelationshipKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoFounder => "co_founder",
            Self::SameInstitution => "same_institution",
            Self::SameEmployer => "same_employer",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a graph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    /// Sum of all contributions for this founder pair. Always `> 0`.
    pub weight: f64,
    /// Kind of the first contribution.
    pub kind: RelationshipKind,
    /// Context of the first contribution (company, institution, or employer).
    pub context: String,
}

/// One application of a relationship rule to a founder pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeContribution {
    pub source_id: String,
    pub target_id: String,
    pub kind: RelationshipKind,
    pub weight: f64,
    pub context: String,
}

// ---------------------------------------------------------------------------
// FounderGraph
// ---------------------------------------------------------------------------

/// An undirected, weighted founder relationship graph.
///
/// Node payloads are clones of the founder records, kept for reporting.
/// Algorithms only look at node indices and edge weights.
#[derive(Debug, Clone)]
pub struct FounderGraph {
    /// Undirected graph: nodes = founders, edges = accumulated relationships.
    pub graph: UnGraph<Founder, EdgeData>,
    /// Mapping from founder ID to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// Every rule application in the order it was applied.
    pub contributions: Vec<EdgeContribution>,
    /// BLAKE3 content hash of the contribution list.
    pub content_hash: String,
}

impl FounderGraph {
    /// Build a fresh graph from `store` using `weights` for the three rules.
    ///
    /// Never fails: dangling company ids become literal context labels, and
    /// a rule whose configured weight is not a positive finite number is
    /// skipped with a warning.
    #[must_use]
    #[instrument(skip_all, fields(founders = store.founder_count()))]
    pub fn build(store: &EntityStore, weights: &EdgeWeights) -> Self {
        let mut graph = UnGraph::<Founder, EdgeData>::with_capacity(store.founder_count(), 0);
        let mut node_map = HashMap::with_capacity(store.founder_count());

        for founder in store.founders() {
            let idx = graph.add_node(founder.clone());
            node_map.insert(founder.id.clone(), idx);
        }

        let mut builder = Builder {
            graph,
            node_map,
            edge_map: HashMap::new(),
            contributions: Vec::new(),
        };

        // 1. Co-founder edges.
        if let Some(weight) = usable_weight(RelationshipKind::CoFounder, weights.co_founder) {
            let groups = group_founders(store, |f| {
                f.companies
                    .iter()
                    .map(|c| c.trim())
                    .filter(|c| !c.is_empty())
                    .collect()
            });
            for (company_id, members) in &groups {
                let context = store.company_label(company_id);
                builder.connect_all(members, RelationshipKind::CoFounder, weight, context);
            }
        }

        // 2. Same-institution edges.
        if let Some(weight) =
            usable_weight(RelationshipKind::SameInstitution, weights.same_institution)
        {
            let groups = group_founders(store, |f| {
                f.education
                    .iter()
                    .filter_map(|e| institution_key(&e.institution))
                    .collect()
            });
            for (institution, members) in &groups {
                builder.connect_all(members, RelationshipKind::SameInstitution, weight, institution);
            }
        }

        // 3. Same-employer edges.
        if let Some(weight) = usable_weight(RelationshipKind::SameEmployer, weights.same_employer) {
            let groups = group_founders(store, |f| {
                f.work_history
                    .iter()
                    .filter_map(|w| employer_key(&w.employer))
                    .collect()
            });
            for (employer, members) in &groups {
                builder.connect_all(members, RelationshipKind::SameEmployer, weight, employer);
            }
        }

        let content_hash = compute_contribution_hash(&builder.contributions);

        info!(
            nodes = builder.graph.node_count(),
            edges = builder.graph.edge_count(),
            contributions = builder.contributions.len(),
            "founder graph built"
        );

        Self {
            graph: builder.graph,
            node_map: builder.node_map,
            contributions: builder.contributions,
            content_hash,
        }
    }

    /// Return the number of nodes (founders) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (connected founder pairs) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a founder ID.
    #[must_use]
    pub fn node_index(&self, founder_id: &str) -> Option<NodeIndex> {
        self.node_map.get(founder_id).copied()
    }

    /// Return the founder record stored on a node.
    #[must_use]
    pub fn founder(&self, idx: NodeIndex) -> Option<&Founder> {
        self.graph.node_weight(idx)
    }

    /// Return the edge joining two founders, in either order.
    #[must_use]
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&EdgeData> {
        let ia = self.node_index(a)?;
        let ib = self.node_index(b)?;
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge)
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.graph.edge_weights().map(|e| e.weight).sum()
    }

    /// Weighted adjacency lists indexed by `NodeIndex::index()`.
    ///
    /// Each undirected edge appears in both endpoints' lists. Neighbors are
    /// listed in edge insertion order.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.raw_edges() {
            let (a, b) = (edge.source().index(), edge.target().index());
            adjacency[a].push((b, edge.weight.weight));
            adjacency[b].push((a, edge.weight.weight));
        }
        adjacency
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct Builder {
    graph: UnGraph<Founder, EdgeData>,
    node_map: HashMap<String, NodeIndex>,
    /// Existing edge per `(min, max)` node pair, for O(1) top-ups.
    edge_map: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    contributions: Vec<EdgeContribution>,
}

impl Builder {
    /// Connect every unordered pair of `members`.
    fn connect_all(
        &mut self,
        members: &[&str],
        kind: RelationshipKind,
        weight: f64,
        context: &str,
    ) {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                self.connect(a, b, kind, weight, context);
            }
        }
    }

    fn connect(&mut self, a: &str, b: &str, kind: RelationshipKind, weight: f64, context: &str) {
        if a == b {
            return;
        }
        let (Some(&ia), Some(&ib)) = (self.node_map.get(a), self.node_map.get(b)) else {
            return;
        };

        let key = (ia.min(ib), ia.max(ib));
        match self.edge_map.get(&key) {
            Some(&edge) => self.top_up(edge, weight),
            None => {
                let edge = self.graph.add_edge(
                    ia,
                    ib,
                    EdgeData {
                        weight,
                        kind,
                        context: context.to_string(),
                    },
                );
                self.edge_map.insert(key, edge);
            }
        }

        self.contributions.push(EdgeContribution {
            source_id: a.to_string(),
            target_id: b.to_string(),
            kind,
            weight,
            context: context.to_string(),
        });
    }

    fn top_up(&mut self, edge: EdgeIndex, weight: f64) {
        if let Some(data) = self.graph.edge_weight_mut(edge) {
            data.weight += weight;
        }
    }
}

/// Group founder ids by the keys `keys_of` extracts, in first-encountered
/// key order. A founder listing the same key twice appears once.
fn group_founders<'s, F>(store: &'s EntityStore, keys_of: F) -> IndexMap<&'s str, Vec<&'s str>>
where
    F: Fn(&'s Founder) -> Vec<&'s str>,
{
    let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for founder in store.founders() {
        for key in keys_of(founder) {
            let members = groups.entry(key).or_default();
            // Founders are visited one at a time, so a repeat is always last.
            if members.last() != Some(&founder.id.as_str()) {
                members.push(founder.id.as_str());
            }
        }
    }
    groups
}

fn usable_weight(kind: RelationshipKind, weight: f64) -> Option<f64> {
    if weight.is_finite() && weight > 0.0 {
        Some(weight)
    } else {
        warn!(%kind, weight, "skipping relationship rule with non-positive weight");
        None
    }
}

/// Compute a BLAKE3 hash of the contribution list for cache invalidation.
fn compute_contribution_hash(contributions: &[EdgeContribution]) -> String {
    let mut hasher = blake3::Hasher::new();
    for c in contributions {
        hasher.update(c.source_id.as_bytes());
        hasher.update(b"\x00");
        hasher.update(c.target_id.as_bytes());
        hasher.update(b"\x00");
        hasher.update(c.kind.as_str().as_bytes());
        hasher.update(b"\x00");
        hasher.update(&c.weight.to_bits().to_le_bytes());
        hasher.update(c.context.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
