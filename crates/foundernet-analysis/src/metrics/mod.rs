//! Metric engine over the founder graph and entity store.
//!
//! # Overview
//!
//! Each metric answers a different question about the founder network:
//!
//! - **Counts** (`counts`): Which institutions and employers produced the
//!   most founders? Where are the companies located?
//! - **Betweenness centrality** (`betweenness`): Which founders bridge
//!   otherwise separate parts of the network?
//! - **Communities** (`community`): Which groups of founders are densely
//!   interconnected, and what do they have in common?
//! - **Talent flow** (`flow`): Which employers repeatedly send several
//!   founders to the same new company?
//!
//! All metrics are pure functions of their inputs. None of them fail: an
//! empty store or an edgeless graph produces empty results.
//!
//! # Usage
//!
//! ```rust,ignore
//! use foundernet_analysis::graph::FounderGraph;
//! use foundernet_analysis::metrics::{betweenness, community, counts, flow};
//!
//! let fg = FounderGraph::build(&store, &config.weights);
//!
//! let hubs = counts::education_hubs(&store, 10);
//! let bridges = betweenness::centrality_rankings(&fg, 20);
//! let clusters = community::detect_clusters(&fg, &store, 3, false);
//! let flows = flow::founder_to_company_flow(&store);
//! ```

pub mod betweenness;
pub mod community;
pub mod counts;
pub mod flow;

use indexmap::IndexMap;

/// Sort `(key, count)` pairs by count descending, keeping first-encountered
/// order among equal counts, and keep the first `top_n`.
pub(crate) fn rank_by_count<K>(counts: IndexMap<K, usize>, top_n: usize) -> Vec<(K, usize)> {
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_by_count_is_stable_on_ties() {
        let mut counts = IndexMap::new();
        counts.insert("first", 2);
        counts.insert("second", 5);
        counts.insert("third", 2);
        counts.insert("fourth", 1);

        let ranked = rank_by_count(counts, 3);
        assert_eq!(ranked, vec![("second", 5), ("first", 2), ("third", 2)]);
    }

    #[test]
    fn rank_by_count_zero_top_n() {
        let mut counts = IndexMap::new();
        counts.insert("only", 1);
        assert!(rank_by_count(counts, 0).is_empty());
    }
}
