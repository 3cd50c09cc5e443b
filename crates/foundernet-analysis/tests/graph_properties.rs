//! Property tests over randomly generated founder populations.
//!
//! Founders draw companies, institutions, and employers from small pools so
//! that groups overlap heavily and duplicate listings are common.

use std::collections::HashSet;

use proptest::prelude::*;

use foundernet_analysis::NetworkAnalyzer;
use foundernet_analysis::metrics::community::greedy_modularity_communities;
use foundernet_core::{AnalysisConfig, Company, EntityStore, Founder};

const COMPANIES: &[&str] = &["x", "y", "z", "ghost"];
const INSTITUTIONS: &[&str] = &["IIT Delhi", " IIT Delhi", "BITS", "", "ISB"];
const EMPLOYERS: &[&str] = &["Acme", "Flipkart", "—", " ", "Google"];

fn arb_founder(id: usize) -> impl Strategy<Value = Founder> {
    (
        prop::collection::vec(prop::sample::select(COMPANIES), 0..3),
        prop::collection::vec(prop::sample::select(INSTITUTIONS), 0..3),
        prop::collection::vec(prop::sample::select(EMPLOYERS), 0..3),
    )
        .prop_map(move |(companies, institutions, employers)| {
            let mut founder = Founder::new(format!("f{id}"), format!("Founder {id}"));
            for c in companies {
                founder = founder.founded(c);
            }
            for i in institutions {
                founder = founder.studied_at(i);
            }
            for e in employers {
                founder = founder.worked_at(e);
            }
            founder
        })
}

fn arb_store() -> impl Strategy<Value = EntityStore> {
    (0usize..9)
        .prop_flat_map(|n| (0..n).map(arb_founder).collect::<Vec<_>>())
        .prop_map(|founders| {
            let companies = vec![
                Company::new("x", "Xylo"),
                Company::new("y", "Yak"),
                Company::new("z", "Zenith"),
            ];
            EntityStore::new(founders, companies).expect("generated ids are unique")
        })
}

fn analyzer(store: EntityStore) -> NetworkAnalyzer {
    NetworkAnalyzer::new(store, AnalysisConfig::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn no_self_loops_and_positive_weights(store in arb_store()) {
        let an = analyzer(store);
        let graph = &an.graph().graph;
        for edge in graph.raw_edges() {
            prop_assert_ne!(edge.source(), edge.target());
            prop_assert!(edge.weight.weight > 0.0);
        }
    }

    #[test]
    fn at_most_one_edge_per_pair(store in arb_store()) {
        let an = analyzer(store);
        let mut pairs = HashSet::new();
        for edge in an.graph().graph.raw_edges() {
            let (a, b) = (edge.source().index(), edge.target().index());
            prop_assert!(pairs.insert((a.min(b), a.max(b))), "parallel edge {a}-{b}");
        }
    }

    #[test]
    fn edge_weight_is_sum_of_contributions(store in arb_store()) {
        let an = analyzer(store);
        let fg = an.graph();
        for edge in fg.graph.raw_edges() {
            let a = &fg.graph[edge.source()].id;
            let b = &fg.graph[edge.target()].id;
            let total: f64 = fg
                .contributions
                .iter()
                .filter(|c| (&c.source_id == a && &c.target_id == b)
                    || (&c.source_id == b && &c.target_id == a))
                .map(|c| c.weight)
                .sum();
            prop_assert!((edge.weight.weight - total).abs() < 1e-9);
        }
    }

    #[test]
    fn hub_counts_are_bounded(store in arb_store(), top_n in 0usize..6) {
        let pairs: usize = store
            .founders()
            .map(|f| f.education.iter().filter(|e| !e.institution.trim().is_empty()).count())
            .sum();
        let an = analyzer(store);
        let hubs = an.education_hubs(top_n);
        prop_assert!(hubs.len() <= top_n);
        prop_assert!(hubs.windows(2).all(|w| w[0].founder_count >= w[1].founder_count));
        prop_assert!(hubs.iter().map(|h| h.founder_count).sum::<usize>() <= pairs);
    }

    #[test]
    fn clusters_respect_min_size(store in arb_store(), min_size in 1usize..5) {
        let an = analyzer(store);
        let clusters = an.detect_clusters(min_size);
        prop_assert!(clusters.iter().all(|c| c.size >= min_size));
        prop_assert!(clusters.windows(2).all(|w| w[0].size >= w[1].size));
        prop_assert!(clusters.iter().all(|c| c.dominant_context.len() <= 3));
    }

    #[test]
    fn communities_partition_every_founder(store in arb_store()) {
        let an = analyzer(store);
        let communities = greedy_modularity_communities(an.graph(), false);
        let mut seen: Vec<usize> = communities.iter().flatten().map(|idx| idx.index()).collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..an.graph().node_count()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn flows_have_at_least_two_founders(store in arb_store()) {
        let an = analyzer(store);
        let flows = an.founder_to_company_flow();
        prop_assert!(flows.iter().all(|f| f.count >= 2 && f.founders.len() == f.count));
        prop_assert!(flows.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn centrality_is_non_negative_and_sorted(store in arb_store()) {
        let an = analyzer(store);
        let ranked = an.centrality_rankings(usize::MAX);
        prop_assert!(ranked.iter().all(|r| r.centrality >= 0.0));
        prop_assert!(ranked.windows(2).all(|w| w[0].centrality >= w[1].centrality));
        if an.graph().edge_count() == 0 {
            prop_assert!(ranked.is_empty());
        }
    }

    #[test]
    fn insights_are_score_ordered(store in arb_store()) {
        let insights = analyzer(store).generate_insights();
        prop_assert!(insights.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn rebuilding_is_deterministic(store in arb_store()) {
        let first = analyzer(store.clone());
        let second = analyzer(store);
        prop_assert_eq!(&first.graph().content_hash, &second.graph().content_hash);
        prop_assert_eq!(first.detect_clusters(2), second.detect_clusters(2));
        prop_assert_eq!(first.centrality_rankings(10), second.centrality_rankings(10));
    }
}
