use foundernet_core::config::InsightConfig;
use tracing::{debug, instrument};

use super::{Insight, InsightCategory, MetricResults};

const PIPELINE_SCORE_FACTOR: f64 = 1.5;
const BRIDGE_SCORE_FACTOR: f64 = 100.0;
const CLUSTER_SCORE_FACTOR: f64 = 2.0;
const FLOW_SCORE_FACTOR: f64 = 2.5;

/// Turn metric results into one ranked insight feed.
///
/// Insights are generated per category in a fixed order (education hubs,
/// employer pipelines, bridge founders, clusters, talent flows), then
/// stably sorted by score descending, so equal scores keep that order.
#[must_use]
#[instrument(skip_all)]
pub fn synthesize(results: &MetricResults, config: &InsightConfig) -> Vec<Insight> {
    let mut insights = Vec::new();

    for hub in results.education_hubs.iter().take(config.hub_top_n) {
        if hub.founder_count >= config.hub_min_founders {
            insights.push(Insight {
                category: InsightCategory::EducationHub,
                title: format!("{} Founder Factory", hub.institution),
                detail: format!(
                    "{} produced {} founders in this sector.",
                    hub.institution, hub.founder_count
                ),
                score: hub.founder_count as f64,
                entities: vec![hub.institution.clone()],
            });
        }
    }

    for pipe in results.employer_pipelines.iter().take(config.pipeline_top_n) {
        if pipe.founder_count >= config.pipeline_min_founders {
            insights.push(Insight {
                category: InsightCategory::EmployerPipeline,
                title: format!("{} Alumni Mafia", pipe.employer),
                detail: format!("{} spawned {} founders.", pipe.employer, pipe.founder_count),
                score: pipe.founder_count as f64 * PIPELINE_SCORE_FACTOR,
                entities: vec![pipe.employer.clone()],
            });
        }
    }

    for bridge in results.centrality.iter().take(config.bridge_top_n) {
        if bridge.centrality > config.bridge_min_centrality {
            insights.push(Insight {
                category: InsightCategory::BridgeFounder,
                title: format!("{} — Network Connector", bridge.name),
                detail: format!(
                    "{} has betweenness centrality {:.4}, indicating they bridge multiple founder networks.",
                    bridge.name, bridge.centrality
                ),
                score: bridge.centrality * BRIDGE_SCORE_FACTOR,
                entities: vec![bridge.name.clone()],
            });
        }
    }

    for cluster in &results.clusters {
        if cluster.size < config.cluster_min_size {
            continue;
        }
        let top_context = cluster
            .dominant_context
            .first()
            .map_or("unknown", |c| c.entity.as_str());
        insights.push(Insight {
            category: InsightCategory::Cluster,
            title: format!("{top_context} Cluster ({} founders)", cluster.size),
            detail: format!(
                "Tight cluster of {} founders dominated by {top_context} connections.",
                cluster.size
            ),
            score: cluster.size as f64 * CLUSTER_SCORE_FACTOR,
            entities: cluster.members.clone(),
        });
    }

    for flow in results.talent_flows.iter().take(config.flow_top_n) {
        insights.push(Insight {
            category: InsightCategory::TalentFlow,
            title: format!("{} → {}", flow.from_employer, flow.to_company),
            detail: format!(
                "{} founders moved from {} to found {}: {}.",
                flow.count,
                flow.from_employer,
                flow.to_company,
                flow.founders.join(", ")
            ),
            score: flow.count as f64 * FLOW_SCORE_FACTOR,
            entities: flow.founders.clone(),
        });
    }

    // `sort_by` is stable: equal scores keep generation order.
    insights.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(count = insights.len(), "insights synthesized");
    insights
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::betweenness::CentralityRank;
    use crate::metrics::community::{Cluster, ContextCount};
    use crate::metrics::counts::{EducationHub, EmployerPipeline};
    use crate::metrics::flow::TalentFlow;

    fn hub(name: &str, count: usize) -> EducationHub {
        EducationHub {
            institution: name.into(),
            founder_count: count,
        }
    }

    fn pipeline(name: &str, count: usize) -> EmployerPipeline {
        EmployerPipeline {
            employer: name.into(),
            founder_count: count,
        }
    }

    fn bridge(name: &str, centrality: f64) -> CentralityRank {
        CentralityRank {
            founder_id: name.to_lowercase(),
            name: name.into(),
            centrality,
        }
    }

    fn flow(from: &str, to: &str, founders: &[&str]) -> TalentFlow {
        TalentFlow {
            from_employer: from.into(),
            to_company: to.into(),
            founders: founders.iter().map(|s| (*s).to_string()).collect(),
            count: founders.len(),
        }
    }

    fn assert_approx_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-10,
            "actual ({actual}) != expected ({expected})"
        );
    }

    #[test]
    fn empty_results_produce_no_insights() {
        assert!(synthesize(&MetricResults::default(), &InsightConfig::default()).is_empty());
    }

    #[test]
    fn hub_gate_requires_three_founders() {
        let results = MetricResults {
            education_hubs: vec![hub("IIT Delhi", 3), hub("NIT Trichy", 2)],
            ..MetricResults::default()
        };
        let insights = synthesize(&results, &InsightConfig::default());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::EducationHub);
        assert_eq!(insights[0].title, "IIT Delhi Founder Factory");
        assert_eq!(
            insights[0].detail,
            "IIT Delhi produced 3 founders in this sector."
        );
        assert_approx_eq(insights[0].score, 3.0);
        assert_eq!(insights[0].entities, vec!["IIT Delhi"]);
    }

    #[test]
    fn scores_follow_category_formulas() {
        let results = MetricResults {
            education_hubs: vec![hub("IIT Bombay", 4)],
            employer_pipelines: vec![pipeline("Flipkart", 4)],
            centrality: vec![bridge("Kunal", 0.25)],
            clusters: vec![Cluster {
                cluster_id: 0,
                size: 5,
                member_ids: vec![],
                members: vec!["A".into(), "B".into()],
                dominant_context: vec![ContextCount {
                    entity: "IIT Bombay".into(),
                    count: 4,
                }],
            }],
            talent_flows: vec![flow("Google", "PhonePe", &["X", "Y", "Z"])],
        };
        let insights = synthesize(&results, &InsightConfig::default());
        let score_of = |cat: InsightCategory| {
            insights
                .iter()
                .find(|i| i.category == cat)
                .map(|i| i.score)
                .expect("category present")
        };
        assert_approx_eq(score_of(InsightCategory::EducationHub), 4.0);
        assert_approx_eq(score_of(InsightCategory::EmployerPipeline), 6.0);
        assert_approx_eq(score_of(InsightCategory::BridgeFounder), 25.0);
        assert_approx_eq(score_of(InsightCategory::Cluster), 10.0);
        assert_approx_eq(score_of(InsightCategory::TalentFlow), 7.5);

        let order: Vec<InsightCategory> = insights.iter().map(|i| i.category).collect();
        assert_eq!(
            order,
            vec![
                InsightCategory::BridgeFounder,
                InsightCategory::Cluster,
                InsightCategory::TalentFlow,
                InsightCategory::EmployerPipeline,
                InsightCategory::EducationHub,
            ]
        );
    }

    #[test]
    fn equal_scores_keep_generation_order() {
        // Hub 6 → 6.0, pipeline 4 → 6.0, cluster 3 → 6.0.
        let results = MetricResults {
            education_hubs: vec![hub("ISB", 6)],
            employer_pipelines: vec![pipeline("Ola", 4)],
            clusters: vec![Cluster {
                cluster_id: 0,
                size: 3,
                member_ids: vec![],
                members: vec![],
                dominant_context: vec![],
            }],
            ..MetricResults::default()
        };
        let insights = synthesize(&results, &InsightConfig::default());
        let order: Vec<InsightCategory> = insights.iter().map(|i| i.category).collect();
        assert_eq!(
            order,
            vec![
                InsightCategory::EducationHub,
                InsightCategory::EmployerPipeline,
                InsightCategory::Cluster,
            ]
        );
        assert_eq!(insights[2].title, "unknown Cluster (3 founders)");
    }

    #[test]
    fn bridge_gate_and_top_five_limit() {
        let results = MetricResults {
            centrality: vec![
                bridge("A", 9.0),
                bridge("B", 8.0),
                bridge("C", 7.0),
                bridge("D", 6.0),
                bridge("E", 5.0),
                bridge("F", 4.0),
            ],
            ..MetricResults::default()
        };
        let insights = synthesize(&results, &InsightConfig::default());
        assert_eq!(insights.len(), 5);
        assert_eq!(insights[0].title, "A — Network Connector");
        assert!(insights[0].detail.contains("9.0000"));

        let quiet = MetricResults {
            centrality: vec![bridge("Q", 0.01)],
            ..MetricResults::default()
        };
        assert!(synthesize(&quiet, &InsightConfig::default()).is_empty());
    }

    #[test]
    fn talent_flow_limited_to_top_ten() {
        let flows: Vec<TalentFlow> = (0..12)
            .map(|i| flow(&format!("E{i}"), "Co", &["a", "b"]))
            .collect();
        let results = MetricResults {
            talent_flows: flows,
            ..MetricResults::default()
        };
        let insights = synthesize(&results, &InsightConfig::default());
        assert_eq!(insights.len(), 10);
        assert_eq!(insights[0].title, "E0 → Co");
        assert_eq!(insights[0].detail, "2 founders moved from E0 to found Co: a, b.");
        assert_eq!(insights[0].entities, vec!["a", "b"]);
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&InsightCategory::BridgeFounder).expect("json");
        assert_eq!(json, "\"bridge_founder\"");
        assert_eq!(InsightCategory::TalentFlow.to_string(), "talent_flow");
    }
}
