//! Outbound snapshot of one analysis run.
//!
//! [`NetworkReport`] is the structured record a rendering layer consumes.
//! It is plain serializable data; writing it anywhere is the caller's job.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::instrument;

use crate::analyzer::NetworkAnalyzer;
use crate::graph::GraphStats;
use crate::insight::Insight;
use crate::metrics::betweenness::CentralityRank;
use crate::metrics::community::Cluster;
use crate::metrics::counts::{CityShare, EducationHub, EmployerPipeline};
use crate::metrics::flow::TalentFlow;

const EMPTY_FIELD: &str = "—";

/// One row of the founder matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FounderProfile {
    pub name: String,
    /// Founded company labels, comma separated.
    pub company: String,
    /// Education summaries, comma separated, or the placeholder when empty.
    pub education: String,
    /// Employer names, comma separated, or the placeholder when empty.
    pub work: String,
    pub tags: Vec<String>,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub sector_name: String,
    pub total_companies: usize,
    pub total_founders: usize,
    pub total_edges: usize,
    pub num_clusters: usize,
    pub graph_stats: GraphStats,
    pub content_hash: String,
    pub education_hubs: Vec<EducationHub>,
    pub employer_pipelines: Vec<EmployerPipeline>,
    pub centrality: Vec<CentralityRank>,
    pub clusters: Vec<Cluster>,
    pub talent_flows: Vec<TalentFlow>,
    pub geographic_distribution: Vec<CityShare>,
    pub founders: Vec<FounderProfile>,
    pub insights: Vec<Insight>,
}

impl NetworkReport {
    /// Run every query at report sizes and collect the results.
    #[must_use]
    #[instrument(skip(analyzer))]
    pub fn from_analyzer(analyzer: &NetworkAnalyzer, sector_name: &str) -> Self {
        let sizes = analyzer.config().report;
        let store = analyzer.store();

        let clusters = analyzer.detect_clusters(sizes.cluster_min_size);
        let mut talent_flows = analyzer.founder_to_company_flow();
        talent_flows.truncate(sizes.flow_top_n);
        let mut insights = analyzer.generate_insights();
        insights.truncate(sizes.insight_limit);

        let founders = store
            .founders()
            .map(|f| FounderProfile {
                name: f.name.clone(),
                company: f
                    .companies
                    .iter()
                    .map(|c| c.trim())
                    .filter(|c| !c.is_empty())
                    .map(|c| store.company_label(c))
                    .collect::<Vec<_>>()
                    .join(", "),
                education: join_or_placeholder(f.education.iter().map(|e| e.summary())),
                work: join_or_placeholder(f.work_history.iter().map(|w| w.employer.clone())),
                tags: f.tags.clone(),
                verified: f.verified,
            })
            .collect();

        Self {
            sector_name: sector_name.to_string(),
            total_companies: store.company_count(),
            total_founders: store.founder_count(),
            total_edges: analyzer.graph().edge_count(),
            num_clusters: clusters.len(),
            graph_stats: analyzer.graph_stats(),
            content_hash: analyzer.graph().content_hash.clone(),
            education_hubs: analyzer.education_hubs(sizes.hub_top_n),
            employer_pipelines: analyzer.employer_pipelines(sizes.pipeline_top_n),
            centrality: analyzer.centrality_rankings(sizes.centrality_top_n),
            clusters,
            talent_flows,
            geographic_distribution: analyzer.geographic_distribution(),
            founders,
            insights,
        }
    }

    /// Pretty-printed JSON rendering of the report.
    ///
    /// # Errors
    ///
    /// Returns an error if `serde_json` rejects the report. Every field is
    /// plain data (non-finite floats are written as `null`), so this is not
    /// expected in practice.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .with_context(|| format!("serialize network report for {}", self.sector_name))
    }
}

fn join_or_placeholder(parts: impl Iterator<Item = String>) -> String {
    let joined = parts.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        EMPTY_FIELD.to_string()
    } else {
        joined
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use foundernet_core::{AnalysisConfig, Company, EntityStore, Founder};

    fn analyzer() -> NetworkAnalyzer {
        let store = EntityStore::new(
            vec![
                Founder::new("d", "Deepa")
                    .worked_at("Acme")
                    .founded("zenith")
                    .studied_at("IIT Delhi")
                    .verified(true),
                Founder::new("e", "Eshan").worked_at("Acme").founded("zenith"),
                Founder::new("f", "Farah").with_tag("angel"),
            ],
            vec![Company::new("zenith", "Zenith").with_city("Pune")],
        )
        .expect("store");
        NetworkAnalyzer::new(store, AnalysisConfig::default())
    }

    #[test]
    fn report_totals_and_sections() {
        let report = analyzer().report("Fintech");
        assert_eq!(report.sector_name, "Fintech");
        assert_eq!(report.total_companies, 1);
        assert_eq!(report.total_founders, 3);
        assert_eq!(report.total_edges, 1);
        assert_eq!(report.num_clusters, 0);
        assert_eq!(report.talent_flows.len(), 1);
        assert_eq!(report.geographic_distribution[0].city, "Pune");
        assert!(report.content_hash.starts_with("blake3:"));
    }

    #[test]
    fn founder_matrix_uses_labels_and_placeholders() {
        let report = analyzer().report("Fintech");
        let deepa = &report.founders[0];
        assert_eq!(deepa.company, "Zenith");
        assert_eq!(deepa.education, "IIT Delhi");
        assert_eq!(deepa.work, "Acme");
        assert!(deepa.verified);

        let farah = &report.founders[2];
        assert_eq!(farah.company, "");
        assert_eq!(farah.education, "—");
        assert_eq!(farah.work, "—");
        assert_eq!(farah.tags, vec!["angel"]);
    }

    #[test]
    fn founder_matrix_trims_company_ids() {
        let store = EntityStore::new(
            vec![Founder::new("a", "Anil").founded(" zenith ").founded("  ")],
            vec![Company::new("zenith", "Zenith")],
        )
        .expect("store");
        let report = NetworkAnalyzer::new(store, AnalysisConfig::default()).report("Fintech");
        assert_eq!(report.founders[0].company, "Zenith");
    }

    #[test]
    fn non_finite_scores_serialize_as_null() {
        let mut report = analyzer().report("Fintech");
        report.insights[0].score = f64::NAN;
        let json = report.to_json_pretty().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert!(value["insights"][0]["score"].is_null());
    }

    #[test]
    fn insight_limit_truncates() {
        let mut config = AnalysisConfig::default();
        config.report.insight_limit = 0;
        let an = NetworkAnalyzer::new(analyzer().store().clone(), config);
        assert!(an.report("Fintech").insights.is_empty());
    }

    #[test]
    fn json_uses_snake_case_categories() {
        let json = analyzer().report("Fintech").to_json_pretty().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["insights"][0]["category"], "talent_flow");
        assert_eq!(value["talent_flows"][0]["founders"][1], "Eshan");
    }
}
