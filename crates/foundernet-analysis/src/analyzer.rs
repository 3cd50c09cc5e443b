//! One-stop facade over a single analysis run.
//!
//! A [`NetworkAnalyzer`] owns its entity store and the graph built from it.
//! Queries only read; [`NetworkAnalyzer::rebuild`] replaces the graph with a
//! freshly built one. Concurrent analyses (one per sector, say) each use
//! their own analyzer.

use foundernet_core::{AnalysisConfig, EntityStore};
use tracing::{info, instrument};

use crate::graph::{FounderGraph, GraphStats};
use crate::insight::{self, Insight, MetricResults};
use crate::metrics::betweenness::{self, CentralityRank};
use crate::metrics::community::{self, Cluster};
use crate::metrics::counts::{self, CityShare, EducationHub, EmployerPipeline};
use crate::metrics::flow::{self, TalentFlow};
use crate::report::NetworkReport;

/// An entity store, its founder graph, and the configuration used to build
/// and query it.
///
/// Construction builds the graph once; every query method reads it.
#[derive(Debug, Clone)]
pub struct NetworkAnalyzer {
    store: EntityStore,
    config: AnalysisConfig,
    graph: FounderGraph,
}

impl NetworkAnalyzer {
    /// Build the founder graph for `store` and wrap both for querying.
    #[must_use]
    #[instrument(skip_all)]
    pub fn new(store: EntityStore, config: AnalysisConfig) -> Self {
        let graph = FounderGraph::build(&store, &config.weights);
        Self {
            store,
            config,
            graph,
        }
    }

    /// Replace the graph with a fresh build, e.g. after changing weights.
    pub fn rebuild(&mut self, config: AnalysisConfig) {
        self.graph = FounderGraph::build(&self.store, &config.weights);
        self.config = config;
        info!(hash = %self.graph.content_hash, "founder graph rebuilt");
    }

    #[must_use]
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    #[must_use]
    pub const fn graph(&self) -> &FounderGraph {
        &self.graph
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    #[must_use]
    pub fn graph_stats(&self) -> GraphStats {
        GraphStats::from_graph(&self.graph)
    }

    #[must_use]
    pub fn education_hubs(&self, top_n: usize) -> Vec<EducationHub> {
        counts::education_hubs(&self.store, top_n)
    }

    #[must_use]
    pub fn employer_pipelines(&self, top_n: usize) -> Vec<EmployerPipeline> {
        counts::employer_pipelines(&self.store, top_n)
    }

    #[must_use]
    pub fn centrality_rankings(&self, top_n: usize) -> Vec<CentralityRank> {
        betweenness::centrality_rankings(&self.graph, top_n)
    }

    #[must_use]
    pub fn detect_clusters(&self, min_size: usize) -> Vec<Cluster> {
        community::detect_clusters(
            &self.graph,
            &self.store,
            min_size,
            self.config.clusters.weighted,
        )
    }

    #[must_use]
    pub fn founder_to_company_flow(&self) -> Vec<TalentFlow> {
        flow::founder_to_company_flow(&self.store)
    }

    #[must_use]
    pub fn geographic_distribution(&self) -> Vec<CityShare> {
        counts::geographic_distribution(&self.store)
    }

    /// Result sets sized for insight synthesis.
    #[must_use]
    pub fn metric_results(&self) -> MetricResults {
        let limits = &self.config.insights;
        MetricResults {
            education_hubs: self.education_hubs(limits.hub_top_n),
            employer_pipelines: self.employer_pipelines(limits.pipeline_top_n),
            centrality: self.centrality_rankings(limits.bridge_top_n),
            clusters: self.detect_clusters(limits.cluster_min_size),
            talent_flows: self.founder_to_company_flow(),
        }
    }

    /// Run every analysis and return the ranked insight feed.
    #[must_use]
    pub fn generate_insights(&self) -> Vec<Insight> {
        insight::synthesize(&self.metric_results(), &self.config.insights)
    }

    /// Assemble the full outbound report for this run.
    #[must_use]
    pub fn report(&self, sector_name: &str) -> NetworkReport {
        NetworkReport::from_analyzer(self, sector_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
