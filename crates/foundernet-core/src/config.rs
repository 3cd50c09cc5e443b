use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// All tunables of one analysis run.
///
/// Every field has a default reproducing the standard weights and signal
/// gates, so an empty TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub weights: EdgeWeights,
    #[serde(default)]
    pub insights: InsightConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub clusters: ClusterConfig,
}

/// Weight contributed by each relationship rule to a founder pair's edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeWeights {
    #[serde(default = "default_co_founder_weight")]
    pub co_founder: f64,
    #[serde(default = "default_same_institution_weight")]
    pub same_institution: f64,
    #[serde(default = "default_same_employer_weight")]
    pub same_employer: f64,
}

impl Default for EdgeWeights {
    fn default() -> Self {
        Self {
            co_founder: default_co_founder_weight(),
            same_institution: default_same_institution_weight(),
            same_employer: default_same_employer_weight(),
        }
    }
}

/// Gates and per-category limits used when turning metrics into insights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    #[serde(default = "default_ten")]
    pub hub_top_n: usize,
    #[serde(default = "default_three")]
    pub hub_min_founders: usize,
    #[serde(default = "default_ten")]
    pub pipeline_top_n: usize,
    #[serde(default = "default_three")]
    pub pipeline_min_founders: usize,
    #[serde(default = "default_bridge_top_n")]
    pub bridge_top_n: usize,
    #[serde(default = "default_bridge_min_centrality")]
    pub bridge_min_centrality: f64,
    #[serde(default = "default_three")]
    pub cluster_min_size: usize,
    #[serde(default = "default_ten")]
    pub flow_top_n: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            hub_top_n: default_ten(),
            hub_min_founders: default_three(),
            pipeline_top_n: default_ten(),
            pipeline_min_founders: default_three(),
            bridge_top_n: default_bridge_top_n(),
            bridge_min_centrality: default_bridge_min_centrality(),
            cluster_min_size: default_three(),
            flow_top_n: default_ten(),
        }
    }
}

/// Section sizes of a full network report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_fifteen")]
    pub hub_top_n: usize,
    #[serde(default = "default_fifteen")]
    pub pipeline_top_n: usize,
    #[serde(default = "default_twenty")]
    pub centrality_top_n: usize,
    #[serde(default = "default_three")]
    pub cluster_min_size: usize,
    #[serde(default = "default_fifteen")]
    pub flow_top_n: usize,
    #[serde(default = "default_twenty")]
    pub insight_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            hub_top_n: default_fifteen(),
            pipeline_top_n: default_fifteen(),
            centrality_top_n: default_twenty(),
            cluster_min_size: default_three(),
            flow_top_n: default_fifteen(),
            insight_limit: default_twenty(),
        }
    }
}

/// Community detection options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClusterConfig {
    /// Use accumulated edge weights in the modularity objective. When
    /// `false` every edge counts as 1.
    #[serde(default)]
    pub weighted: bool,
}

const fn default_co_founder_weight() -> f64 {
    3.0
}

const fn default_same_institution_weight() -> f64 {
    1.0
}

const fn default_same_employer_weight() -> f64 {
    1.5
}

const fn default_three() -> usize {
    3
}

const fn default_bridge_top_n() -> usize {
    5
}

const fn default_ten() -> usize {
    10
}

const fn default_fifteen() -> usize {
    15
}

const fn default_twenty() -> usize {
    20
}

const fn default_bridge_min_centrality() -> f64 {
    0.01
}

/// Parse an [`AnalysisConfig`] from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML for this schema.
pub fn parse_config(content: &str) -> Result<AnalysisConfig> {
    toml::from_str::<AnalysisConfig>(content).context("Failed to parse analysis config")
}

/// Load an [`AnalysisConfig`] from `path`, or the defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
#[instrument]
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        debug!("no config file, using defaults");
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
