//! Ranked insight feed.
//!
//! # Overview
//!
//! Metric results live on very different scales: founder counts, raw
//! betweenness sums, cluster sizes. The synthesizer turns each result that
//! clears its category's signal gate into an [`Insight`] with a category
//! specific score, then merges all categories into one ordering.
//!
//! | Category            | Gate                        | Score                 |
//! |---------------------|-----------------------------|-----------------------|
//! | education hub       | `founder_count >= 3`        | `founder_count`       |
//! | employer pipeline   | `founder_count >= 3`        | `founder_count * 1.5` |
//! | bridge founder      | top 5, `centrality > 0.01`  | `centrality * 100`    |
//! | cluster             | already size-filtered       | `size * 2`            |
//! | talent flow         | top 10                      | `count * 2.5`         |
//!
//! Scores only interleave categories into a presentable feed; they are not
//! comparable in any absolute sense.

pub mod synthesize;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::betweenness::CentralityRank;
use crate::metrics::community::Cluster;
use crate::metrics::counts::{EducationHub, EmployerPipeline};
use crate::metrics::flow::TalentFlow;

pub use synthesize::synthesize;

/// The kind of finding an insight reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    EducationHub,
    EmployerPipeline,
    BridgeFounder,
    Cluster,
    TalentFlow,
}

impl InsightCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EducationHub => "education_hub",
            Self::EmployerPipeline => "employer_pipeline",
            Self::BridgeFounder => "bridge_founder",
            Self::Cluster => "cluster",
            Self::TalentFlow => "talent_flow",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single human-readable finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub title: String,
    pub detail: String,
    pub score: f64,
    /// Names of the institutions, employers, or founders involved.
    pub entities: Vec<String>,
}

/// Every metric result set the synthesizer consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricResults {
    pub education_hubs: Vec<EducationHub>,
    pub employer_pipelines: Vec<EmployerPipeline>,
    pub centrality: Vec<CentralityRank>,
    pub clusters: Vec<Cluster>,
    pub talent_flows: Vec<TalentFlow>,
}
