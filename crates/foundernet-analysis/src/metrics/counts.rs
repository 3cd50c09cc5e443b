//! Counting metrics computed straight from the entity store.
//!
//! These do not look at graph edges. They live in the metric engine because
//! their results feed the same insight ranking as the graph metrics.

use std::collections::HashSet;

use foundernet_core::normalize::{employer_key, institution_key};
use foundernet_core::{EntityStore, Founder};
use indexmap::IndexMap;
use serde::Serialize;

use super::rank_by_count;

/// An institution and how many founders list it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationHub {
    pub institution: String,
    pub founder_count: usize,
}

/// A prior employer and how many founders list it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerPipeline {
    pub employer: String,
    pub founder_count: usize,
}

/// Share of companies located in one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityShare {
    pub city: String,
    pub count: usize,
    /// Percentage of all companies, rounded to one decimal.
    pub pct: f64,
}

/// Rank institutions by the number of founders listing them.
///
/// A founder listing the same institution twice counts once. Ties keep
/// first-encountered order.
#[must_use]
pub fn education_hubs(store: &EntityStore, top_n: usize) -> Vec<EducationHub> {
    let counts = count_founders_per_key(store, |f| {
        f.education
            .iter()
            .filter_map(|e| institution_key(&e.institution))
            .collect()
    });

    rank_by_count(counts, top_n)
        .into_iter()
        .map(|(institution, founder_count)| EducationHub {
            institution: institution.to_string(),
            founder_count,
        })
        .collect()
}

/// Rank prior employers by the number of founders listing them.
///
/// The unknown-employer placeholder and blank names are ignored.
#[must_use]
pub fn employer_pipelines(store: &EntityStore, top_n: usize) -> Vec<EmployerPipeline> {
    let counts = count_founders_per_key(store, |f| {
        f.work_history
            .iter()
            .filter_map(|w| employer_key(&w.employer))
            .collect()
    });

    rank_by_count(counts, top_n)
        .into_iter()
        .map(|(employer, founder_count)| EmployerPipeline {
            employer: employer.to_string(),
            founder_count,
        })
        .collect()
}

/// City-level distribution of companies, largest first.
///
/// Companies without a city (or with a blank one) are grouped under
/// `"Unknown"`.
#[must_use]
pub fn geographic_distribution(store: &EntityStore) -> Vec<CityShare> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for company in store.companies() {
        let city = company
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Unknown");
        *counts.entry(city).or_insert(0) += 1;
    }

    let total = store.company_count();
    rank_by_count(counts, usize::MAX)
        .into_iter()
        .map(|(city, count)| CityShare {
            city: city.to_string(),
            count,
            pct: round_one_decimal(100.0 * count as f64 / total as f64),
        })
        .collect()
}

fn count_founders_per_key<'s, F>(store: &'s EntityStore, keys_of: F) -> IndexMap<&'s str, usize>
where
    F: Fn(&'s Founder) -> Vec<&'s str>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for founder in store.founders() {
        let mut seen = HashSet::new();
        for key in keys_of(founder) {
            if seen.insert(key) {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
    }
    counts
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
