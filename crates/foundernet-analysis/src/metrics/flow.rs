//! Employer → founded-company talent flows.
//!
//! A flow is a recurring transition: several founders who worked at the
//! same employer went on to found the same company. Single-founder
//! transitions are noise and are dropped.

use std::collections::HashSet;

use foundernet_core::EntityStore;
use foundernet_core::normalize::employer_key;
use indexmap::IndexMap;
use serde::Serialize;

/// Minimum number of founders for a transition to count as a flow.
pub const MIN_FLOW_FOUNDERS: usize = 2;

/// Founders who moved from one employer to found one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TalentFlow {
    pub from_employer: String,
    pub to_company: String,
    /// Founder display names, in store order.
    pub founders: Vec<String>,
    pub count: usize,
}

/// Trace employer → founded-company pipelines with two or more founders.
///
/// Companies are keyed by display label (dangling ids by the id itself).
/// Each founder counts once per pair. Ordered by founder count descending,
/// ties in first-encountered order.
#[must_use]
pub fn founder_to_company_flow(store: &EntityStore) -> Vec<TalentFlow> {
    let mut flows: IndexMap<(&str, &str), Vec<&str>> = IndexMap::new();

    for founder in store.founders() {
        let mut seen = HashSet::new();
        let employers = founder
            .work_history
            .iter()
            .filter_map(|w| employer_key(&w.employer));

        for employer in employers {
            let companies = founder
                .companies
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(|c| store.company_label(c));

            for company in companies {
                if seen.insert((employer, company)) {
                    flows
                        .entry((employer, company))
                        .or_default()
                        .push(founder.name.as_str());
                }
            }
        }
    }

    let mut results: Vec<TalentFlow> = flows
        .into_iter()
        .filter(|(_, names)| names.len() >= MIN_FLOW_FOUNDERS)
        .map(|((employer, company), names)| TalentFlow {
            from_employer: employer.to_string(),
            to_company: company.to_string(),
            count: names.len(),
            founders: names.into_iter().map(str::to_string).collect(),
        })
        .collect();

    // Stable: equal counts keep first-encountered order.
    results.sort_by(|a, b| b.count.cmp(&a.count));
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
