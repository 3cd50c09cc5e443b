//! Read-only indexed views over founders and companies.
//!
//! # Ordering
//!
//! Both indexes preserve the order in which records were supplied. Every
//! "first-encountered" tie-break in the analysis engine refers to this
//! order, so two stores built from the same input sequences always produce
//! identical rankings.
//!
//! # Cross-references
//!
//! A founder lists company *identifiers*. The store never follows those
//! references eagerly; [`EntityStore::company_label`] resolves an id to a
//! display name at lookup time and falls back to the id itself when the
//! company is unknown.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::error::EntityError;
use crate::model::{Company, Founder};

/// Immutable, insertion-ordered collections of founders and companies.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    founders: IndexMap<String, Founder>,
    companies: IndexMap<String, Company>,
}

impl EntityStore {
    /// Index `founders` and `companies` by id.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] when an id is empty (after trimming) or when
    /// two records of the same kind share an id.
    #[instrument(skip_all, fields(founders = founders.len(), companies = companies.len()))]
    pub fn new(founders: Vec<Founder>, companies: Vec<Company>) -> Result<Self, EntityError> {
        let mut founder_index = IndexMap::with_capacity(founders.len());
        for (position, founder) in founders.into_iter().enumerate() {
            if founder.id.trim().is_empty() {
                return Err(EntityError::EmptyIdentifier {
                    kind: "founder",
                    position,
                });
            }
            if founder_index.contains_key(&founder.id) {
                return Err(EntityError::DuplicateFounder(founder.id));
            }
            founder_index.insert(founder.id.clone(), founder);
        }

        let mut company_index = IndexMap::with_capacity(companies.len());
        for (position, company) in companies.into_iter().enumerate() {
            if company.id.trim().is_empty() {
                return Err(EntityError::EmptyIdentifier {
                    kind: "company",
                    position,
                });
            }
            if company_index.contains_key(&company.id) {
                return Err(EntityError::DuplicateCompany(company.id));
            }
            company_index.insert(company.id.clone(), company);
        }

        debug!(
            founders = founder_index.len(),
            companies = company_index.len(),
            "entity store indexed"
        );

        Ok(Self {
            founders: founder_index,
            companies: company_index,
        })
    }

    /// Parse JSON arrays of founders and companies and index them.
    ///
    /// # Errors
    ///
    /// Returns an error if either document is not a JSON array of the
    /// expected records, or if [`EntityStore::new`] rejects the records.
    pub fn from_json(founders_json: &str, companies_json: &str) -> Result<Self> {
        let founders: Vec<Founder> =
            serde_json::from_str(founders_json).context("parse founders JSON")?;
        let companies: Vec<Company> =
            serde_json::from_str(companies_json).context("parse companies JSON")?;
        Self::new(founders, companies).context("index entity records")
    }

    #[must_use]
    pub fn founder(&self, id: &str) -> Option<&Founder> {
        self.founders.get(id)
    }

    #[must_use]
    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.get(id)
    }

    /// Display name of a company, or the raw id when the company is unknown.
    #[must_use]
    pub fn company_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.companies.get(id).map_or(id, |c| c.name.as_str())
    }

    /// Display name of a founder, or the raw id when the founder is unknown.
    #[must_use]
    pub fn founder_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.founders.get(id).map_or(id, |f| f.name.as_str())
    }

    /// Founders in insertion order.
    pub fn founders(&self) -> impl Iterator<Item = &Founder> {
        self.founders.values()
    }

    /// Companies in insertion order.
    pub fn companies(&self) -> impl Iterator<Item = &Company> {
        self.companies.values()
    }

    #[must_use]
    pub fn founder_count(&self) -> usize {
        self.founders.len()
    }

    #[must_use]
    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.founders.is_empty() && self.companies.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
