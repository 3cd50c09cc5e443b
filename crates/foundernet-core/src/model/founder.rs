use serde::{Deserialize, Serialize};

/// One line of a founder's education history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    /// Free text; trimmed before use, ignored when empty after trimming.
    pub institution: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl EducationRecord {
    #[must_use]
    pub fn new(institution: impl Into<String>) -> Self {
        Self {
            institution: institution.into(),
            degree: None,
            field: None,
            year: None,
        }
    }

    /// `"IIT Delhi B.Tech 2004"` style one-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = self.institution.clone();
        if let Some(degree) = &self.degree {
            out.push(' ');
            out.push_str(degree);
        }
        if let Some(year) = self.year {
            out.push(' ');
            out.push_str(&year.to_string());
        }
        out
    }
}

/// One line of a founder's work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    /// Employer name. The placeholder `"—"` means unknown.
    #[serde(alias = "company")]
    pub employer: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

impl WorkRecord {
    #[must_use]
    pub fn new(employer: impl Into<String>) -> Self {
        Self {
            employer: employer.into(),
            role: None,
            start_year: None,
            end_year: None,
        }
    }
}

/// A founder and everything the engine knows about them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Founder {
    /// Unique slug, e.g. `harshil-mathur-razorpay`.
    pub id: String,
    pub name: String,
    /// Identifiers of companies this founder founded, in the order given.
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationRecord>,
    #[serde(default)]
    pub work_history: Vec<WorkRecord>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Founder {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            companies: Vec::new(),
            education: Vec::new(),
            work_history: Vec::new(),
            linkedin_url: None,
            verified: false,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn founded(mut self, company_id: impl Into<String>) -> Self {
        self.companies.push(company_id.into());
        self
    }

    #[must_use]
    pub fn studied_at(mut self, institution: impl Into<String>) -> Self {
        self.education.push(EducationRecord::new(institution));
        self
    }

    #[must_use]
    pub fn worked_at(mut self, employer: impl Into<String>) -> Self {
        self.work_history.push(WorkRecord::new(employer));
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub const fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }
}
