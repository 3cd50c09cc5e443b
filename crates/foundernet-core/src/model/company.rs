use serde::{Deserialize, Serialize};

/// A company as delivered by the upstream normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique slug, e.g. `razorpay`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    /// Sector label; empty when the upstream record has none.
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub founded_year: Option<i32>,
    /// Founder identifiers. Informational; co-founder edges are derived from
    /// each founder's own company list.
    #[serde(default)]
    pub founders: Vec<String>,
}

fn default_country() -> String {
    "India".to_string()
}

impl Company {
    /// Minimal company with only an id and display name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: None,
            country: default_country(),
            sector: String::new(),
            founded_year: None,
            founders: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_founders<I, S>(mut self, founders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.founders = founders.into_iter().map(Into::into).collect();
        self
    }
}
