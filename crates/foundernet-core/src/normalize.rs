//! Key normalization shared by edge generation, counting, and reporting.
//!
//! Grouping is exact string equality after trimming. No case folding or
//! fuzzy matching is applied: `"IIT Delhi"` and `"IIT-Delhi"` are distinct.

/// Placeholder employer name meaning "unknown".
pub const UNKNOWN_EMPLOYER: &str = "—";

/// Normalized institution name, or `None` when empty after trimming.
#[must_use]
pub fn institution_key(raw: &str) -> Option<&str> {
    let key = raw.trim();
    (!key.is_empty()).then_some(key)
}

/// Normalized employer name, or `None` when empty or the unknown placeholder.
#[must_use]
pub fn employer_key(raw: &str) -> Option<&str> {
    let key = raw.trim();
    (!key.is_empty() && key != UNKNOWN_EMPLOYER).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn institution_is_trimmed() {
        assert_eq!(institution_key("  IIT Delhi \t"), Some("IIT Delhi"));
    }

    #[test]
    fn blank_institution_is_rejected() {
        assert_eq!(institution_key(""), None);
        assert_eq!(institution_key("   "), None);
    }

    #[test]
    fn employer_placeholder_is_rejected() {
        assert_eq!(employer_key("—"), None);
        assert_eq!(employer_key(" — "), None);
        assert_eq!(employer_key(""), None);
        assert_eq!(employer_key(" Flipkart"), Some("Flipkart"));
    }

    #[test]
    fn plain_hyphen_is_a_real_employer_name() {
        assert_eq!(employer_key("-"), Some("-"));
    }
}
