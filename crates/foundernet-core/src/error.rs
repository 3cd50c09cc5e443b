use thiserror::Error;

/// Validation failures raised while indexing entity records.
///
/// Dangling cross-references (a founder naming an unknown company id) are
/// not errors; they degrade to the raw id as a display label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("{kind} record at position {position} has an empty identifier")]
    EmptyIdentifier { kind: &'static str, position: usize },

    #[error("duplicate founder id: {0}")]
    DuplicateFounder(String),

    #[error("duplicate company id: {0}")]
    DuplicateCompany(String),
}
