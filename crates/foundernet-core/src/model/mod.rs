//! Entity records delivered to the analysis engine.
//!
//! Records are plain data. Founders reference companies by identifier only;
//! resolving those references is the job of [`crate::store::EntityStore`].

pub mod company;
pub mod founder;

pub use company::Company;
pub use founder::{EducationRecord, Founder, WorkRecord};
