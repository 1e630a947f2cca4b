//! Default-risk scoring.
//!
//! A depth-limited CART classifier is fitted once on seeded synthetic
//! applicant data and then queried read-only for each application.

pub mod model;
pub mod profile;
pub mod synthetic;
pub mod tree;

pub use model::{RiskModel, ScorerConfig};
pub use profile::ApplicantProfile;
