pub mod amortization;
pub mod policy;
pub mod pricing;

pub use amortization::{AmortizationEntry, LoanRequest};
pub use policy::{Decision, PolicyConfig};
pub use pricing::PricingConfig;
