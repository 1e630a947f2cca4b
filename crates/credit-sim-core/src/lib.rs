pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "contract")]
pub mod contract;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use error::CreditSimError;
pub use types::*;

/// Standard result type for all credit-sim operations
pub type CreditSimResult<T> = Result<T, CreditSimError>;
