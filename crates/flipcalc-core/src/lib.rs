pub mod deal;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "underwriting")]
pub mod underwriting;

#[cfg(feature = "lender_comparison")]
pub mod lender;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "jurisdiction")]
pub mod jurisdiction;

#[cfg(feature = "rehab_analysis")]
pub mod rehab;

pub use error::FlipCalcError;
pub use types::*;

/// Standard result type for all flipcalc operations
pub type FlipCalcResult<T> = Result<T, FlipCalcError>;
