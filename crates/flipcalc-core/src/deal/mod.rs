pub mod record;
pub mod validation;

pub use record::{
    DealRecord, ExitStrategy, FinancingMode, FoundationType, PropertyType, RehabLineItem,
    WorkBackwardBasis,
};
pub use validation::{validate_deal, Severity, ValidationIssue};
