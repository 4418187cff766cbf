pub mod comparison;
pub mod option;

pub use comparison::{compare_lender, LenderComparison};
pub use option::{LenderOption, LoanType};
