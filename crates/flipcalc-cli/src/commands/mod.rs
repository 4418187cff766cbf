pub mod irr;
pub mod jurisdiction;
pub mod lenders;
pub mod rehab;
pub mod sensitivity;
pub mod underwrite;
