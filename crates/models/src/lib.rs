//! Entity definitions and validation for the product record service.

pub mod errors;
pub mod product;
