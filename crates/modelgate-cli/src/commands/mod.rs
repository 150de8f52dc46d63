//! Command implementations

pub mod embed;
pub mod pricing;
pub mod query;
pub mod tools;
