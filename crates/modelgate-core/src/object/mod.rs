//! Stored data records

mod factor;

pub use factor::Factor;
