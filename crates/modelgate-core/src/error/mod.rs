//! Error types for modelgate
//!
//! A single error enum is shared by every crate in the workspace. All variants
//! implement the `UnifiedError` trait which exposes:
//! - error_code: A stable identifier for programmatic handling
//! - message: Human-readable error message
//! - context: Optional additional context about where/why the error occurred

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{GateError, GateResult, ResultExt, UnifiedError};
