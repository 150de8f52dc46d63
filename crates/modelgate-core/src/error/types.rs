//! Core error types and traits

use thiserror::Error;

/// Result type alias for modelgate operations
pub type GateResult<T> = Result<T, GateError>;

/// Unified error trait implemented by `GateError`.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if this error is retryable
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> GateResult<T>;

    /// Add context lazily (only evaluated on error)
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> GateResult<T>;
}

impl<T> ResultExt<T> for GateResult<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> GateResult<T> {
        self.map_err(|e| e.attach_context(context.to_string()))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> GateResult<T> {
        self.map_err(|e| e.attach_context(f().to_string()))
    }
}

/// Main error type for modelgate
///
/// Variants follow the failure taxonomy of a provider call: configuration
/// problems are detected before any network attempt, admission rejections are
/// purely local, transport failures (`Http`, `Sink`) carry the underlying
/// detail, and shape problems surface as `Protocol` or `Json`.
#[derive(Error, Debug, Clone)]
pub enum GateError {
    /// Missing or invalid configuration (secrets, endpoints, parameters)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Dry-run estimate reached the provider's token budget
    #[error("Prompt of {prompt_tokens} tokens exceeds maximum tokens ({max_tokens})")]
    AdmissionRejected {
        prompt_tokens: usize,
        max_tokens: usize,
        context: Option<String>,
    },

    /// Connection open or receive failure
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// Writing or flushing the output sink failed
    #[error("Sink error: {message}")]
    Sink {
        message: String,
        context: Option<String>,
    },

    /// The remote service answered with an unexpected shape
    #[error("Protocol error: {message}")]
    Protocol {
        message: String,
        context: Option<String>,
    },

    /// Error reported by the remote model service itself
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
        context: Option<String>,
    },

    /// Token estimation failed
    #[error("Tokenizer error: {message}")]
    Tokenizer {
        message: String,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// Tool server errors
    #[error("Tool error: {server}: {message}")]
    Tool {
        server: String,
        message: String,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
