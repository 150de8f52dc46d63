//! UnifiedError trait implementation for GateError

use super::types::{GateError, UnifiedError};

impl UnifiedError for GateError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "GATE_CONFIG",
            Self::AdmissionRejected { .. } => "GATE_ADMISSION",
            Self::Http { .. } => "GATE_HTTP",
            Self::Sink { .. } => "GATE_SINK",
            Self::Protocol { .. } => "GATE_PROTOCOL",
            Self::Llm { .. } => "GATE_LLM",
            Self::Tokenizer { .. } => "GATE_TOKENIZER",
            Self::Json { .. } => "GATE_JSON",
            Self::Io { .. } => "GATE_IO",
            Self::Tool { .. } => "GATE_TOOL",
            Self::InvalidInput { .. } => "GATE_INVALID_INPUT",
            Self::Other { .. } => "GATE_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::AdmissionRejected { .. } => "exceeds maximum tokens",
            Self::Http { message, .. } => message,
            Self::Sink { message, .. } => message,
            Self::Protocol { message, .. } => message,
            Self::Llm { message, .. } => message,
            Self::Tokenizer { message, .. } => message,
            Self::Json { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Tool { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
            Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::AdmissionRejected { context, .. }
            | Self::Http { context, .. }
            | Self::Sink { context, .. }
            | Self::Protocol { context, .. }
            | Self::Llm { context, .. }
            | Self::Tokenizer { context, .. }
            | Self::Json { context, .. }
            | Self::Io { context, .. }
            | Self::Tool { context, .. }
            | Self::InvalidInput { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
        }
    }

    // The relay itself never retries; this only informs callers.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status_code, .. } => {
                matches!(status_code, None | Some(429) | Some(500..=599))
            }
            _ => false,
        }
    }
}
