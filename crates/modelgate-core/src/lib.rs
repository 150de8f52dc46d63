//! modelgate core library
//!
//! Provider adapters that turn a uniform "query text" or "query vector" call
//! into requests against external model services, with dry-run admission,
//! streaming relay and token accounting.

pub mod config;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod object;
pub mod types;

pub use config::{Config, ConfigLoader, ProviderKind, ProviderSettings};
pub use embedding::{EmbeddingProvider, EmbeddingResult, OllamaEmbeddingProvider};
pub use error::{GateError, GateResult, ResultExt, UnifiedError};
pub use llm::{
    ChatMessage, EventSink, ModelProvider, ProviderFactory, ProviderInstance, TokenEstimator,
    WriterSink,
};
pub use object::Factor;
pub use types::ModelResult;
