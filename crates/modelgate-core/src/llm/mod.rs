//! Chat request assembly, admission, streaming relay and providers

pub mod admission;
pub mod messages;
pub mod providers;
pub mod relay;
pub mod request;
pub mod sink;
pub mod sse_decoder;
pub mod streaming;
pub mod tokenizer;

pub use admission::{DEFAULT_MAX_TOKENS, DRY_RUN_PREFIX, admit, dry_run, is_dry_run, max_tokens_for_model};
pub use messages::{ChatMessage, MessageRole};
pub use providers::{
    ModelProvider, OllamaProvider, OpenAiCompatibleProvider, ProviderFactory, ProviderInstance,
    TencentCloudProvider,
};
pub use relay::{relay_full_text, relay_stream};
pub use request::{ChatRequest, SamplingParams, model_from_endpoint};
pub use sink::{BufferSink, EventSink, WriterSink, message_frame};
pub use sse_decoder::{SseDecoder, SseEvent};
pub use streaming::{ChatCompletionChunk, ChunkChoice, ChunkDelta, CompletionStream, openai_sse_stream};
pub use tokenizer::{TiktokenEstimator, TokenEstimator, default_estimator};
