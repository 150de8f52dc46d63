//! OpenAI-compatible streaming chunks

use super::sse_decoder::{SseDecoder, SseEvent};
use crate::error::{GateError, GateResult};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use std::collections::VecDeque;
use std::pin::Pin;

/// One decoded `chat.completion.chunk`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// Chunk with a single choice carrying `text`
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![ChunkChoice {
                delta: ChunkDelta {
                    content: Some(text.into()),
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Content of the first choice; `None` only when there are no choices
    ///
    /// A choice without content (a role-only first chunk) yields `""`.
    pub fn delta_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.delta.content.as_deref().unwrap_or_default())
    }
}

/// Stream of decoded chunks; `None` marks a clean end of stream
pub type CompletionStream = Pin<Box<dyn Stream<Item = GateResult<ChatCompletionChunk>> + Send>>;

/// Parse the data payload of one SSE event
fn parse_chunk(event: &SseEvent) -> GateResult<ChatCompletionChunk> {
    let value: serde_json::Value = serde_json::from_str(&event.data)
        .map_err(|e| GateError::protocol(format!("Malformed stream chunk: {}", e)))?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(GateError::llm(format!("Provider stream error: {}", message)));
    }

    serde_json::from_value(value)
        .map_err(|e| GateError::protocol(format!("Unexpected stream chunk shape: {}", e)))
}

struct SseStreamState<S> {
    bytes: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<SseEvent>,
    exhausted: bool,
    finished: bool,
}

/// Decode an OpenAI-compatible SSE byte stream into completion chunks
///
/// The stream ends at `[DONE]` or when the body ends. The first receive or
/// decode error is yielded once and terminates the stream.
pub fn openai_sse_stream<S, B, E>(byte_stream: S) -> CompletionStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<GateError> + Send + 'static,
{
    let state = SseStreamState {
        bytes: Box::pin(byte_stream),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        exhausted: false,
        finished: false,
    };

    let stream = futures::stream::unfold(state, |mut state| async move {
        loop {
            if state.finished {
                return None;
            }

            if let Some(event) = state.pending.pop_front() {
                if event.is_done() {
                    state.finished = true;
                    return None;
                }
                let item = parse_chunk(&event);
                if item.is_err() {
                    state.finished = true;
                }
                return Some((item, state));
            }

            if state.exhausted {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(bytes)) => {
                    let events = state.decoder.feed(bytes.as_ref());
                    state.pending.extend(events);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    let err: GateError = e.into();
                    return Some((Err(err.attach_context("Receiving stream chunk")), state));
                }
                None => {
                    state.exhausted = true;
                    state.pending.extend(state.decoder.finish());
                }
            }
        }
    });

    Box::pin(stream)
}
