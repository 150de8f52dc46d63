//! Decoded SSE event

/// One event from a `text/event-stream` body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SseEvent {
    /// Value of the `event:` field, if any
    pub event_type: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
    pub id: Option<String>,
}

impl SseEvent {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// OpenAI end-of-stream marker
    pub fn is_done(&self) -> bool {
        self.data.trim() == "[DONE]"
    }
}
