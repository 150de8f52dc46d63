//! Output sinks for relayed text

use crate::error::{GateError, GateResult};
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// A writable, flushable destination for relayed output
///
/// Flushing is part of the contract, so every sink can push each frame to
/// the client as soon as it is written.
#[async_trait]
pub trait EventSink: Send {
    async fn write_text(&mut self, text: &str) -> GateResult<()>;

    async fn flush(&mut self) -> GateResult<()>;
}

/// Format one server-sent `message` event
pub fn message_frame(data: &str) -> String {
    format!("event: message\ndata: {}\n\n", data)
}

/// Write one `message` frame and flush it
pub async fn send_message_frame<S>(sink: &mut S, data: &str) -> GateResult<()>
where
    S: EventSink + ?Sized,
{
    sink.write_text(&message_frame(data)).await?;
    sink.flush().await
}

/// Sink over any async writer (stdout, a socket, an HTTP body channel)
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[async_trait]
impl<W> EventSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_text(&mut self, text: &str) -> GateResult<()> {
        self.inner
            .write_all(text.as_bytes())
            .await
            .map_err(|e| GateError::sink(format!("write failed: {}", e)))
    }

    async fn flush(&mut self) -> GateResult<()> {
        self.inner
            .flush()
            .await
            .map_err(|e| GateError::sink(format!("flush failed: {}", e)))
    }
}

/// In-memory sink that records what was written and how often it was flushed
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    written: String,
    writes: usize,
    flushes: usize,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.written
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

#[async_trait]
impl EventSink for BufferSink {
    async fn write_text(&mut self, text: &str) -> GateResult<()> {
        self.written.push_str(text);
        self.writes += 1;
        Ok(())
    }

    async fn flush(&mut self) -> GateResult<()> {
        self.flushes += 1;
        Ok(())
    }
}
