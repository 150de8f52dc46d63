//! Streaming relay with incremental token accounting

use super::sink::{EventSink, send_message_frame};
use super::streaming::CompletionStream;
use super::tokenizer::TokenEstimator;
use crate::error::GateResult;
use crate::types::ModelResult;
use futures::StreamExt;

/// Relay every content delta of `stream` to `sink` as a `message` frame
///
/// `result` carries the prompt accounting; each relayed delta adds its token
/// cost before the frame is written, so the returned result counts exactly
/// the frames that reached the sink. Only chunks without choices are
/// skipped; a choice without content is relayed as an empty frame. On a receive error or a sink failure the partial
/// result is discarded. The stream is owned here and released on every
/// exit path.
pub async fn relay_stream<S>(
    mut stream: CompletionStream,
    sink: &mut S,
    estimator: &dyn TokenEstimator,
    mut result: ModelResult,
) -> GateResult<ModelResult>
where
    S: EventSink + ?Sized,
{
    let mut frames = 0usize;

    while let Some(item) = stream.next().await {
        let chunk = item?;
        let Some(text) = chunk.delta_text() else {
            tracing::trace!("skipping chunk without choices");
            continue;
        };

        result.add_response_tokens(estimator.count_text(text));
        send_message_frame(sink, text).await?;
        frames += 1;
    }

    tracing::debug!(
        frames,
        prompt_tokens = result.prompt_token_count(),
        response_tokens = result.response_token_count(),
        "stream relayed"
    );
    Ok(result)
}

/// Write a complete, non-streamed answer once and account for it
pub async fn relay_full_text<S>(
    text: &str,
    sink: &mut S,
    estimator: &dyn TokenEstimator,
    mut result: ModelResult,
) -> GateResult<ModelResult>
where
    S: EventSink + ?Sized,
{
    sink.write_text(text).await?;
    sink.flush().await?;
    result.add_response_tokens(estimator.count_text(text));
    Ok(result)
}
