//! Token estimation
//!
//! Every provider counts tokens with the same `gpt-4` (cl100k) encoding, so
//! numbers are comparable across backends even when they are not exact for
//! a particular model.

use super::messages::ChatMessage;
use crate::error::{GateError, GateResult};
use once_cell::sync::OnceCell;
use tiktoken_rs::CoreBPE;

/// Model whose encoding is used for all estimates
pub const DEFAULT_ESTIMATOR_MODEL: &str = "gpt-4";

const TOKENS_PER_MESSAGE: usize = 3;
const REPLY_PRIMING_TOKENS: usize = 3;

/// Counts tokens for text and chat messages
pub trait TokenEstimator: Send + Sync {
    /// Token count of a plain text fragment
    fn count_text(&self, text: &str) -> usize;

    /// Token count of a chat prompt using the OpenAI chat accounting rule
    fn count_messages(&self, messages: &[ChatMessage]) -> usize {
        messages
            .iter()
            .map(|m| {
                TOKENS_PER_MESSAGE + self.count_text(m.role().as_str()) + self.count_text(m.content())
            })
            .sum::<usize>()
            + REPLY_PRIMING_TOKENS
    }
}

/// BPE-backed estimator
pub struct TiktokenEstimator {
    bpe: CoreBPE,
}

impl TiktokenEstimator {
    /// Load the encoding used by `model`
    pub fn for_model(model: &str) -> GateResult<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            GateError::tokenizer(format!("No encoding available for model '{}': {}", model, e))
        })?;
        Ok(Self { bpe })
    }
}

impl std::fmt::Debug for TiktokenEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenEstimator").finish_non_exhaustive()
    }
}

impl TokenEstimator for TiktokenEstimator {
    fn count_text(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

static DEFAULT_ESTIMATOR: OnceCell<TiktokenEstimator> = OnceCell::new();

/// Shared estimator for [`DEFAULT_ESTIMATOR_MODEL`], loaded on first use
pub fn default_estimator() -> GateResult<&'static TiktokenEstimator> {
    DEFAULT_ESTIMATOR.get_or_try_init(|| TiktokenEstimator::for_model(DEFAULT_ESTIMATOR_MODEL))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::TokenEstimator;

    /// One token per whitespace-separated word
    #[derive(Debug, Default)]
    pub struct WordEstimator;

    impl TokenEstimator for WordEstimator {
        fn count_text(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::WordEstimator;
    use super::*;

    #[test]
    fn test_chat_accounting_rule() {
        let messages = vec![ChatMessage::user("one two three")];
        // 3 per message + "user" + 3 words + 3 priming
        assert_eq!(WordEstimator.count_messages(&messages), 3 + 1 + 3 + 3);
        assert_eq!(WordEstimator.count_messages(&[]), 3);
    }

    #[test]
    fn test_tiktoken_counts() {
        let estimator = default_estimator().unwrap();
        assert_eq!(estimator.count_text(""), 0);
        assert!(estimator.count_text("Hello, world!") > 0);

        let prompt = estimator.count_messages(&[ChatMessage::user("Hello")]);
        assert_eq!(
            prompt,
            3 + estimator.count_text("user") + estimator.count_text("Hello") + 3
        );
    }

    #[test]
    fn test_estimation_is_deterministic() {
        let estimator = default_estimator().unwrap();
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(estimator.count_text(text), estimator.count_text(text));
    }
}
