//! Dry-run admission pre-check

use super::messages::ChatMessage;
use super::tokenizer::TokenEstimator;
use crate::error::{GateError, GateResult};
use crate::types::ModelResult;

/// Questions starting with this sentinel are estimated, never sent
pub const DRY_RUN_PREFIX: &str = "$CasibaseDryRun$";

/// Context size assumed for models missing from the built-in table
pub const DEFAULT_MAX_TOKENS: usize = 4097;

// Checked in order; the first matching prefix wins.
const MODEL_CONTEXT_SIZES: &[(&str, usize)] = &[
    ("gpt-4o", 128_000),
    ("gpt-4-turbo", 128_000),
    ("gpt-4-1106", 128_000),
    ("gpt-4-0125", 128_000),
    ("gpt-4-32k", 32_768),
    ("gpt-4", 8_192),
    ("gpt-3.5-turbo-16k", 16_385),
    ("gpt-3.5-turbo-1106", 16_385),
    ("gpt-3.5-turbo-0125", 16_385),
    ("gpt-3.5-turbo", 4_097),
    ("hunyuan-lite", 256_000),
    ("hunyuan-standard-256k", 256_000),
    ("hunyuan", 32_000),
];

/// Whether the question asks for a dry run
pub fn is_dry_run(question: &str) -> bool {
    question.starts_with(DRY_RUN_PREFIX)
}

/// Built-in context size for a model name
pub fn max_tokens_for_model(model: &str) -> usize {
    let model = model.to_lowercase();
    MODEL_CONTEXT_SIZES
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
        .map(|(_, size)| *size)
        .unwrap_or(DEFAULT_MAX_TOKENS)
}

/// Admit a prompt iff it leaves room under the budget
///
/// Admission is strict: a prompt of exactly `max_tokens` tokens is rejected.
pub fn admit(prompt_tokens: usize, max_tokens: usize) -> GateResult<ModelResult> {
    if max_tokens > prompt_tokens {
        Ok(ModelResult::with_prompt_tokens(prompt_tokens))
    } else {
        Err(GateError::admission_rejected(prompt_tokens, max_tokens))
    }
}

/// Estimate the prompt and admit it without contacting the provider
pub fn dry_run(
    messages: &[ChatMessage],
    estimator: &dyn TokenEstimator,
    max_tokens: usize,
) -> GateResult<ModelResult> {
    let prompt_tokens = estimator.count_messages(messages);
    tracing::debug!(prompt_tokens, max_tokens, "dry-run admission");
    admit(prompt_tokens, max_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::tokenizer::testing::WordEstimator;

    #[test]
    fn test_is_dry_run() {
        assert!(is_dry_run("$CasibaseDryRun$ how long is this?"));
        assert!(!is_dry_run("how long is this? $CasibaseDryRun$"));
        assert!(!is_dry_run(""));
    }

    #[test]
    fn test_admission_is_strict() {
        let result = admit(4096, 4097).unwrap();
        assert_eq!(result.prompt_token_count(), 4096);
        assert_eq!(result.response_token_count(), 0);
        assert_eq!(result.total_token_count(), 4096);

        let err = admit(4097, 4097).unwrap_err();
        assert!(matches!(
            err,
            GateError::AdmissionRejected {
                prompt_tokens: 4097,
                max_tokens: 4097,
                ..
            }
        ));
        assert!(err.to_string().contains("exceeds maximum tokens"));
    }

    #[test]
    fn test_model_table() {
        assert_eq!(max_tokens_for_model("gpt-3.5-turbo"), 4097);
        assert_eq!(max_tokens_for_model("gpt-4"), 8192);
        assert_eq!(max_tokens_for_model("gpt-4-32k-0613"), 32_768);
        assert_eq!(max_tokens_for_model("gpt-4o-mini"), 128_000);
        assert_eq!(max_tokens_for_model("hunyuan-lite"), 256_000);
        assert_eq!(max_tokens_for_model("hunyuan-pro"), 32_000);
        assert_eq!(max_tokens_for_model("some-local-model"), DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_dry_run_is_deterministic() {
        let messages = vec![ChatMessage::user("$CasibaseDryRun$ a b c")];
        let first = dry_run(&messages, &WordEstimator, 100).unwrap();
        let second = dry_run(&messages, &WordEstimator, 100).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.prompt_token_count(), 3 + 1 + 4 + 3);
        assert!(dry_run(&messages, &WordEstimator, 11).is_err());
    }
}
