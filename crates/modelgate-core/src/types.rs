//! Shared result types

use serde::Serialize;

/// Token accounting for one provider call.
///
/// The total is always `prompt + response`; fields are only mutated through
/// methods that recompute it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResult {
    prompt_token_count: usize,
    response_token_count: usize,
    total_token_count: usize,
}

impl ModelResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result with the given prompt token count and no response yet
    pub fn with_prompt_tokens(prompt_tokens: usize) -> Self {
        Self {
            prompt_token_count: prompt_tokens,
            response_token_count: 0,
            total_token_count: prompt_tokens,
        }
    }

    /// Add the cost of one response fragment
    pub fn add_response_tokens(&mut self, tokens: usize) {
        self.response_token_count += tokens;
        self.total_token_count = self.prompt_token_count + self.response_token_count;
    }

    pub fn prompt_token_count(&self) -> usize {
        self.prompt_token_count
    }

    pub fn response_token_count(&self) -> usize {
        self.response_token_count
    }

    pub fn total_token_count(&self) -> usize {
        self.total_token_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_tracks_updates() {
        let mut result = ModelResult::with_prompt_tokens(12);
        assert_eq!(result.total_token_count(), 12);

        for tokens in [3, 0, 7] {
            result.add_response_tokens(tokens);
            assert_eq!(
                result.total_token_count(),
                result.prompt_token_count() + result.response_token_count()
            );
        }
        assert_eq!(result.response_token_count(), 10);
        assert_eq!(result.total_token_count(), 22);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut result = ModelResult::with_prompt_tokens(2);
        result.add_response_tokens(1);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["promptTokenCount"], 2);
        assert_eq!(json["responseTokenCount"], 1);
        assert_eq!(json["totalTokenCount"], 3);
    }
}
