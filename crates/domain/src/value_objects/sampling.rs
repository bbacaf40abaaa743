//! Sampling parameters as the host expresses them

use serde::{Deserialize, Serialize};

/// Token selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Always pick the most likely token
    #[default]
    Greedy,
    /// Nucleus sampling
    TopP {
        /// Sampling temperature
        temperature: f32,
        /// Cumulative probability cutoff
        top_p: f32,
    },
    /// Top-k sampling
    TopK {
        /// Number of candidates kept
        top_k: u32,
    },
}

/// Generation controls attached to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Token selection strategy
    #[serde(default)]
    pub strategy: SamplingStrategy,
    /// Upper bound on generated tokens (0 or absent means no limit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Repetition penalty, 1.0 disables it
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: Option<f32>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

#[allow(clippy::unnecessary_wraps)]
const fn default_repetition_penalty() -> Option<f32> {
    Some(1.0)
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            strategy: SamplingStrategy::default(),
            max_tokens: None,
            repetition_penalty: default_repetition_penalty(),
            stop: None,
        }
    }
}

impl SamplingParams {
    /// Greedy sampling with the given token limit
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Replace the strategy
    pub const fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Log probability request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogProbConfig {
    /// Number of top candidates to report per token
    #[serde(default)]
    pub top_k: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_greedy_without_limit() {
        let params = SamplingParams::default();
        assert_eq!(params.strategy, SamplingStrategy::Greedy);
        assert!(params.max_tokens.is_none());
        assert_eq!(params.repetition_penalty, Some(1.0));
        assert!(params.stop.is_none());
    }

    #[test]
    fn deserializes_top_p_strategy() {
        let json = r#"{"strategy":{"type":"top_p","temperature":0.7,"top_p":0.9},"max_tokens":64}"#;
        let params: SamplingParams = serde_json::from_str(json).unwrap();
        assert_eq!(
            params.strategy,
            SamplingStrategy::TopP {
                temperature: 0.7,
                top_p: 0.9
            }
        );
        assert_eq!(params.max_tokens, Some(64));
        assert_eq!(params.repetition_penalty, Some(1.0));
    }

    #[test]
    fn empty_object_uses_defaults() {
        let params: SamplingParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, SamplingParams::default());
    }
}
