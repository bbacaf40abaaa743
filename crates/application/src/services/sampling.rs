//! Sampling options - Host sampling params flattened into generation options

use domain::{SamplingParams, SamplingStrategy};
use serde::Serialize;

/// Generation options derived from [`SamplingParams`]
///
/// Absent fields mean "use the backend default".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SamplingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Upper bound on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

/// Map sampling params to generation options
///
/// Greedy decoding becomes temperature 0. A zero token limit and a neutral
/// repetition penalty of 1.0 are left out.
pub fn get_sampling_options(params: Option<&SamplingParams>) -> SamplingOptions {
    let Some(params) = params else {
        return SamplingOptions::default();
    };

    let mut options = strategy_options(params.strategy);

    options.max_tokens = params.max_tokens.filter(|n| *n != 0);

    #[allow(clippy::float_cmp)]
    {
        options.repeat_penalty = params.repetition_penalty.filter(|p| *p != 1.0);
    }

    options.stop.clone_from(&params.stop);
    options
}

fn strategy_options(strategy: SamplingStrategy) -> SamplingOptions {
    match strategy {
        SamplingStrategy::Greedy => SamplingOptions {
            temperature: Some(0.0),
            ..Default::default()
        },
        SamplingStrategy::TopP { temperature, top_p } => SamplingOptions {
            temperature: Some(temperature),
            top_p: Some(top_p),
            ..Default::default()
        },
        SamplingStrategy::TopK { top_k } => SamplingOptions {
            top_k: Some(top_k),
            ..Default::default()
        },
    }
}
