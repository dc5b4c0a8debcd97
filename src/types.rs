use serde::{Deserialize, Serialize};

/// One scoring request: greedy per-frame token ids plus the expected text.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringInput {
    /// Argmax token id per frame, as emitted by the acoustic model.
    pub tokens: Vec<usize>,
    /// Expected word or sentence. `None` or blank scores against an empty reference.
    #[serde(default)]
    pub expected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Predicted units after confusion-map normalization.
    pub predicted: Vec<String>,
    /// Reference units after confusion-map normalization.
    pub reference: Vec<String>,
    /// Levenshtein distance at the configured granularity.
    pub distance: usize,
    /// Reference length at the configured granularity (the error-rate denominator).
    pub reference_len: usize,
    pub error_rate: f64,
    pub accuracy: f64,
}

