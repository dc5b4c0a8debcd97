use std::path::Path;

use serde::Deserialize;

use crate::error::ScoringError;

/// Unit of comparison for the alignment scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Compare decoded phoneme segments against reference phonemes.
    #[default]
    Phoneme,
    /// Flatten both sides into characters (character error rate).
    Character,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phoneme => "phoneme",
            Self::Character => "character",
        }
    }
}

/// What an empty reference scores as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyReferencePolicy {
    /// Zero error rate, accuracy 1.0, whatever was predicted.
    #[default]
    Perfect,
    /// Error rate 1.0, accuracy 0.0.
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyBounds {
    /// Clamp accuracy into [0, 1].
    #[default]
    Clamped,
    /// Keep `1 - error_rate` as is; negative when distance exceeds the reference length.
    Unclamped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    pub granularity: Granularity,
    pub empty_reference: EmptyReferencePolicy,
    pub bounds: AccuracyBounds,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub vocab_path: String,
    /// Optional JSON object `{ "symbol": "canonical" }`; the built-in table is used when unset.
    pub confusion_map_path: Option<String>,
    /// Optional cmudict-format pronunciation dictionary.
    pub dictionary_path: Option<String>,
    pub pad_token: String,
    /// Explicit pad id; resolved from `pad_token` in the vocabulary when unset.
    pub pad_token_id: Option<usize>,
    pub word_delimiter: Option<String>,
    pub silence_token: Option<String>,
    pub special_tokens: Vec<String>,
    pub scoring: ScoringOptions,
}

impl ScorerConfig {
    pub const DEFAULT_PAD_TOKEN: &'static str = "[PAD]";
    pub const DEFAULT_WORD_DELIMITER: &'static str = "|";
    pub const DEFAULT_SILENCE_TOKEN: &'static str = "h#";

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scorer config", e))?;
        serde_json::from_str(&data).map_err(|e| ScoringError::json("parse scorer config", e))
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            vocab_path: String::new(),
            confusion_map_path: None,
            dictionary_path: None,
            pad_token: Self::DEFAULT_PAD_TOKEN.to_string(),
            pad_token_id: None,
            word_delimiter: Some(Self::DEFAULT_WORD_DELIMITER.to_string()),
            silence_token: Some(Self::DEFAULT_SILENCE_TOKEN.to_string()),
            special_tokens: default_special_tokens(),
            scoring: ScoringOptions::default(),
        }
    }
}

fn default_special_tokens() -> Vec<String> {
    ["<s>", "</s>", "<unk>", "<pad>", "[PAD]", "[UNK]"]
        .into_iter()
        .map(str::to_string)
        .collect()
}
