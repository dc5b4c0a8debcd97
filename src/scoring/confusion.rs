use std::collections::HashMap;
use std::path::Path;

use crate::error::ScoringError;

/// Built-in table of acoustically near-identical phonemes.
const DEFAULT_CONFUSIONS: &[(&str, &str)] = &[
    ("p", "P"),
    ("b", "P"),
    ("aa", "aa"),
    ("ao", "aa"),
    ("ih", "ih"),
    ("ah", "ih"),
    ("iy", "ih"),
    ("er", "r"),
];

/// Maps a phoneme to its canonical representative; unmapped symbols pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMap {
    mapping: HashMap<String, String>,
}

impl ConfusionMap {
    pub fn identity() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }

    /// Builds a map from `(symbol, canonical)` pairs.
    ///
    /// A canonical symbol that is itself remapped to something else would make
    /// `normalize` non-idempotent, so such tables are rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ScoringError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mapping: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (symbol, canonical) in &mapping {
            if let Some(next) = mapping.get(canonical) {
                if next != canonical {
                    return Err(ScoringError::invalid_input(format!(
                        "confusion map chains '{symbol}' -> '{canonical}' -> '{next}'"
                    )));
                }
            }
        }

        Ok(Self { mapping })
    }

    pub fn from_json_str(data: &str) -> Result<Self, ScoringError> {
        let raw: HashMap<String, String> = serde_json::from_str(data)
            .map_err(|e| ScoringError::json("parse confusion map", e))?;
        Self::from_pairs(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read confusion map", e))?;
        Self::from_json_str(&data)
    }

    pub fn canonical<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.mapping.get(symbol).map(String::as_str).unwrap_or(symbol)
    }

    pub fn normalize<S: AsRef<str>>(&self, seq: &[S]) -> Vec<String> {
        seq.iter()
            .map(|s| self.canonical(s.as_ref()).to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl Default for ConfusionMap {
    fn default() -> Self {
        Self {
            mapping: DEFAULT_CONFUSIONS
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
