use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::ScoringError;

/// Id → symbol table of a CTC model, plus the ids dropped on decode.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    symbols: HashMap<usize, String>,
    ids: HashMap<String, usize>,
    special_ids: HashSet<usize>,
    word_delimiter_id: Option<usize>,
}

impl Vocabulary {
    /// Builds a vocabulary from `(symbol, id)` pairs. Ids need not be dense.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut symbols = HashMap::new();
        let mut ids = HashMap::new();
        for (symbol, id) in pairs {
            let symbol = symbol.into();
            ids.insert(symbol.clone(), id);
            symbols.insert(id, symbol);
        }
        Self {
            symbols,
            ids,
            special_ids: HashSet::new(),
            word_delimiter_id: None,
        }
    }

    /// Parses a HuggingFace `vocab.json` (`{"symbol": id}`).
    pub fn from_json_str(data: &str) -> Result<Self, ScoringError> {
        let raw: HashMap<String, usize> =
            serde_json::from_str(data).map_err(|e| ScoringError::json("parse vocab.json", e))?;
        if raw.is_empty() {
            return Err(ScoringError::invalid_input("vocabulary is empty"));
        }
        Ok(Self::from_pairs(raw))
    }

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| ScoringError::io("read vocab.json", e))?;
        Self::from_json_str(&data)
    }

    /// Marks the listed symbols as special. Symbols absent from the table are ignored.
    pub fn with_special_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            if let Some(&id) = self.ids.get(token.as_ref()) {
                self.special_ids.insert(id);
            }
        }
        self
    }

    /// Sets the symbol that decodes as a word boundary (whitespace).
    pub fn with_word_delimiter(mut self, delimiter: Option<&str>) -> Self {
        self.word_delimiter_id = delimiter.and_then(|d| self.ids.get(d).copied());
        self
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn symbol(&self, id: usize) -> Option<&str> {
        self.symbols.get(&id).map(String::as_str)
    }

    pub fn id_of(&self, symbol: &str) -> Option<usize> {
        self.ids.get(symbol).copied()
    }

    pub fn contains_id(&self, id: usize) -> bool {
        self.symbol(id).is_some()
    }

    pub fn is_special(&self, id: usize) -> bool {
        self.special_ids.contains(&id)
    }

    pub fn is_word_delimiter(&self, id: usize) -> bool {
        self.word_delimiter_id == Some(id)
    }
}
