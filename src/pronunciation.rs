//! Reference phoneme sequences from a pronunciation dictionary.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::error::ScoringError;

/// Prefix of the placeholder unit standing in for a word missing from the dictionary.
pub const UNKNOWN_WORD_PREFIX: &str = "unk:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no pronunciation for word '{word}'")]
pub struct UnknownWord {
    pub word: String,
}

impl UnknownWord {
    /// The single reference unit that keeps the word counted in the reference length.
    pub fn placeholder(&self) -> String {
        format!("{UNKNOWN_WORD_PREFIX}{}", self.word)
    }
}

/// Source of canonical pronunciations.
pub trait PronunciationLookup: Send + Sync {
    /// First (canonical) pronunciation of `word`, phones as stored (stress digits included).
    fn phones_for_word(&self, word: &str) -> Option<Vec<String>>;
}

/// Looks up one word and strips stress digits from its phones.
pub fn lookup_word(
    word: &str,
    lookup: &dyn PronunciationLookup,
) -> Result<Vec<String>, UnknownWord> {
    let phones = lookup
        .phones_for_word(word)
        .filter(|phones| !phones.is_empty())
        .ok_or_else(|| UnknownWord {
            word: word.to_string(),
        })?;
    Ok(phones.iter().map(|p| strip_stress(p)).collect())
}

/// Flattens the pronunciations of every whitespace-separated word in `sentence`.
///
/// Unknown words contribute one `unk:<word>` unit each.
pub fn sentence_to_phonemes(sentence: &str, lookup: &dyn PronunciationLookup) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    let mut phonemes = Vec::new();
    for word in lowered.split_whitespace() {
        match lookup_word(word, lookup) {
            Ok(phones) => phonemes.extend(phones),
            Err(unknown) => {
                tracing::warn!(word = unknown.word.as_str(), "reference: word not in dictionary");
                phonemes.push(unknown.placeholder());
            }
        }
    }
    phonemes
}

fn strip_stress(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect::<String>()
        .to_lowercase()
}

/// CMU Pronouncing Dictionary in its plain-text format.
///
/// Lines look like `WORD  W ER1 D`; alternates are spelled `WORD(2)`, `;;;`
/// starts a comment line and ` #` starts a trailing comment.
#[derive(Debug, Clone, Default)]
pub struct CmuDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl CmuDictionary {
    pub fn parse(data: &str) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let line = line.split(" #").next().unwrap_or(line);
            let mut fields = line.split_whitespace();
            let Some(head) = fields.next() else {
                continue;
            };
            let phones: Vec<String> = fields.map(str::to_string).collect();
            if phones.is_empty() {
                continue;
            }
            let word = strip_alternate_marker(head).to_lowercase();
            // First listed pronunciation wins.
            entries.entry(word).or_insert(phones);
        }
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read pronunciation dictionary", e))?;
        let dictionary = Self::parse(&data);
        if dictionary.is_empty() {
            return Err(ScoringError::invalid_input(format!(
                "pronunciation dictionary '{}' has no entries",
                path.display()
            )));
        }
        tracing::debug!(
            entries = dictionary.len(),
            path = %path.display(),
            "reference: loaded pronunciation dictionary"
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drops a trailing `(N)` alternate marker; other parentheses are part of the word.
fn strip_alternate_marker(head: &str) -> &str {
    let Some(body) = head.strip_suffix(')') else {
        return head;
    };
    match body.rsplit_once('(') {
        Some((word, index))
            if !word.is_empty()
                && !index.is_empty()
                && index.bytes().all(|b| b.is_ascii_digit()) =>
        {
            word
        }
        _ => head,
    }
}

impl PronunciationLookup for CmuDictionary {
    fn phones_for_word(&self, word: &str) -> Option<Vec<String>> {
        self.entries.get(&word.to_lowercase()).cloned()
    }
}
