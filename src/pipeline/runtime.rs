use crate::config::ScoringOptions;
use crate::decoding::vocabulary::Vocabulary;
use crate::error::ScoringError;
use crate::pronunciation::sentence_to_phonemes;
use crate::pipeline::traits::{AlignmentScorer, PronunciationLookup, TokenSegmenter};
use crate::scoring::confusion::ConfusionMap;
use crate::types::{ScoreResult, ScoringInput};

/// Read-only scoring configuration, built once and shared by reference.
pub struct PronunciationScorer {
    vocab: Vocabulary,
    pad_id: usize,
    confusion_map: ConfusionMap,
    options: ScoringOptions,
    segmenter: Box<dyn TokenSegmenter>,
    alignment_scorer: Box<dyn AlignmentScorer>,
    pronunciation_lookup: Option<Box<dyn PronunciationLookup>>,
}

pub(crate) struct PronunciationScorerParts {
    pub vocab: Vocabulary,
    pub pad_id: usize,
    pub confusion_map: ConfusionMap,
    pub options: ScoringOptions,
    pub segmenter: Box<dyn TokenSegmenter>,
    pub alignment_scorer: Box<dyn AlignmentScorer>,
    pub pronunciation_lookup: Option<Box<dyn PronunciationLookup>>,
}

impl PronunciationScorer {
    pub(crate) fn from_parts(parts: PronunciationScorerParts) -> Self {
        Self {
            vocab: parts.vocab,
            pad_id: parts.pad_id,
            confusion_map: parts.confusion_map,
            options: parts.options,
            segmenter: parts.segmenter,
            alignment_scorer: parts.alignment_scorer,
            pronunciation_lookup: parts.pronunciation_lookup,
        }
    }

    pub fn pad_id(&self) -> usize {
        self.pad_id
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn confusion_map(&self) -> &ConfusionMap {
        &self.confusion_map
    }

    pub fn options(&self) -> &ScoringOptions {
        &self.options
    }

    /// Rejects ids the vocabulary has no symbol for.
    pub fn validate_tokens(&self, tokens: &[usize]) -> Result<(), ScoringError> {
        if let Some((frame, id)) = tokens
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, id)| !self.vocab.contains_id(id))
        {
            return Err(ScoringError::invalid_input(format!(
                "token id {id} at frame {frame} is not in the vocabulary"
            )));
        }
        Ok(())
    }

    pub fn segment(&self, tokens: &[usize]) -> Vec<String> {
        self.segmenter.segment(tokens, self.pad_id, &self.vocab)
    }

    /// Reference phonemes for `expected` through the configured dictionary.
    pub fn reference_for(&self, expected: &str) -> Result<Vec<String>, ScoringError> {
        let lookup = self.pronunciation_lookup.as_deref().ok_or_else(|| {
            ScoringError::invalid_input("no pronunciation dictionary configured")
        })?;
        Ok(sentence_to_phonemes(expected, lookup))
    }

    /// Scores decoded tokens against the reference built from `input.expected`.
    ///
    /// A missing or blank expected text scores against an empty reference.
    pub fn evaluate(&self, input: &ScoringInput) -> Result<ScoreResult, ScoringError> {
        let reference = match input.expected.as_deref().map(str::trim) {
            Some(expected) if !expected.is_empty() => self.reference_for(expected)?,
            _ => Vec::new(),
        };
        self.evaluate_against(&input.tokens, &reference)
    }

    /// Scores decoded tokens against a caller-supplied reference phoneme sequence.
    pub fn evaluate_against(
        &self,
        tokens: &[usize],
        reference: &[String],
    ) -> Result<ScoreResult, ScoringError> {
        self.validate_tokens(tokens)?;
        let predicted = self.segment(tokens);
        if predicted.is_empty() && !tokens.is_empty() {
            tracing::debug!(
                frames = tokens.len(),
                "pronunciation scorer: no phonemes decoded from non-empty frames"
            );
        }
        Ok(self.alignment_scorer.score(
            &predicted,
            reference,
            Some(&self.confusion_map),
            &self.options,
        ))
    }
}
