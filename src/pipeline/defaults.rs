use crate::config::{ScorerConfig, ScoringOptions};
use crate::decoding::segmentation::segment_tokens_with_silence;
use crate::decoding::vocabulary::Vocabulary;
use crate::pipeline::traits::{AlignmentScorer, TokenSegmenter};
use crate::scoring::confusion::ConfusionMap;
use crate::scoring::score_sequences;
use crate::types::ScoreResult;

/// Boundary-preserving greedy CTC segmenter.
pub struct CtcTokenSegmenter {
    silence_token: Option<String>,
}

impl CtcTokenSegmenter {
    pub fn new(silence_token: Option<String>) -> Self {
        Self { silence_token }
    }
}

impl Default for CtcTokenSegmenter {
    fn default() -> Self {
        Self::new(Some(ScorerConfig::DEFAULT_SILENCE_TOKEN.to_string()))
    }
}

impl TokenSegmenter for CtcTokenSegmenter {
    fn segment(&self, tokens: &[usize], pad_id: usize, vocab: &Vocabulary) -> Vec<String> {
        segment_tokens_with_silence(tokens, pad_id, vocab, self.silence_token.as_deref())
    }
}

pub struct LevenshteinScorer;

impl AlignmentScorer for LevenshteinScorer {
    fn score(
        &self,
        predicted: &[String],
        reference: &[String],
        confusion_map: Option<&ConfusionMap>,
        options: &ScoringOptions,
    ) -> ScoreResult {
        score_sequences(predicted, reference, confusion_map, options)
    }
}

#[cfg(test)]
mod tests {
    use crate::decoding::segmentation::segment_tokens;

    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::from_pairs([("[PAD]", 0), ("k", 1), ("ae", 2), ("h#", 3)])
    }

    #[test]
    fn ctc_segmenter_matches_free_function() {
        let segmenter = CtcTokenSegmenter::default();
        let tokens = [3, 3, 1, 1, 0, 2, 3];
        assert_eq!(
            segmenter.segment(&tokens, 0, &vocab()),
            segment_tokens(&tokens, 0, &vocab())
        );
    }

    #[test]
    fn ctc_segmenter_custom_silence() {
        let segmenter = CtcTokenSegmenter::new(None);
        assert_eq!(segmenter.segment(&[3, 1], 0, &vocab()), vec!["h#", "k"]);
    }

    #[test]
    fn levenshtein_scorer_matches_free_function() {
        let scorer = LevenshteinScorer;
        let predicted = vec!["d".to_string(), "ae".to_string()];
        let reference = vec!["k".to_string(), "ae".to_string()];
        let map = ConfusionMap::default();
        let options = ScoringOptions::default();
        assert_eq!(
            scorer.score(&predicted, &reference, Some(&map), &options),
            score_sequences(&predicted, &reference, Some(&map), &options)
        );
    }
}
