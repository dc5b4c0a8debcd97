use crate::config::ScoringOptions;
use crate::decoding::vocabulary::Vocabulary;
use crate::scoring::confusion::ConfusionMap;
use crate::types::ScoreResult;

pub use crate::pronunciation::PronunciationLookup;

pub trait TokenSegmenter: Send + Sync {
    fn segment(&self, tokens: &[usize], pad_id: usize, vocab: &Vocabulary) -> Vec<String>;
}

pub trait AlignmentScorer: Send + Sync {
    fn score(
        &self,
        predicted: &[String],
        reference: &[String],
        confusion_map: Option<&ConfusionMap>,
        options: &ScoringOptions,
    ) -> ScoreResult;
}
