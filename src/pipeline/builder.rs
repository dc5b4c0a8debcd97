use std::path::Path;

use crate::config::{ScorerConfig, ScoringOptions};
use crate::decoding::vocabulary::Vocabulary;
use crate::error::ScoringError;
use crate::pipeline::defaults::{CtcTokenSegmenter, LevenshteinScorer};
use crate::pipeline::runtime::{PronunciationScorer, PronunciationScorerParts};
use crate::pipeline::traits::{AlignmentScorer, PronunciationLookup, TokenSegmenter};
use crate::pronunciation::CmuDictionary;
use crate::scoring::confusion::ConfusionMap;

pub struct PronunciationScorerBuilder {
    config: ScorerConfig,
    vocabulary: Option<Vocabulary>,
    confusion_map: Option<ConfusionMap>,
    scoring_options: Option<ScoringOptions>,
    segmenter: Option<Box<dyn TokenSegmenter>>,
    alignment_scorer: Option<Box<dyn AlignmentScorer>>,
    pronunciation_lookup: Option<Box<dyn PronunciationLookup>>,
}

impl PronunciationScorerBuilder {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            vocabulary: None,
            confusion_map: None,
            scoring_options: None,
            segmenter: None,
            alignment_scorer: None,
            pronunciation_lookup: None,
        }
    }

    /// Uses `vocabulary` as is instead of loading `vocab_path`; special tokens
    /// and the word delimiter from the config are not applied to it.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn with_confusion_map(mut self, confusion_map: ConfusionMap) -> Self {
        self.confusion_map = Some(confusion_map);
        self
    }

    pub fn with_scoring_options(mut self, options: ScoringOptions) -> Self {
        self.scoring_options = Some(options);
        self
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn TokenSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn with_alignment_scorer(mut self, alignment_scorer: Box<dyn AlignmentScorer>) -> Self {
        self.alignment_scorer = Some(alignment_scorer);
        self
    }

    pub fn with_pronunciation_lookup(mut self, lookup: Box<dyn PronunciationLookup>) -> Self {
        self.pronunciation_lookup = Some(lookup);
        self
    }

    pub fn build(self) -> Result<PronunciationScorer, ScoringError> {
        let vocab = match self.vocabulary {
            Some(vocab) => vocab,
            None => Vocabulary::load(Path::new(&self.config.vocab_path))?
                .with_special_tokens(&self.config.special_tokens)
                .with_word_delimiter(self.config.word_delimiter.as_deref()),
        };

        let pad_id = resolve_pad_id(&self.config, &vocab)?;

        let confusion_map = match (self.confusion_map, &self.config.confusion_map_path) {
            (Some(map), _) => map,
            (None, Some(path)) => ConfusionMap::load(Path::new(path))?,
            (None, None) => ConfusionMap::default(),
        };

        let pronunciation_lookup = match (self.pronunciation_lookup, &self.config.dictionary_path) {
            (Some(lookup), _) => Some(lookup),
            (None, Some(path)) => Some(
                Box::new(CmuDictionary::load(Path::new(path))?) as Box<dyn PronunciationLookup>
            ),
            (None, None) => None,
        };

        let options = self.scoring_options.unwrap_or(self.config.scoring);

        tracing::info!(
            vocab = vocab.len(),
            pad_id,
            confusions = confusion_map.len(),
            granularity = options.granularity.as_str(),
            has_dictionary = pronunciation_lookup.is_some(),
            "pronunciation scorer configured"
        );

        let silence_token = self.config.silence_token.clone();
        Ok(PronunciationScorer::from_parts(PronunciationScorerParts {
            vocab,
            pad_id,
            confusion_map,
            options,
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Box::new(CtcTokenSegmenter::new(silence_token))),
            alignment_scorer: self
                .alignment_scorer
                .unwrap_or_else(|| Box::new(LevenshteinScorer)),
            pronunciation_lookup,
        }))
    }
}

fn resolve_pad_id(config: &ScorerConfig, vocab: &Vocabulary) -> Result<usize, ScoringError> {
    let pad_id = match config.pad_token_id {
        Some(id) => id,
        None => vocab.id_of(&config.pad_token).ok_or_else(|| {
            ScoringError::invalid_input(format!(
                "pad token '{}' is not in the vocabulary",
                config.pad_token
            ))
        })?,
    };
    if !vocab.contains_id(pad_id) {
        return Err(ScoringError::invalid_input(format!(
            "pad id {pad_id} is not in the vocabulary"
        )));
    }
    Ok(pad_id)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::{AccuracyBounds, Granularity};
    use crate::types::ScoringInput;

    const VOCAB_JSON: &str =
        r#"{"[PAD]": 0, "<s>": 1, "</s>": 2, "|": 3, "k": 4, "ae": 5, "t": 6, "h#": 7}"#;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    fn config_for(vocab: &NamedTempFile) -> ScorerConfig {
        ScorerConfig {
            vocab_path: vocab.path().to_string_lossy().to_string(),
            ..ScorerConfig::default()
        }
    }

    #[test]
    fn build_resolves_pad_from_vocab() {
        let vocab = temp_file(VOCAB_JSON);
        let scorer = PronunciationScorerBuilder::new(config_for(&vocab))
            .build()
            .expect("build should succeed");
        assert_eq!(scorer.pad_id(), 0);
        assert!(scorer.vocabulary().is_special(1));
        assert!(scorer.vocabulary().is_word_delimiter(3));
        assert_eq!(scorer.confusion_map(), &ConfusionMap::default());
        assert_eq!(scorer.segment(&[1, 7, 4, 4, 3, 5, 6, 2]), vec!["k", "ae", "t"]);
    }

    #[test]
    fn build_honours_explicit_pad_id() {
        let vocab = temp_file(VOCAB_JSON);
        let config = ScorerConfig {
            pad_token_id: Some(3),
            ..config_for(&vocab)
        };
        let scorer = PronunciationScorerBuilder::new(config).build().unwrap();
        assert_eq!(scorer.pad_id(), 3);
    }

    #[test]
    fn build_fails_when_pad_token_missing() {
        let vocab = temp_file(r#"{"k": 1, "ae": 2}"#);
        let result = PronunciationScorerBuilder::new(config_for(&vocab)).build();
        assert!(matches!(result, Err(ScoringError::InvalidInput { .. })));
    }

    #[test]
    fn build_fails_when_explicit_pad_id_out_of_range() {
        let vocab = temp_file(VOCAB_JSON);
        let config = ScorerConfig {
            pad_token_id: Some(64),
            ..config_for(&vocab)
        };
        assert!(PronunciationScorerBuilder::new(config).build().is_err());
    }

    #[test]
    fn build_fails_on_invalid_vocab_path() {
        let config = ScorerConfig {
            vocab_path: "/nonexistent/vocab.json".to_string(),
            ..ScorerConfig::default()
        };
        let result = PronunciationScorerBuilder::new(config).build();
        assert!(matches!(result, Err(ScoringError::Io { .. })));
    }

    #[test]
    fn build_loads_confusion_map_and_dictionary_files() {
        let vocab = temp_file(VOCAB_JSON);
        let confusions = temp_file(r#"{"t": "d"}"#);
        let dictionary = temp_file("CAT  K AE1 T\n");
        let config = ScorerConfig {
            confusion_map_path: Some(confusions.path().to_string_lossy().to_string()),
            dictionary_path: Some(dictionary.path().to_string_lossy().to_string()),
            ..config_for(&vocab)
        };
        let scorer = PronunciationScorerBuilder::new(config).build().unwrap();
        let result = scorer
            .evaluate(&ScoringInput {
                tokens: vec![4, 5, 6],
                expected: Some("cat".to_string()),
            })
            .unwrap();
        assert_eq!(result.reference, vec!["k", "ae", "d"]);
        assert_eq!(result.accuracy, 1.0);
    }

    #[test]
    fn build_fails_on_chained_confusion_map_file() {
        let vocab = temp_file(VOCAB_JSON);
        let confusions = temp_file(r#"{"t": "d", "d": "k"}"#);
        let config = ScorerConfig {
            confusion_map_path: Some(confusions.path().to_string_lossy().to_string()),
            ..config_for(&vocab)
        };
        let result = PronunciationScorerBuilder::new(config).build();
        assert!(matches!(result, Err(ScoringError::InvalidInput { .. })));
    }

    #[test]
    fn overrides_take_precedence_over_config() {
        let vocabulary = Vocabulary::from_pairs([("[PAD]", 0), ("k", 1)]);
        let options = ScoringOptions {
            granularity: Granularity::Character,
            bounds: AccuracyBounds::Unclamped,
            ..ScoringOptions::default()
        };
        let scorer = PronunciationScorerBuilder::new(ScorerConfig::default())
            .with_vocabulary(vocabulary)
            .with_confusion_map(ConfusionMap::identity())
            .with_scoring_options(options)
            .build()
            .unwrap();
        assert!(scorer.confusion_map().is_empty());
        assert_eq!(scorer.options(), &options);
        let reference = vec!["x".to_string()];
        let result = scorer.evaluate_against(&[1, 0, 1, 0, 1], &reference).unwrap();
        assert_eq!(result.distance, 3);
        assert_eq!(result.accuracy, -2.0);
    }
}
