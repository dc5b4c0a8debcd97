pub mod config;
pub mod decoding;
pub mod error;
pub mod pipeline;
pub mod pronunciation;
pub mod scoring;
pub mod types;

pub use config::{AccuracyBounds, EmptyReferencePolicy, Granularity, ScorerConfig, ScoringOptions};
pub use decoding::segmentation::{insert_boundary_pads, segment_tokens};
pub use decoding::vocabulary::Vocabulary;
pub use error::ScoringError;
pub use pipeline::builder::PronunciationScorerBuilder;
pub use pipeline::runtime::PronunciationScorer;
pub use pipeline::traits::{AlignmentScorer, PronunciationLookup, TokenSegmenter};
pub use pronunciation::{sentence_to_phonemes, CmuDictionary, UnknownWord};
pub use scoring::confusion::ConfusionMap;
pub use scoring::report::{
    aggregate_reports, compute_case_report, AggregateReport, CaseFailure, CaseReport, Meta, Report,
};
pub use scoring::{score, score_sequences};
pub use types::{ScoreResult, ScoringInput};
