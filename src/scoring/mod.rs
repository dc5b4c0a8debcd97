pub mod confusion;
pub mod edit_distance;
pub mod report;

use crate::config::{AccuracyBounds, EmptyReferencePolicy, Granularity, ScoringOptions};
use crate::types::ScoreResult;

use self::confusion::ConfusionMap;
use self::edit_distance::levenshtein;

/// Accuracy of `predicted` against `reference` after confusion-map normalization,
/// with default options (phoneme granularity, empty reference scores 1.0, clamped).
pub fn score<S: AsRef<str>>(
    predicted: &[S],
    reference: &[S],
    confusion_map: &ConfusionMap,
) -> f64 {
    score_sequences(
        predicted,
        reference,
        Some(confusion_map),
        &ScoringOptions::default(),
    )
    .accuracy
}

/// Normalizes both sequences, aligns them and returns the full breakdown.
pub fn score_sequences<S: AsRef<str>>(
    predicted: &[S],
    reference: &[S],
    confusion_map: Option<&ConfusionMap>,
    options: &ScoringOptions,
) -> ScoreResult {
    let (predicted, reference) = match confusion_map {
        Some(map) => (map.normalize(predicted), map.normalize(reference)),
        None => (to_owned(predicted), to_owned(reference)),
    };

    let (distance, reference_len) = match options.granularity {
        Granularity::Phoneme => (levenshtein(&predicted, &reference), reference.len()),
        Granularity::Character => {
            let predicted_chars = flatten_chars(&predicted);
            let reference_chars = flatten_chars(&reference);
            (
                levenshtein(&predicted_chars, &reference_chars),
                reference_chars.len(),
            )
        }
    };

    let error_rate = if reference_len > 0 {
        distance as f64 / reference_len as f64
    } else {
        match options.empty_reference {
            EmptyReferencePolicy::Perfect => 0.0,
            EmptyReferencePolicy::Zero => 1.0,
        }
    };

    let raw_accuracy = 1.0 - error_rate;
    let accuracy = match options.bounds {
        AccuracyBounds::Clamped => raw_accuracy.clamp(0.0, 1.0),
        AccuracyBounds::Unclamped => raw_accuracy,
    };

    tracing::debug!(
        granularity = options.granularity.as_str(),
        distance,
        reference_len,
        error_rate = format!("{error_rate:.3}"),
        accuracy = format!("{accuracy:.3}"),
        "scoring: aligned predicted against reference"
    );

    ScoreResult {
        predicted,
        reference,
        distance,
        reference_len,
        error_rate,
        accuracy,
    }
}

fn to_owned<S: AsRef<str>>(seq: &[S]) -> Vec<String> {
    seq.iter().map(|s| s.as_ref().to_string()).collect()
}

fn flatten_chars(units: &[String]) -> Vec<char> {
    units.iter().flat_map(|u| u.chars()).collect()
}
