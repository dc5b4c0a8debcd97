use serde::Serialize;

use crate::pronunciation::UNKNOWN_WORD_PREFIX;
use crate::types::ScoreResult;

const LOW_ACCURACY_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CaseFailure>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub vocab_path: String,
    pub pad_id: usize,
    pub granularity: String,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    pub frame_count: usize,
    pub predicted: Vec<String>,
    pub reference: Vec<String>,
    pub distance: usize,
    pub reference_len: usize,
    pub error_rate: f64,
    pub accuracy: f64,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseFailure {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub case_count: usize,
    pub empty_reference_count: usize,
    pub low_accuracy_count: usize,
    pub mean_accuracy: Option<f64>,
    pub min_accuracy: Option<f64>,
    /// Total distance over total reference length (micro-averaged error rate).
    pub micro_error_rate: Option<f64>,
    pub total_distance: usize,
    pub total_reference_len: usize,
}

pub fn compute_case_report(
    id: impl Into<String>,
    expected: Option<String>,
    frame_count: usize,
    result: ScoreResult,
) -> CaseReport {
    let mut notes = Vec::new();
    if result.reference_len == 0 {
        notes.push("empty reference".to_string());
    } else if result.distance > result.reference_len {
        notes.push("distance exceeds reference length".to_string());
    }
    let unknown = result
        .reference
        .iter()
        .filter(|unit| unit.starts_with(UNKNOWN_WORD_PREFIX))
        .count();
    if unknown > 0 {
        notes.push(format!("{unknown} reference word(s) missing from dictionary"));
    }
    if result.predicted.is_empty() {
        notes.push("no phonemes decoded".to_string());
    }

    CaseReport {
        id: id.into(),
        expected,
        frame_count,
        predicted: result.predicted,
        reference: result.reference,
        distance: result.distance,
        reference_len: result.reference_len,
        error_rate: result.error_rate,
        accuracy: result.accuracy,
        notes,
    }
}

pub fn aggregate_reports(cases: &[CaseReport]) -> AggregateReport {
    let case_count = cases.len();
    let empty_reference_count = cases.iter().filter(|c| c.reference_len == 0).count();
    let low_accuracy_count = cases
        .iter()
        .filter(|c| c.accuracy < LOW_ACCURACY_THRESHOLD)
        .count();
    let total_distance: usize = cases.iter().map(|c| c.distance).sum();
    let total_reference_len: usize = cases.iter().map(|c| c.reference_len).sum();

    let mean_accuracy = if case_count > 0 {
        Some(cases.iter().map(|c| c.accuracy).sum::<f64>() / case_count as f64)
    } else {
        None
    };
    let min_accuracy = cases.iter().map(|c| c.accuracy).reduce(f64::min);
    let micro_error_rate = if total_reference_len > 0 {
        Some(total_distance as f64 / total_reference_len as f64)
    } else {
        None
    };

    AggregateReport {
        case_count,
        empty_reference_count,
        low_accuracy_count,
        mean_accuracy,
        min_accuracy,
        micro_error_rate,
        total_distance,
        total_reference_len,
    }
}
