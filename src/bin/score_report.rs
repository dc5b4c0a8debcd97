use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use phoneme_accuracy::{
    aggregate_reports, compute_case_report, AccuracyBounds, CaseFailure, EmptyReferencePolicy,
    Granularity, Meta, PronunciationScorer, PronunciationScorerBuilder, Report, ScorerConfig,
    ScoringInput,
};

#[path = "score_report/json_report_formatter.rs"]
mod json_report_formatter;

const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GranularityChoice {
    Phoneme,
    Character,
}

impl From<GranularityChoice> for Granularity {
    fn from(choice: GranularityChoice) -> Self {
        match choice {
            GranularityChoice::Phoneme => Granularity::Phoneme,
            GranularityChoice::Character => Granularity::Character,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmptyReferenceChoice {
    /// Empty reference scores 1.0.
    Perfect,
    /// Empty reference scores 0.0.
    Zero,
}

impl From<EmptyReferenceChoice> for EmptyReferencePolicy {
    fn from(choice: EmptyReferenceChoice) -> Self {
        match choice {
            EmptyReferenceChoice::Perfect => EmptyReferencePolicy::Perfect,
            EmptyReferenceChoice::Zero => EmptyReferencePolicy::Zero,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "score_report")]
#[command(about = "Score pre-decoded CTC token sequences against expected pronunciations")]
struct Args {
    /// JSON array of `{ "id", "tokens", "expected" }` cases.
    #[arg(long, env = "PHONEME_ACCURACY_CASES")]
    cases: PathBuf,
    /// Scorer config JSON; command-line flags override its fields.
    #[arg(long, env = "PHONEME_ACCURACY_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "PHONEME_ACCURACY_VOCAB")]
    vocab: Option<PathBuf>,
    #[arg(long, env = "PHONEME_ACCURACY_DICTIONARY")]
    dictionary: Option<PathBuf>,
    #[arg(long, env = "PHONEME_ACCURACY_CONFUSION_MAP")]
    confusion_map: Option<PathBuf>,
    #[arg(long, env = "PHONEME_ACCURACY_GRANULARITY", value_enum)]
    granularity: Option<GranularityChoice>,
    #[arg(long, env = "PHONEME_ACCURACY_EMPTY_REFERENCE", value_enum)]
    empty_reference: Option<EmptyReferenceChoice>,
    /// Report raw `1 - error_rate`, which can be negative.
    #[arg(long, env = "PHONEME_ACCURACY_UNCLAMPED", default_value_t = false)]
    unclamped: bool,
    /// Output path; the report goes to stdout when unset.
    #[arg(long, env = "PHONEME_ACCURACY_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "PHONEME_ACCURACY_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "PHONEME_ACCURACY_OFFSET", default_value_t = 0)]
    offset: usize,
}

#[derive(Debug, Deserialize)]
struct Case {
    id: String,
    #[serde(flatten)]
    input: ScoringInput,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("score_report: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let mut cases = load_cases(&args.cases)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let vocab_path = config.vocab_path.clone();
    let scorer = PronunciationScorerBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build PronunciationScorer: {err}"))?;

    let report = score_cases(&scorer, cases, &vocab_path);
    json_report_formatter::write_report(args.out.as_deref(), &report)?;
    eprintln!("{}", json_report_formatter::summary_line(&report));
    Ok(())
}

fn resolve_config(args: &Args) -> Result<ScorerConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => ScorerConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ScorerConfig::default(),
    };

    if let Some(vocab) = args.vocab.as_ref() {
        config.vocab_path = path_string(vocab);
    }
    if let Some(dictionary) = args.dictionary.as_ref() {
        config.dictionary_path = Some(path_string(dictionary));
    }
    if let Some(confusion_map) = args.confusion_map.as_ref() {
        config.confusion_map_path = Some(path_string(confusion_map));
    }
    if let Some(granularity) = args.granularity {
        config.scoring.granularity = granularity.into();
    }
    if let Some(empty_reference) = args.empty_reference {
        config.scoring.empty_reference = empty_reference.into();
    }
    if args.unclamped {
        config.scoring.bounds = AccuracyBounds::Unclamped;
    }

    if config.vocab_path.is_empty() {
        return Err("No vocabulary given; pass --vocab or set vocab_path in --config.".to_string());
    }
    require_path_exists(Path::new(&config.vocab_path), "Missing model vocabulary (vocab.json).")?;
    Ok(config)
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    require_path_exists(path, "Missing cases file.")?;
    let data = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases '{}': {err}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse cases '{}': {err}", path.display()))
}

fn score_cases(scorer: &PronunciationScorer, cases: Vec<Case>, vocab_path: &str) -> Report {
    let case_count = cases.len();
    let mut reports = Vec::with_capacity(case_count);
    let mut failures = Vec::new();

    for case in cases {
        match scorer.evaluate(&case.input) {
            Ok(result) => reports.push(compute_case_report(
                case.id,
                case.input.expected,
                case.input.tokens.len(),
                result,
            )),
            Err(err) => {
                tracing::warn!(case = case.id.as_str(), error = %err, "score_report: case failed");
                failures.push(CaseFailure {
                    id: case.id,
                    error: err.to_string(),
                });
            }
        }
    }

    let aggregates = aggregate_reports(&reports);
    Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            vocab_path: vocab_path.to_string(),
            pad_id: scorer.pad_id(),
            granularity: scorer.options().granularity.as_str().to_string(),
            case_count,
        },
        cases: reports,
        failures,
        aggregates,
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}
