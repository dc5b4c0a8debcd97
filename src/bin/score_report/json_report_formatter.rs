use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use phoneme_accuracy::Report;

/// Writes the report as pretty JSON to `path`, or to stdout when no path is given.
pub fn write_report(path: Option<&Path>, report: &Report) -> Result<(), String> {
    let Some(path) = path else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        return write_json(&mut handle, report)
            .map_err(|err| format!("Failed to write report to stdout: {err}"));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create report output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create report file '{}': {err}", path.display()))?;
    write_json(&mut file, report)
        .map_err(|err| format!("Failed to write report file '{}': {err}", path.display()))
}

fn write_json<W: Write>(writer: &mut W, report: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writer.write_all(b"\n")
}

/// One-line human summary for stderr.
pub fn summary_line(report: &Report) -> String {
    let agg = &report.aggregates;
    let fmt = |value: Option<f64>| value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"));
    format!(
        "{} case(s) scored, {} failed; mean accuracy {}, min {}, micro error rate {}",
        agg.case_count,
        report.failures.len(),
        fmt(agg.mean_accuracy),
        fmt(agg.min_accuracy),
        fmt(agg.micro_error_rate),
    )
}
