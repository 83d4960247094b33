// src/presentation.rs
use crate::error::Result;
use crate::options::OutputFormat;
use partline_engine::{CountReport, PartitionFailure};
use partline_shared_kernel::{FileName, FilePath, FileSize, LineCount};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use std::time::Duration;

/// A finished run, ready to be rendered.
#[derive(Debug)]
pub struct Summary<'a> {
    pub path: &'a FilePath,
    pub size: FileSize,
    pub parallelism: usize,
    pub report: &'a CountReport,
    pub elapsed: Duration,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    file: &'a FilePath,
    name: FileName,
    size: FileSize,
    lines: LineCount,
    partitions: usize,
    parallelism: usize,
    threads: usize,
    bytes_scanned: u64,
    elapsed_ms: u64,
    complete: bool,
    failures: &'a [PartitionFailure],
}

/// Render `summary` in the requested format, without a trailing newline.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(summary: &Summary<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(summary)),
        OutputFormat::Json => render_json(summary),
    }
}

/// Write the rendered summary to `out`.
///
/// # Errors
/// Returns an error if rendering or writing fails.
pub fn print_results<W: Write>(out: &mut W, summary: &Summary<'_>, format: OutputFormat) -> Result<()> {
    let rendered = render(summary, format)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn render_table(summary: &Summary<'_>) -> String {
    let report = summary.report;
    let mut out = String::new();
    let _ = writeln!(out, "   File name: {}", summary.path.file_name());
    let _ = writeln!(out, "   File size: {:#}", summary.size);
    let _ = writeln!(out, "  Line count: {:#}", report.total);
    let _ = writeln!(out, "  Partitions: {}", report.partitions);
    let _ = writeln!(out, "  Cores used: {}", summary.parallelism);
    let _ = write!(out, "Time elapsed: {}ms", summary.elapsed.as_millis());
    if !report.is_complete() {
        let _ = write!(
            out,
            "\n    Warnings: {} of {} partitions failed; line count is a lower bound",
            report.failures.len(),
            report.partitions
        );
    }
    out
}

fn render_json(summary: &Summary<'_>) -> Result<String> {
    let report = summary.report;
    let json = JsonSummary {
        file: summary.path,
        name: summary.path.file_name(),
        size: summary.size,
        lines: report.total,
        partitions: report.partitions,
        parallelism: summary.parallelism,
        threads: report.threads,
        bytes_scanned: report.bytes_scanned,
        elapsed_ms: u64::try_from(summary.elapsed.as_millis()).unwrap_or(u64::MAX),
        complete: report.is_complete(),
        failures: &report.failures,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
