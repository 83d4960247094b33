// src/lib.rs
// Transitive dependencies pull in more than one version of a few crates.
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod parsers;
pub mod presentation;

use crate::args::Args;
use crate::config::RunConfig;
use crate::error::Result;
use crate::presentation::Summary;
use partline_engine::ScanTarget;
use std::time::Instant;

/// Count the file named by `args` and print the summary to stdout.
///
/// # Errors
/// Returns an error if the file cannot be inspected, if the worker pool cannot
/// be started, under `--strict` if any partition fails, or if output fails.
pub fn run(args: Args) -> Result<()> {
    let config = RunConfig::try_from(args)?;
    tracing::debug!(?config, "resolved configuration");

    let started = Instant::now();
    let target = ScanTarget::from_path(&config.path, config.buffer_size)?;
    let report = partline_engine::run(&target, &config.engine)?;
    let elapsed = started.elapsed();

    tracing::info!(
        lines = report.total.value(),
        partitions = report.partitions,
        elapsed = ?elapsed,
        "count finished"
    );

    let summary = Summary {
        path: target.path(),
        size: target.size(),
        parallelism: config.engine.parallelism.get(),
        report: &report,
        elapsed,
    };
    let stdout = std::io::stdout();
    presentation::print_results(&mut stdout.lock(), &summary, config.format)
}
