use std::num::NonZeroUsize;

use partline_shared_kernel::LineCount;
use serde::{Serialize, Serializer};

use crate::config::{Config, ErrorPolicy, default_parallelism};
use crate::error::{EngineError, Result};
use crate::partition::{Partition, partition_ranges};
use crate::scanner::{self, ScanOutcome};
use crate::target::ScanTarget;

/// A partition whose scan stopped early.
#[derive(Debug, Serialize)]
pub struct PartitionFailure {
    pub partition: Partition,
    /// Terminators counted before the failure; already included in the total.
    pub lines: LineCount,
    pub bytes_read: u64,
    #[serde(serialize_with = "serialize_display")]
    pub error: EngineError,
}

/// Result of one counting job.
#[derive(Debug, Default, Serialize)]
pub struct CountReport {
    pub total: LineCount,
    pub partitions: usize,
    pub threads: usize,
    pub bytes_scanned: u64,
    pub failures: Vec<PartitionFailure>,
}

impl CountReport {
    /// `false` when at least one partition failed, i.e. `total` is a lower bound.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn serialize_display<S: Serializer>(error: &EngineError, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Count terminator bytes in `target` with the fail-soft policy.
///
/// # Errors
/// Only fails if the worker pool cannot be created.
pub fn count(target: &ScanTarget, parallelism: NonZeroUsize) -> Result<LineCount> {
    let config = Config {
        parallelism,
        policy: ErrorPolicy::FailSoft,
    };
    run(target, &config).map(|report| report.total)
}

/// Partition `target`, scan every partition concurrently and sum the results.
///
/// Every partition is spawned as its own scanner task on a pool built for
/// this job. The pool has at most one thread per logical CPU, however large
/// `config.parallelism` is, so a huge partition count queues tasks instead of
/// starting threads. Each task sends its outcome through a channel; the
/// channel is drained only after the pool scope has joined every task.
///
/// # Errors
/// Returns an error if the worker pool cannot be created, or under
/// [`ErrorPolicy::Strict`] the error of the lowest-indexed failed partition.
pub fn run(target: &ScanTarget, config: &Config) -> Result<CountReport> {
    let partitions = partition_ranges(target.size().bytes(), config.parallelism);
    if partitions.is_empty() {
        log::debug!("{}: empty file, nothing to scan", target.path());
        return Ok(CountReport::default());
    }

    let threads = worker_threads(partitions.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("partline-scan-{i}"))
        .build()
        .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

    log::debug!(
        "{}: {} bytes in {} partitions on {threads} threads, buffer {} bytes",
        target.path(),
        target.size(),
        partitions.len(),
        target.buffer_size()
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    let path = target.path().as_path();
    let buffer_size = target.buffer_size();

    pool.scope(|s| {
        for &partition in &partitions {
            let tx = tx.clone();
            s.spawn(move |_| {
                let outcome = scanner::scan(path, partition, buffer_size);
                log::debug!(
                    "partition {} [{}..{}): {} lines",
                    partition.index,
                    partition.start,
                    partition.end,
                    outcome.lines
                );
                let _ = tx.send(outcome);
            });
        }
    });
    drop(tx);

    let mut report = aggregate(rx.into_iter().collect(), config.policy)?;
    report.threads = threads;
    Ok(report)
}

/// Pool size for `partitions` scanner tasks: never more threads than tasks
/// or logical CPUs.
fn worker_threads(partitions: usize) -> usize {
    partitions.min(default_parallelism().get()).max(1)
}

/// Fold scanner outcomes into a report according to `policy`.
fn aggregate(mut outcomes: Vec<ScanOutcome>, policy: ErrorPolicy) -> Result<CountReport> {
    // Arrival order is arbitrary; sorting makes failure reporting deterministic.
    outcomes.sort_by_key(|o| o.partition.index);

    let mut report = CountReport {
        partitions: outcomes.len(),
        ..CountReport::default()
    };

    for outcome in outcomes {
        report.total += outcome.lines;
        report.bytes_scanned += outcome.bytes_read;

        let Some(error) = outcome.error else {
            continue;
        };
        if policy == ErrorPolicy::Strict {
            return Err(error);
        }

        log::warn!(
            "partition {} [{}..{}) stopped after {} bytes: {error}",
            outcome.partition.index,
            outcome.partition.start,
            outcome.partition.end,
            outcome.bytes_read
        );
        report.failures.push(PartitionFailure {
            partition: outcome.partition,
            lines: outcome.lines,
            bytes_read: outcome.bytes_read,
            error,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn outcome(index: usize, lines: u64, failed: bool) -> ScanOutcome {
        let start = index as u64 * 10;
        ScanOutcome {
            partition: Partition {
                index,
                start,
                end: start + 10,
            },
            lines: LineCount::from(lines),
            bytes_read: if failed { 4 } else { 10 },
            error: failed.then(|| EngineError::FileRead {
                path: PathBuf::from("data.log"),
                offset: start + 4,
                source: io::Error::other("device gone"),
            }),
        }
    }

    #[test]
    fn worker_threads_capped_by_cpus() {
        let cpus = default_parallelism().get();
        assert_eq!(worker_threads(1), 1);
        assert_eq!(worker_threads(100_000), cpus);
        assert_eq!(worker_threads(2), 2usize.min(cpus));
    }

    #[test]
    fn aggregate_sums_in_any_order() {
        let outcomes = vec![outcome(2, 5, false), outcome(0, 1, false), outcome(1, 7, false)];
        let report = aggregate(outcomes, ErrorPolicy::FailSoft).unwrap();
        assert_eq!(report.total, 13u64);
        assert_eq!(report.partitions, 3);
        assert_eq!(report.bytes_scanned, 30);
        assert!(report.is_complete());
    }

    #[test]
    fn fail_soft_keeps_partial_counts() {
        let outcomes = vec![outcome(0, 3, false), outcome(1, 2, true), outcome(2, 4, false)];
        let report = aggregate(outcomes, ErrorPolicy::FailSoft).unwrap();
        assert_eq!(report.total, 9u64);
        assert_eq!(report.bytes_scanned, 24);
        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].partition.index, 1);
        assert_eq!(report.failures[0].lines, 2u64);
    }

    #[test]
    fn strict_returns_lowest_indexed_failure() {
        let outcomes = vec![outcome(3, 1, true), outcome(0, 1, false), outcome(1, 1, true)];
        let err = aggregate(outcomes, ErrorPolicy::Strict).unwrap_err();
        match err {
            EngineError::FileRead { offset, .. } => assert_eq!(offset, 14),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failure_serializes_error_as_message() {
        let report = aggregate(vec![outcome(0, 0, true)], ErrorPolicy::FailSoft).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        let message = json["failures"][0]["error"].as_str().unwrap();
        assert!(message.contains("device gone"));
        assert_eq!(json["failures"][0]["partition"]["start"], 0);
    }
}
