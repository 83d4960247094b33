//! Splitting a file into contiguous byte ranges, one per worker.
//!
//! Terminators are single bytes, so cutting the file at any offset can never
//! split one. Each `\n` lies in exactly one partition and is counted by that
//! partition's scanner only; no reconciliation across boundaries is needed.

use std::num::NonZeroUsize;

use serde::Serialize;

/// Half-open byte range `[start, end)` assigned to one scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Partition {
    pub index: usize,
    pub start: u64,
    pub end: u64,
}

impl Partition {
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// `ceil(file_size / parallelism)`.
pub fn partition_size(file_size: u64, parallelism: NonZeroUsize) -> u64 {
    file_size.div_ceil(parallelism.get() as u64)
}

/// Compute the non-degenerate partitions covering `[0, file_size)`.
///
/// Partition `i` spans `[i * size, min((i + 1) * size, file_size))` where
/// `size = ceil(file_size / parallelism)`. Partitions that would start at or
/// past the end of the file are dropped, so an empty file yields none and a
/// file smaller than `parallelism` bytes yields fewer than `parallelism`.
pub fn partition_ranges(file_size: u64, parallelism: NonZeroUsize) -> Vec<Partition> {
    if file_size == 0 {
        return Vec::new();
    }

    let size = partition_size(file_size, parallelism);
    (0..parallelism.get())
        .map(|index| {
            let start = (index as u64).saturating_mul(size);
            let end = start.saturating_add(size).min(file_size);
            Partition { index, start, end }
        })
        .take_while(|p| p.start < file_size)
        .collect()
}
