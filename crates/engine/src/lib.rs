//! # partline engine
//!
//! Counts `\n` bytes in a file by splitting it into contiguous byte ranges
//! and scanning each range on its own thread with bounded read buffers.
//!
//! - [`partition`]: range arithmetic
//! - [`scanner`]: positioned, buffered scan of one range
//! - [`coordinator`]: fan-out, join and aggregation
//! - [`target`]: the file being counted

// crates/engine/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod partition;
pub mod scanner;
pub mod target;

pub use config::{Config, ConfigBuilder, DEFAULT_BUFFER_SIZE, ErrorPolicy, default_parallelism};
pub use coordinator::{CountReport, PartitionFailure, count, run};
pub use error::{EngineError, Result};
pub use partition::{Partition, partition_ranges};
pub use target::ScanTarget;
