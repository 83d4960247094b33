use std::num::NonZeroUsize;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Read buffer size used when none is given (4 MiB).
pub const DEFAULT_BUFFER_SIZE: NonZeroUsize = match NonZeroUsize::new(4 * 1024 * 1024) {
    Some(size) => size,
    None => unreachable!(),
};

/// How partition failures affect the job result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Failed partitions contribute what they counted before failing; the job still returns a total.
    #[default]
    FailSoft,
    /// The first failed partition (by index) fails the whole job.
    Strict,
}

/// Number of logical CPUs, never less than one.
pub fn default_parallelism() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// Number of partitions to split the file into (fewer for tiny files).
    #[builder(default = "default_parallelism()")]
    pub parallelism: NonZeroUsize,
    #[builder(default)]
    pub policy: ErrorPolicy,
}

impl Config {
    pub fn is_strict(&self) -> bool {
        self.policy == ErrorPolicy::Strict
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            policy: ErrorPolicy::default(),
        }
    }
}
