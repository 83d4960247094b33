// src/config.rs
use crate::args::Args;
use crate::error::{AppError, Result};
use crate::options::OutputFormat;
pub use partline_engine::{Config, ConfigBuilder, ErrorPolicy};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Everything one invocation needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub path: PathBuf,
    pub buffer_size: NonZeroUsize,
    pub engine: Config,
    pub format: OutputFormat,
}

impl TryFrom<Args> for RunConfig {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self> {
        let path = args
            .input()
            .map(PathBuf::from)
            .ok_or_else(|| AppError::InvalidArgument("no input file given".to_string()))?;

        let policy = if args.behavior.strict {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::FailSoft
        };

        let mut builder = ConfigBuilder::default();
        builder.policy(policy);
        if let Some(parallelism) = args.scan.max_concurrency {
            builder.parallelism(parallelism);
        }
        let engine = builder
            .build()
            .map_err(|e| AppError::InvalidArgument(e.to_string()))?;

        Ok(Self {
            path,
            buffer_size: args.scan.chunk_size,
            engine,
            format: args.output.format,
        })
    }
}
