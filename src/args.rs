// src/args.rs
use crate::options::OutputFormat;
use crate::parsers;
use clap::{ArgAction, Args as ClapArgs, Parser, ValueHint};
use partline_engine::DEFAULT_BUFFER_SIZE;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "partline",
    version,
    about = "Count lines in a large file by scanning byte partitions in parallel",
    group(
        clap::ArgGroup::new("input")
            .args(["path", "file"])
            .required(true)
            .multiple(false)
    )
)]
pub struct Args {
    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub behavior: BehaviorOptions,

    /// File to count
    #[arg(value_hint = ValueHint::FilePath)]
    pub path: Option<PathBuf>,

    /// File to count (same as the positional argument)
    #[arg(short = 'f', long, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

impl Args {
    pub fn input(&self) -> Option<&Path> {
        self.path.as_deref().or(self.file.as_deref())
    }
}

#[derive(ClapArgs, Debug)]
pub struct ScanOptions {
    /// Read buffer size per worker (suffixes: K, M, G)
    #[arg(
        short = 'c',
        long,
        default_value_t = DEFAULT_BUFFER_SIZE,
        value_parser = parsers::parse_buffer_size,
        help_heading = "Scan"
    )]
    pub chunk_size: NonZeroUsize,

    /// Maximum number of partitions scanned in parallel [default: number of CPUs]
    #[arg(
        short = 'm',
        long,
        env = "PARTLINE_MAX_CONCURRENCY",
        value_parser = parsers::parse_positive_usize,
        help_heading = "Scan"
    )]
    pub max_concurrency: Option<NonZeroUsize>,
}

#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// Output format
    #[arg(long, value_enum, default_value = "table", help_heading = "Output")]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug)]
pub struct BehaviorOptions {
    /// Fail if any partition cannot be read instead of reporting a partial count
    #[arg(long, help_heading = "Behavior")]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet", help_heading = "Behavior")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, help_heading = "Behavior")]
    pub quiet: bool,
}
