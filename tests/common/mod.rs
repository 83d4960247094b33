//! Shared helpers for the integration suite.

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Temporary directory holding fixture files; removed on drop.
#[derive(Debug)]
pub struct Fixtures {
    dir: tempfile::TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(rel);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

/// The `partline` binary with `RUST_LOG` and the concurrency env var cleared.
pub fn partline() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partline"));
    cmd.env_remove("RUST_LOG").env_remove("PARTLINE_MAX_CONCURRENCY");
    cmd
}
