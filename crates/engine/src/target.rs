use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::Path;

use partline_shared_kernel::{FilePath, FileSize};

use crate::error::{EngineError, Result};

/// Immutable description of one counting job.
///
/// The size is captured once, before partitioning, and is not re-checked
/// while the scanners run. A file that shrinks mid-job simply ends some
/// scanners early; one that grows has its tail ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    path: FilePath,
    size: FileSize,
    buffer_size: NonZeroUsize,
}

impl ScanTarget {
    pub fn new(path: impl Into<FilePath>, size: impl Into<FileSize>, buffer_size: NonZeroUsize) -> Self {
        Self {
            path: path.into(),
            size: size.into(),
            buffer_size,
        }
    }

    /// Query the file's metadata and build a target from it.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] if the path does not exist,
    /// [`EngineError::NotAFile`] if it is a directory, and
    /// [`EngineError::Metadata`] for any other metadata failure.
    pub fn from_path(path: impl AsRef<Path>, buffer_size: NonZeroUsize) -> Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => EngineError::NotFound {
                path: path.to_path_buf(),
            },
            _ => EngineError::Metadata {
                path: path.to_path_buf(),
                source,
            },
        })?;

        if meta.is_dir() {
            return Err(EngineError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        Ok(Self::new(path, meta.len(), buffer_size))
    }

    pub fn path(&self) -> &FilePath {
        &self.path
    }

    pub fn size(&self) -> FileSize {
        self.size
    }

    pub fn buffer_size(&self) -> NonZeroUsize {
        self.buffer_size
    }
}
