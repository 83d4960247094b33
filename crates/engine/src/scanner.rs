use std::fs::File;
use std::io;
use std::num::NonZeroUsize;
use std::path::Path;

use partline_shared_kernel::LineCount;

use crate::error::EngineError;
use crate::partition::Partition;

/// The byte counted as one line.
pub const LINE_TERMINATOR: u8 = b'\n';

/// What one scanner reports for its partition.
///
/// Always produced, even when the scan failed: `lines` and `bytes_read`
/// then reflect what was read before `error` stopped it.
#[derive(Debug)]
pub struct ScanOutcome {
    pub partition: Partition,
    pub lines: LineCount,
    pub bytes_read: u64,
    pub error: Option<EngineError>,
}

impl ScanOutcome {
    fn new(partition: Partition) -> Self {
        Self {
            partition,
            lines: LineCount::ZERO,
            bytes_read: 0,
            error: None,
        }
    }
}

/// Count terminator bytes in `partition` of the file at `path`.
///
/// Opens its own handle and reads with explicit offsets, so any number of
/// scanners can run against the same file without sharing a cursor. At most
/// `min(buffer_size, partition.len())` bytes are held in memory.
///
/// The scan ends at `partition.end`, at end of file (a zero-length read, e.g.
/// when the file was truncated after its size was captured), or at the first
/// read error other than `Interrupted`.
pub fn scan(path: &Path, partition: Partition, buffer_size: NonZeroUsize) -> ScanOutcome {
    let mut outcome = ScanOutcome::new(partition);

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            outcome.error = Some(EngineError::FileOpen {
                path: path.to_path_buf(),
                source,
            });
            return outcome;
        }
    };

    let capacity = usize::try_from(partition.len())
        .map_or(buffer_size.get(), |len| len.min(buffer_size.get()));
    let mut buf = vec![0u8; capacity];

    let mut offset = partition.start;
    while offset < partition.end {
        let remaining = partition.end - offset;
        let want = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));

        match read_at(&mut file, &mut buf[..want], offset) {
            Ok(0) => break,
            Ok(n) => {
                outcome.lines += bytecount::count(&buf[..n], LINE_TERMINATOR) as u64;
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => {
                outcome.error = Some(EngineError::FileRead {
                    path: path.to_path_buf(),
                    offset,
                    source,
                });
                break;
            }
        }
    }

    outcome.bytes_read = offset - partition.start;
    outcome
}

#[cfg(unix)]
fn read_at(file: &mut File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn read_at(file: &mut File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

#[cfg(not(any(unix, windows)))]
fn read_at(file: &mut File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::io::{Read, Seek, SeekFrom};
    file.seek(SeekFrom::Start(offset))?;
    file.read(buf)
}
