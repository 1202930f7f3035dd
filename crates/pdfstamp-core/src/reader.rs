//! Random-access byte-range input
//!
//! The document structure layer pulls byte ranges on demand instead of
//! buffering the whole file, which is what keeps load-time memory bounded.
//! Any source that can serve `{read-at-offset, total-length}` is
//! substitutable; tests use plain byte slices.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Pull-based block supplier over an immutable input source.
pub trait RangeReader {
    /// Fill `buf` exactly with the bytes at `offset`. A short read is an
    /// error; callers treat it as a fatal load failure.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()>;

    /// Total size of the source in bytes. Queried once at open time.
    fn total_len(&self) -> u64;
}

/// File-backed reader. Holds one open handle for the lifetime of a document
/// load; each call is a seek plus an exact read, no per-call setup.
pub struct FileRangeReader {
    file: File,
    len: u64,
}

impl FileRangeReader {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }
}

impl RangeReader for FileRangeReader {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)
    }

    fn total_len(&self) -> u64 {
        self.len
    }
}

impl RangeReader for &[u8] {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "offset out of range"))?;
        let end = start
            .checked_add(buf.len())
            .filter(|&end| end <= <[u8]>::len(self))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "range past end of input")
            })?;
        buf.copy_from_slice(&self[start..end]);
        Ok(())
    }

    fn total_len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }
}
