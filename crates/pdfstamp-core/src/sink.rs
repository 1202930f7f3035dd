//! Append-only output sink
//!
//! The output file is built in two phases: a verbatim chunked copy of the
//! original document, then incremental update sections appended after the
//! copy. The sink tracks a single monotonic cursor; once the append point is
//! marked, no byte below it is ever revisited.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Chunk size for the verbatim copy phase. Bounds copy-phase memory
/// independent of document size.
const COPY_CHUNK: usize = 1 << 20;

pub struct AppendSink<W: Write + Seek> {
    inner: W,
    position: u64,
    append_point: u64,
}

impl AppendSink<File> {
    /// Open `path` read-write, truncating any existing file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Seek> AppendSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            position: 0,
            append_point: 0,
        }
    }

    /// Stream the original document's bytes into the sink in fixed-size
    /// chunks, leaving the cursor at end-of-copy. Returns the copied length.
    pub fn copy_from<R: Read>(&mut self, src: &mut R) -> io::Result<u64> {
        let mut buf = vec![0u8; COPY_CHUNK];
        let mut copied = 0u64;
        loop {
            let n = match src.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.inner.write_all(&buf[..n])?;
            copied += n as u64;
        }
        self.position += copied;
        Ok(copied)
    }

    /// Flush buffered output and pin the append point at the current cursor.
    /// Functionally a no-op repositioning after a sequential copy, but an
    /// explicit state transition: every byte below this offset is final.
    pub fn mark_append_point(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        self.inner.seek(SeekFrom::Start(self.position))?;
        self.append_point = self.position;
        Ok(())
    }

    /// Current write cursor, as an absolute file offset.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Offset of the first byte after the verbatim copy.
    pub fn append_point(&self) -> u64 {
        self.append_point
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Seek> Write for AppendSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        debug_assert!(self.position >= self.append_point);
        let n = self.inner.write(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn copy_then_append() {
        let original = b"original document bytes";
        let mut sink = AppendSink::new(Cursor::new(Vec::new()));

        let copied = sink.copy_from(&mut &original[..]).unwrap();
        assert_eq!(copied, original.len() as u64);
        assert_eq!(sink.position(), copied);

        sink.mark_append_point().unwrap();
        assert_eq!(sink.append_point(), copied);

        sink.write_all(b"+delta").unwrap();
        assert_eq!(sink.position(), copied + 6);

        let out = sink.into_inner().into_inner();
        assert_eq!(&out[..original.len()], original);
        assert_eq!(&out[original.len()..], b"+delta");
    }

    #[test]
    fn copy_spans_multiple_chunks() {
        // Larger than one copy chunk so the loop runs more than once.
        let original = vec![0xA5u8; COPY_CHUNK + 1234];
        let mut sink = AppendSink::new(Cursor::new(Vec::new()));

        let copied = sink.copy_from(&mut &original[..]).unwrap();
        assert_eq!(copied, original.len() as u64);
        assert_eq!(sink.into_inner().into_inner(), original);
    }

    #[test]
    fn append_point_defaults_to_zero() {
        let sink = AppendSink::new(Cursor::new(Vec::new()));
        assert_eq!(sink.append_point(), 0);
        assert_eq!(sink.position(), 0);
    }

    #[test]
    fn file_sink_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let mut sink = AppendSink::create(&path).unwrap();
        sink.copy_from(&mut &b"head"[..]).unwrap();
        sink.mark_append_point().unwrap();
        sink.write_all(b"tail").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(std::fs::read(&path).unwrap(), b"headtail");
    }
}
