//! Incremental zip assembly for batch downloads.
//!
//! [`StreamingArchive`] writes entries with the `zip` crate into a spool that
//! only keeps bytes which may still be rewritten. The zip writer patches an
//! entry's local header when that entry is closed, so everything before the
//! start of the entry currently being written is final and can be handed to
//! the response body with [`StreamingArchive::take_ready`].

use std::io::{self, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors raised while assembling an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Writing an entry failed.
    #[error("failed to write archive entry {name}: {source}")]
    Entry {
        /// Path of the entry inside the archive.
        name: String,
        /// The underlying zip error.
        #[source]
        source: ZipError,
    },

    /// Writing the central directory failed.
    #[error("failed to finalize archive: {source}")]
    Finish {
        /// The underlying zip error.
        #[source]
        source: ZipError,
    },
}

#[derive(Debug, Default)]
struct SpoolState {
    /// Bytes from `base` onwards.
    buf: Vec<u8>,
    /// Absolute offset of `buf[0]`.
    base: u64,
    /// Absolute write position.
    pos: u64,
    /// Absolute offset up to which bytes are final.
    ready: u64,
}

/// Seekable sink shared between the zip writer and the archive owner.
#[derive(Debug, Clone, Default)]
struct Spool(Arc<Mutex<SpoolState>>);

impl Spool {
    fn state(&self) -> MutexGuard<'_, SpoolState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(&self) -> u64 {
        self.state().pos
    }

    fn mark_ready(&self, offset: u64) {
        let mut state = self.state();
        state.ready = state.ready.max(offset);
    }

    fn mark_all_ready(&self) {
        let mut state = self.state();
        let end = state.base + state.buf.len() as u64;
        state.ready = state.ready.max(end);
    }

    fn take_ready(&self) -> Bytes {
        let mut state = self.state();
        let ready_len = usize::try_from(state.ready.saturating_sub(state.base))
            .unwrap_or(usize::MAX)
            .min(state.buf.len());
        if ready_len == 0 {
            return Bytes::new();
        }
        let rest = state.buf.split_off(ready_len);
        let ready = std::mem::replace(&mut state.buf, rest);
        state.base += ready_len as u64;
        Bytes::from(ready)
    }
}

impl Write for Spool {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut state = self.state();
        if state.pos < state.ready {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "write into already released archive bytes",
            ));
        }
        let offset = usize::try_from(state.pos - state.base)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "spool offset overflow"))?;
        let end = offset + data.len();
        if state.buf.len() < end {
            state.buf.resize(end, 0);
        }
        state.buf[offset..end].copy_from_slice(data);
        state.pos += data.len() as u64;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for Spool {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let mut state = self.state();
        let end = state.base + state.buf.len() as u64;
        let next = match target {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => end.checked_add_signed(delta),
            SeekFrom::Current(delta) => state.pos.checked_add_signed(delta),
        };
        match next {
            Some(next) if next >= state.ready => {
                state.pos = next;
                Ok(next)
            }
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before released archive bytes",
            )),
        }
    }
}

/// Zip archive that releases finished bytes while entries are still being added.
pub struct StreamingArchive {
    writer: ZipWriter<Spool>,
    spool: Spool,
    options: SimpleFileOptions,
    entries: usize,
}

impl std::fmt::Debug for StreamingArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingArchive")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl Default for StreamingArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingArchive {
    /// Creates an empty archive using deflate at level 5.
    #[must_use]
    pub fn new() -> Self {
        let spool = Spool::default();
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(5));
        Self {
            writer: ZipWriter::new(spool.clone()),
            spool,
            options,
            entries: 0,
        }
    }

    /// Appends one file.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Entry`] if the zip writer rejects the entry.
    /// The archive should be abandoned after an error.
    pub fn append(&mut self, name: &str, data: &[u8]) -> Result<(), ArchiveError> {
        let entry_error = |source: ZipError| ArchiveError::Entry {
            name: name.to_string(),
            source,
        };

        // Opening a new entry closes the previous one, after which every
        // byte before this boundary is final.
        let boundary = self.spool.position();
        self.writer
            .start_file(name, self.options)
            .map_err(entry_error)?;
        self.spool.mark_ready(boundary);
        self.writer
            .write_all(data)
            .map_err(|e| entry_error(ZipError::Io(e)))?;
        self.entries += 1;
        Ok(())
    }

    /// Removes and returns the bytes that can no longer change.
    #[must_use]
    pub fn take_ready(&self) -> Bytes {
        self.spool.take_ready()
    }

    /// Number of entries appended so far.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Writes the central directory and returns all remaining bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Finish`] if the central directory cannot be written.
    pub fn finish(self) -> Result<Bytes, ArchiveError> {
        let Self { writer, spool, .. } = self;
        writer
            .finish()
            .map_err(|source| ArchiveError::Finish { source })?;
        spool.mark_all_ready();
        Ok(spool.take_ready())
    }
}
