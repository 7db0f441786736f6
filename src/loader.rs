//! File acquisition: one fully materialized buffer per load.
//!
//! This module unifies three acquisition strategies behind one contract:
//! direct read of a regular file, read from standard input (filename `-`),
//! and read from a spawned decompressor's output. The caller always gets back
//! a single contiguous, fully-loaded byte buffer with its exact length.
//!
//! The pipeline: [`FileLoader`] releases any prior buffer, the
//! [`resolver`](crate::loader::resolver) picks a strategy, the
//! [`source`](crate::loader::source) layer produces a readable handle
//! (spawning the decompressor when needed), and the
//! [`reader`](crate::loader::reader) drains it into memory.

pub mod reader;
pub mod resolver;
pub mod source;

use crate::error::Result;
use crate::loader::resolver::STDIN_SENTINEL;

/// One load request: a filename plus an optional decompressor hint.
///
/// The filename `-` means standard input. A hint of `cat` (or the empty
/// string) forces raw passthrough even for a `.gz`/`.bz2` name; any other
/// hint names the decompression program to pipe the file through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    filename: String,
    hint: Option<String>,
}

impl LoadRequest {
    /// Build a request for a named file with an optional decompressor hint
    pub fn new(filename: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            filename: filename.into(),
            hint: hint.map(str::to_string),
        }
    }

    /// Build a request for standard input
    pub fn stdin() -> Self {
        Self::new(STDIN_SENTINEL, None)
    }

    /// The filename this request names (possibly the `-` sentinel)
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The decompressor hint, if any
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

/// One completed load: an owned contiguous buffer.
///
/// `len()` is the exact byte count read from the source; the underlying
/// capacity may be larger on the growing path and must not be relied on.
#[derive(Debug)]
pub struct LoadResult {
    data: Vec<u8>,
}

impl LoadResult {
    /// The loaded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Exact byte count of the loaded contents
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Take ownership of the buffer, consuming the result
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Owner of the current loaded buffer.
///
/// At most one [`LoadResult`] is alive per loader: every [`load`](Self::load)
/// releases the previous buffer before acquiring any new resources, so
/// repeated loads never leak and never hold two buffers at once. Loads are
/// exclusive — the `&mut self` receiver makes concurrent loads against one
/// owner unrepresentable.
#[derive(Debug, Default)]
pub struct FileLoader {
    current: Option<LoadResult>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Free the currently owned buffer, if any. Idempotent.
    pub fn release(&mut self) {
        self.current = None;
    }

    /// The most recent load, if one is held
    pub fn current(&self) -> Option<&LoadResult> {
        self.current.as_ref()
    }

    /// Perform one full load: release, resolve, (maybe) spawn, drain.
    ///
    /// On success the buffer becomes this loader's current state and a
    /// reference to it is returned. On failure all load-scoped resources
    /// (file handle, pipe ends, partial buffer) are already released when
    /// the error comes back, and no current buffer is held.
    pub async fn load(&mut self, request: &LoadRequest) -> Result<&LoadResult> {
        self.release();

        let strategy = resolver::resolve(request.filename(), request.hint());
        let mut byte_source = source::open_source(request.filename(), &strategy).await?;
        let data = reader::read_to_end(byte_source.as_mut()).await?;

        Ok(self.current.insert(LoadResult { data }))
    }

    /// Convenience wrapper over [`load`](Self::load)
    pub async fn load_file(&mut self, filename: &str, hint: Option<&str>) -> Result<&LoadResult> {
        let request = LoadRequest::new(filename, hint);
        self.load(&request).await
    }
}
