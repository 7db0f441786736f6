//! Error types and handling infrastructure for rslurp.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! Every failure in the load pipeline is terminal: the library performs no retries
//! and no local recovery. Errors are propagated as values to the top-level entry
//! point, which decides how to terminate. All load-scoped resources (file handles,
//! pipe ends, partially built buffers) are released before an error is returned,
//! so the caller never has to clean up after a failed load.

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rslurp operations.
///
/// This enum covers every failure condition of the load pipeline: resolving a
/// source, spawning a decompressor, and draining the byte source into memory.
#[derive(Error, Debug)]
pub enum SlurpError {
    /// A regular file could not be opened for reading
    #[error("Cannot open {path}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decompressor command line would exceed the supported length
    #[error("Command line too long for {program} \"{filename}\"")]
    CommandTooLong { program: String, filename: String },

    /// The decompressor process could not be spawned
    #[error("Cannot execute {program} \"{filename}\"")]
    SpawnFailed {
        program: String,
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// A regular file reported end-of-data before its declared size was read.
    /// The file was truncated concurrently with the read.
    #[error("File shrunk while reading it")]
    FileShrunk,

    /// An I/O error occurred while draining a byte source
    #[error("Could not read data")]
    ReadFailed {
        #[source]
        source: std::io::Error,
    },

    /// Buffer allocation or growth failed
    #[error("Out of memory for data")]
    OutOfMemory,
}

/// Standard Result type for rslurp operations.
///
/// This type alias provides a consistent error handling interface across
/// all modules in the rslurp codebase.
pub type Result<T> = std::result::Result<T, SlurpError>;

impl SlurpError {
    /// Create an OpenFailed error for a path, keeping the OS error as the source
    pub fn open_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a SpawnFailed error naming the program and the filename involved
    pub fn spawn_failed(
        program: impl Into<String>,
        filename: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::SpawnFailed {
            program: program.into(),
            filename: filename.into(),
            source,
        }
    }

    /// Create a ReadFailed error from the underlying I/O error
    pub fn read_failed(source: std::io::Error) -> Self {
        Self::ReadFailed { source }
    }
}

// A failed reserve on the load buffer is always an out-of-memory condition;
// the partially built buffer is dropped by the caller returning the error.
impl From<TryReserveError> for SlurpError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_messages() {
        let open_err = SlurpError::open_failed(
            PathBuf::from("/data/image.xcf"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        assert_eq!(open_err.to_string(), "Cannot open /data/image.xcf");

        let too_long = SlurpError::CommandTooLong {
            program: "zcat".to_string(),
            filename: "image.xcf.gz".to_string(),
        };
        assert_eq!(
            too_long.to_string(),
            "Command line too long for zcat \"image.xcf.gz\""
        );

        let spawn_err = SlurpError::spawn_failed(
            "bzcat",
            "image.xcf.bz2",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(
            spawn_err.to_string(),
            "Cannot execute bzcat \"image.xcf.bz2\""
        );

        assert_eq!(
            SlurpError::FileShrunk.to_string(),
            "File shrunk while reading it"
        );
        assert_eq!(SlurpError::OutOfMemory.to_string(), "Out of memory for data");
    }

    #[test]
    fn test_os_error_preserved_as_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SlurpError::open_failed("/etc/shadow", io_err);

        let source = err.source().expect("OpenFailed should carry the OS error");
        assert!(source.to_string().contains("denied"));
    }

    #[test]
    fn test_try_reserve_error_maps_to_out_of_memory() {
        let mut v: Vec<u8> = Vec::new();
        let reserve_err = v.try_reserve(usize::MAX).unwrap_err();
        let err: SlurpError = reserve_err.into();
        matches!(err, SlurpError::OutOfMemory);
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<usize> {
            Ok(42)
        }

        assert_eq!(returns_result().unwrap(), 42);
    }
}
