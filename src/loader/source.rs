//! Byte sources: the three acquisition backends behind one read interface.
//!
//! A [`ByteSource`] is an opaque readable handle with end-of-data detection.
//! Regular files additionally expose their exact size so the reader can do a
//! single precisely-sized allocation; pipes and standard input cannot, and are
//! drained with the growing-buffer strategy instead.

use crate::error::{Result, SlurpError};
use crate::loader::resolver::SourceStrategy;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, Stdin};
use tokio::process::{Child, ChildStdout, Command};

/// Ceiling on the `program filename` command line length before we refuse to
/// spawn. The +3 accounting at the check site mirrors the separator and the
/// pair of quotes a shell-quoted invocation would add around the filename.
pub const MAX_CMDLINE: usize = 32 * 1024;

/// An opaque readable handle with end-of-data detection.
///
/// Sources are load-scoped: created during strategy resolution, consumed by the
/// adaptive reader, and dropped (closing the underlying handle exactly once)
/// before the load call returns.
#[async_trait]
pub trait ByteSource: Send {
    /// Read up to `buf.len()` bytes into `buf`. `Ok(0)` signals end-of-data.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Exact byte size when the backing store can report it up front.
    ///
    /// Only regular files return `Some`; pipes and standard input discover
    /// their length incrementally.
    fn known_size(&self) -> Option<u64> {
        None
    }
}

/// Open the byte source a resolved strategy calls for.
pub async fn open_source(filename: &str, strategy: &SourceStrategy) -> Result<Box<dyn ByteSource>> {
    match strategy {
        SourceStrategy::Decompress { program } => {
            Ok(Box::new(PipeSource::spawn(program, filename)?))
        }
        SourceStrategy::Stdin => Ok(Box::new(StdinSource::new())),
        SourceStrategy::RegularFile => Ok(Box::new(RegularFileSource::open(filename).await?)),
    }
}

/// Byte source backed by a directly opened file.
///
/// The size is queried once at open time. Non-regular files (FIFOs, devices)
/// open fine but report no known size, pushing the reader onto the growing
/// path just like a pipe.
#[derive(Debug)]
pub struct RegularFileSource {
    file: File,
    size: Option<u64>,
    path: PathBuf,
}

impl RegularFileSource {
    /// Open a file for exclusive reading and capture its metadata size.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .await
            .map_err(|e| SlurpError::open_failed(&path, e))?;
        let metadata = file
            .metadata()
            .await
            .map_err(|e| SlurpError::open_failed(&path, e))?;

        let size = metadata.is_file().then(|| metadata.len());
        Ok(Self { file, size, path })
    }

    /// Path this source was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for RegularFileSource {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.file.read(buf).await.map_err(SlurpError::read_failed)
    }

    fn known_size(&self) -> Option<u64> {
        self.size
    }
}

/// Byte source reading the process's own standard input.
#[derive(Debug)]
pub struct StdinSource {
    stdin: Stdin,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            stdin: tokio::io::stdin(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ByteSource for StdinSource {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stdin.read(buf).await.map_err(SlurpError::read_failed)
    }
}

/// Byte source backed by a spawned decompression process.
///
/// The child runs `program filename` with its standard output captured by a
/// pipe; standard input and standard error stay inherited from this process.
/// The child is never waited on from the load path: a slow decompressor stalls
/// the read (backpressure comes from the pipe's kernel buffer), and dropping
/// the source closes our read end and leaves reaping to the runtime.
#[derive(Debug)]
pub struct PipeSource {
    stdout: ChildStdout,
    _child: Child,
}

impl PipeSource {
    /// Spawn `program filename` and capture its standard output.
    ///
    /// Fails before any process is created when the command line would exceed
    /// [`MAX_CMDLINE`]; fails with the program and filename named when the
    /// spawn itself is rejected by the OS.
    pub fn spawn(program: &str, filename: &str) -> Result<Self> {
        if program.len() + filename.len() + 3 > MAX_CMDLINE {
            return Err(SlurpError::CommandTooLong {
                program: program.to_string(),
                filename: filename.to_string(),
            });
        }

        let mut child = Command::new(program)
            .arg(filename)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SlurpError::spawn_failed(program, filename, e))?;

        // stdout was requested piped, so take() only fails on a tokio internal
        // misconfiguration; surface it as a spawn failure rather than panic.
        let stdout = child.stdout.take().ok_or_else(|| {
            SlurpError::spawn_failed(
                program,
                filename,
                std::io::Error::other("child stdout was not captured"),
            )
        })?;

        Ok(Self {
            stdout,
            _child: child,
        })
    }
}

#[async_trait]
impl ByteSource for PipeSource {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stdout.read(buf).await.map_err(SlurpError::read_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[tokio::test]
    async fn test_regular_file_reports_exact_size() {
        let file = create_test_file(b"hello byte source");
        let source = RegularFileSource::open(file.path()).await.unwrap();

        assert_eq!(source.known_size(), Some(17));
        assert_eq!(source.path(), file.path());
    }

    #[tokio::test]
    async fn test_regular_file_reads_to_end() {
        let file = create_test_file(b"abcdef");
        let mut source = RegularFileSource::open(file.path()).await.unwrap();

        let mut buf = [0u8; 16];
        let n = source.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"abcdef");

        let n = source.read(&mut buf).await.unwrap();
        assert_eq!(n, 0, "second read should hit end-of-data");
    }

    #[tokio::test]
    async fn test_open_failure_names_the_path() {
        let result = RegularFileSource::open("/this/path/does/not/exist.xcf").await;

        match result {
            Err(SlurpError::OpenFailed { path, .. }) => {
                assert!(path.to_string_lossy().contains("exist.xcf"));
            }
            other => panic!("Expected OpenFailed, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_command_too_long_rejected_before_spawn() {
        let filename = "x".repeat(MAX_CMDLINE);
        let result = PipeSource::spawn("zcat", &filename);

        match result {
            Err(SlurpError::CommandTooLong { program, .. }) => {
                assert_eq!(program, "zcat");
            }
            _ => panic!("Expected CommandTooLong"),
        }
    }

    #[tokio::test]
    async fn test_command_length_boundary() {
        // program + filename + 3 exactly at the limit is still accepted by the
        // length check (the spawn itself then fails for the nonexistent program)
        let program = "definitely-not-a-real-decompressor";
        let filename = "y".repeat(MAX_CMDLINE - program.len() - 3);
        match PipeSource::spawn(program, &filename) {
            Err(SlurpError::SpawnFailed { .. }) => {}
            Err(SlurpError::CommandTooLong { .. }) => {
                panic!("Length exactly at the limit should pass the check")
            }
            _ => panic!("Expected SpawnFailed for nonexistent program"),
        }
    }

    #[tokio::test]
    async fn test_spawn_failure_names_program_and_file() {
        let result = PipeSource::spawn("definitely-not-a-real-decompressor", "input.gz");

        match result {
            Err(SlurpError::SpawnFailed {
                program, filename, ..
            }) => {
                assert_eq!(program, "definitely-not-a-real-decompressor");
                assert_eq!(filename, "input.gz");
            }
            _ => panic!("Expected SpawnFailed"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pipe_source_reads_child_output() {
        let file = create_test_file(b"piped through cat\n");
        let path = file.path().to_string_lossy().into_owned();

        let mut source = PipeSource::spawn("/bin/cat", &path).unwrap();
        assert_eq!(source.known_size(), None);

        let mut collected = Vec::new();
        let mut buf = [0u8; 8];
        loop {
            let n = source.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            collected.extend_from_slice(&buf[..n]);
        }

        assert_eq!(collected, b"piped through cat\n");
    }
}
