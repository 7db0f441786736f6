//! # rslurp - Whole-File Acquisition with Transparent Decompression
//!
//! A single-responsibility loader: given a filename (or `-` for standard
//! input), produce one fully materialized in-memory byte buffer with the
//! file's possibly-decompressed contents, piping through an external
//! decompression program when the filename suffix or an explicit hint
//! calls for it.
//!
//! ## Features
//!
//! - **Three sources, one contract**: regular files, standard input, and
//!   spawned decompressor output all come back as a single contiguous buffer
//! - **Suffix auto-detection**: names ending in `gz` pipe through `zcat`,
//!   `bz2` through `bzcat`; a hint of `cat` forces raw passthrough
//! - **Right-sized allocation**: regular files get exactly one allocation of
//!   the exact file size; unsized sources grow geometrically with a bounded
//!   number of reallocations
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`loader`] - The load pipeline: resolution, byte sources, adaptive read
//!
//! ## Example
//!
//! ```no_run
//! use rslurp::FileLoader;
//!
//! # async fn example() -> rslurp::Result<()> {
//! let mut loader = FileLoader::new();
//! let result = loader.load_file("archive.xcf.gz", None).await?;
//! println!("{} bytes", result.len());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod error;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{Result, SlurpError};

// Public API surface for external usage
pub use loader::source::ByteSource;
pub use loader::{FileLoader, LoadRequest, LoadResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
