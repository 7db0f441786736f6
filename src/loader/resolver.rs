//! Source resolution: decide how a load request acquires its bytes.
//!
//! Given a filename and an optional decompressor hint, pick one of three
//! acquisition strategies: pipe the file through an external decompression
//! program, read standard input, or open the file directly.

/// Filename sentinel meaning "read standard input".
pub const STDIN_SENTINEL: &str = "-";

/// Hint token that forces raw passthrough, even for a `.gz`/`.bz2` name.
pub const PASSTHROUGH_HINT: &str = "cat";

/// Default decompression programs selected by filename suffix.
const GZIP_PROGRAM: &str = "zcat";
const BZIP2_PROGRAM: &str = "bzcat";

/// Acquisition strategy for one load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStrategy {
    /// Spawn `program filename` and read its standard output
    Decompress { program: String },
    /// Read the process's own standard input
    Stdin,
    /// Open the named file directly for reading
    RegularFile,
}

/// Resolve a filename plus optional decompressor hint into a strategy.
///
/// Decision order:
/// 1. No hint: the filename suffix picks the program — a name ending in `gz`
///    (case-sensitive, no dot required) selects `zcat`, one ending in `bz2`
///    selects `bzcat`, anything else gets no decompression.
/// 2. Hint `"cat"` or the empty string: no decompression regardless of suffix.
/// 3. Any other hint names the decompression program verbatim.
/// 4. With a program selected, the strategy is the pipe path; otherwise `-`
///    selects standard input and any other name a direct file open.
pub fn resolve(filename: &str, hint: Option<&str>) -> SourceStrategy {
    let program = match hint {
        None => detect_by_suffix(filename).map(str::to_string),
        Some("") | Some(PASSTHROUGH_HINT) => None,
        Some(other) => Some(other.to_string()),
    };

    match program {
        Some(program) => SourceStrategy::Decompress { program },
        None if filename == STDIN_SENTINEL => SourceStrategy::Stdin,
        None => SourceStrategy::RegularFile,
    }
}

/// Suffix-based program selection.
///
/// The match is on the trailing characters only and the name must be strictly
/// longer than the suffix, so a file literally named `gz` is not compressed.
fn detect_by_suffix(filename: &str) -> Option<&'static str> {
    if filename.len() > 2 && filename.ends_with("gz") {
        Some(GZIP_PROGRAM)
    } else if filename.len() > 3 && filename.ends_with("bz2") {
        Some(BZIP2_PROGRAM)
    } else {
        None
    }
}
