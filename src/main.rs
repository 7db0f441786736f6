//! rslurp - load a possibly-compressed file fully into memory and report on it.
//!
//! A thin command-line wrapper over the library: resolves the source, spawns
//! the decompressor when needed, and prints the materialized byte count.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    // Parse command-line arguments
    let matches = Command::new("rslurp")
        .version(rslurp::VERSION)
        .about("Materialize a possibly-compressed file into one in-memory buffer")
        .long_about(
            "rslurp loads a file fully into memory, transparently piping it through an \
             external decompression program when the filename ends in gz or bz2 or when \
             --decompressor names one. Use - as the filename to read standard input.",
        )
        .arg(
            Arg::new("file")
                .help("File to load, or - for standard input")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("decompressor")
                .short('d')
                .long("decompressor")
                .value_name("PROGRAM")
                .help("Decompression program to pipe the file through (\"cat\" forces raw)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Print only the byte count"),
        )
        .get_matches();

    let filename = matches
        .get_one::<String>("file")
        .expect("file argument is required");
    let hint = matches.get_one::<String>("decompressor").map(String::as_str);
    let quiet = matches.get_flag("quiet");

    // Every load failure is terminal; resources are already released by the
    // time the error reaches this point, so we just report and exit.
    let mut loader = rslurp::FileLoader::new();
    let result = loader.load_file(filename, hint).await?;

    if quiet {
        println!("{}", result.len());
    } else {
        println!("{}: {} bytes", filename, result.len());
    }

    Ok(())
}
