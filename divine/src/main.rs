//! Divine — picks stock tickers from the pixel patterns of an image, such as
//! latte foam or tea leaves. This is a novelty, not analysis: the same image
//! always yields the same tickers, and nothing else about it means anything.
//!
//! Usage example (CLI):
//! ```bash
//! divine ./latte.jpg
//! divine --picks 3 --format json --tickers ./universe.txt ./leaves.png
//! ```
//!
//! Without an image argument the path is read from standard input.
#![warn(missing_docs)]
mod args;
mod output;

use crate::args::Args;
use crate::output::render;
use clap::Parser;
use divine_common::pixels::ImageFile;
use divine_common::tickers::Universe;
use divine_common::{DivinationError, Oracle, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Prompt shown when no image path is given on the command line.
const PROMPT: &str = "Enter path to image: ";

fn main() -> Result<(), DivinationError> {
    init_logger();
    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    let raw_path = match args.image {
        Some(image) => image,
        None => prompt_for_path(io::stdin().lock(), io::stdout().lock())?,
    };
    let image_path = normalize_path(&raw_path);

    let universe = match &args.tickers {
        Some(path) => load_universe(path)?,
        None => Universe::sp500(),
    };
    info!("Universe: {} tickers, picking {}", universe.len(), args.picks);

    let oracle = Oracle::new(universe, args.picks)?;
    let source = ImageFile::new(image_path);
    debug!("Reading image {}", source.path().display());
    let reading = oracle.divine(&source)?;
    info!(
        "Signature {:#015x} -> combination {} of {}",
        reading.signature,
        reading.index,
        oracle.choices()
    );

    println!("{}", render(&reading.tickers, args.format)?);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

/// Asks for an image path on `output` and reads one line from `input`.
fn prompt_for_path<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Reads a ticker universe file.
fn load_universe(path: &Path) -> Result<Universe> {
    if !is_file_exist(path) {
        return Err(DivinationError::InputNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    Universe::from_reader(BufReader::new(file))
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
