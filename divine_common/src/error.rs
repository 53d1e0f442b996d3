//! Error types shared between the library and the `divine` binary.
//!
//! The `DivinationError` enum unifies the failure cases of reading an image,
//! decoding it, loading a ticker universe and selecting a combination, so the
//! whole workspace can propagate a single error type.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type shared by the library and the CLI.
#[derive(Error, Debug)]
pub enum DivinationError {
    /// The given path does not resolve to a readable regular file.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The file exists but could not be decoded as a raster image.
    #[error("Failed to decode image {}: {source}", .path.display())]
    DecodeFailure {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The decoded image has no pixels to sample.
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },

    /// A luminance buffer does not match its declared dimensions.
    #[error("Invalid luminance grid: {0}")]
    InvalidGrid(String),

    /// I/O error originating from files or standard streams.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error while parsing a ticker file into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// The requested number of picks cannot be drawn from the universe.
    #[error("Invalid number of picks: {0}")]
    InvalidPicks(String),

    /// A combination index fell outside the combination space.
    #[error("Combination error: {0}")]
    Combination(String),

    /// Failure while encoding the output as JSON.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
