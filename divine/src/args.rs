//! Command-line arguments for `divine`.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;
use divine_common::oracle::DEFAULT_PICKS;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Divine stock tickers from the patterns in an image", long_about = None)]
pub struct Args {
    /// Image to read (latte foam, tea leaves, ...). Prompted for when omitted.
    pub image: Option<String>,

    /// How many tickers to pick.
    #[clap(long, short, default_value_t = DEFAULT_PICKS)]
    pub picks: usize,

    /// Text file with the ticker universe to pick from, instead of the S&P 500.
    /// Tickers may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub tickers: Option<PathBuf>,

    /// How to print the picked tickers.
    #[clap(long, short, value_enum, default_value_t = OutputFormat::List)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["divine", "latte.jpg"]).unwrap();
        assert_eq!(args.image.as_deref(), Some("latte.jpg"));
        assert_eq!(args.picks, 4);
        assert!(args.tickers.is_none());
        assert_eq!(args.format, OutputFormat::List);
    }

    #[test]
    fn image_is_optional() {
        let args = Args::try_parse_from(["divine"]).unwrap();
        assert!(args.image.is_none());
    }

    #[test]
    fn all_options() {
        let args = Args::try_parse_from([
            "divine",
            "--picks",
            "2",
            "--tickers",
            "universe.txt",
            "--format",
            "json",
            "leaves.png",
        ])
        .unwrap();
        assert_eq!(args.picks, 2);
        assert_eq!(args.tickers, Some(PathBuf::from("universe.txt")));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_two_images() {
        assert!(Args::try_parse_from(["divine", "a.png", "b.png"]).is_err());
    }
}
