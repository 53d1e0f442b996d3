//! Rendering of picked tickers for standard output.
use clap::ValueEnum;
use strum_macros::{Display, EnumString};

use divine_common::Result;
use divine_common::tickers::Ticker;

/// Supported output layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// `['DXCM', 'TSN']`
    List,
    /// `["DXCM","TSN"]`
    Json,
    /// One symbol per line.
    Lines,
}

/// Renders `tickers` in the given format, without a trailing newline.
pub fn render(tickers: &[Ticker], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::List => {
            let quoted: Vec<String> = tickers.iter().map(|t| format!("'{}'", t)).collect();
            format!("[{}]", quoted.join(", "))
        }
        OutputFormat::Json => serde_json::to_string(tickers)?,
        OutputFormat::Lines => tickers
            .iter()
            .map(Ticker::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}
