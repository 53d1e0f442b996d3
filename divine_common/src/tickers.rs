//! Ticker symbols, the built-in universe and ticker file parsing.
//!
//! A [`Ticker`] is validated on construction: one to five ASCII uppercase
//! letters, optionally followed by a `.` and a one or two letter share class
//! (`BRK.B`). A [`Universe`] is the ordered list the oracle draws from; its
//! order defines which combination an index maps to.

use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DivinationError;

/// Maximum length of the base symbol, before any share-class suffix.
const MAX_SYMBOL_LEN: usize = 5;
/// Maximum length of the share-class suffix after the `.`.
const MAX_CLASS_LEN: usize = 2;

/// S&P 500 constituents, mid-2023 snapshot. Order is significant.
const SP_500: &[&str] = &[
    "MMM", "AOS", "ABT", "ABBV", "ACN", "ATVI", "ADM", "ADBE", "ADP", "AAP", "AES", "AFL", "A", "APD",
    "AKAM", "ALK", "ALB", "ARE", "ALGN", "ALLE", "LNT", "ALL", "GOOGL", "GOOG", "MO", "AMZN", "AMCR", "AMD",
    "AEE", "AAL", "AEP", "AXP", "AIG", "AMT", "AWK", "AMP", "ABC", "AME", "AMGN", "APH", "ADI", "ANSS",
    "AON", "APA", "AAPL", "AMAT", "APTV", "ACGL", "ANET", "AJG", "AIZ", "T", "ATO", "ADSK", "AZO", "AVB",
    "AVY", "AXON", "BKR", "BALL", "BAC", "BBWI", "BAX", "BDX", "WRB", "BRK.B", "BBY", "BIO", "TECH", "BIIB",
    "BLK", "BK", "BA", "BKNG", "BWA", "BXP", "BSX", "BMY", "AVGO", "BR", "BRO", "BF.B", "BG", "CHRW",
    "CDNS", "CZR", "CPT", "CPB", "COF", "CAH", "KMX", "CCL", "CARR", "CTLT", "CAT", "CBOE", "CBRE", "CDW",
    "CE", "CNC", "CNP", "CDAY", "CF", "CRL", "SCHW", "CHTR", "CVX", "CMG", "CB", "CHD", "CI", "CINF",
    "CTAS", "CSCO", "C", "CFG", "CLX", "CME", "CMS", "KO", "CTSH", "CL", "CMCSA", "CMA", "CAG", "COP",
    "ED", "STZ", "CEG", "COO", "CPRT", "GLW", "CTVA", "CSGP", "COST", "CTRA", "CCI", "CSX", "CMI", "CVS",
    "DHI", "DHR", "DRI", "DVA", "DE", "DAL", "XRAY", "DVN", "DXCM", "FANG", "DLR", "DFS", "DIS", "DG",
    "DLTR", "D", "DPZ", "DOV", "DOW", "DTE", "DUK", "DD", "DXC", "EMN", "ETN", "EBAY", "ECL", "EIX",
    "EW", "EA", "ELV", "LLY", "EMR", "ENPH", "ETR", "EOG", "EPAM", "EQT", "EFX", "EQIX", "EQR", "ESS",
    "EL", "ETSY", "EG", "EVRG", "ES", "EXC", "EXPE", "EXPD", "EXR", "XOM", "FFIV", "FDS", "FICO", "FAST",
    "FRT", "FDX", "FITB", "FSLR", "FE", "FIS", "FI", "FLT", "FMC", "F", "FTNT", "FTV", "FOXA", "FOX",
    "BEN", "FCX", "GRMN", "IT", "GEHC", "GEN", "GNRC", "GD", "GE", "GIS", "GM", "GPC", "GILD", "GL",
    "GPN", "GS", "HAL", "HIG", "HAS", "HCA", "PEAK", "HSIC", "HSY", "HES", "HPE", "HLT", "HOLX", "HD",
    "HON", "HRL", "HST", "HWM", "HPQ", "HUM", "HBAN", "HII", "IBM", "IEX", "IDXX", "ITW", "ILMN", "INCY",
    "IR", "PODD", "INTC", "ICE", "IFF", "IP", "IPG", "INTU", "ISRG", "IVZ", "INVH", "IQV", "IRM", "JBHT",
    "JKHY", "J", "JNJ", "JCI", "JPM", "JNPR", "K", "KDP", "KEY", "KEYS", "KMB", "KIM", "KMI", "KLAC",
    "KHC", "KR", "LHX", "LH", "LRCX", "LW", "LVS", "LDOS", "LEN", "LNC", "LIN", "LYV", "LKQ", "LMT",
    "L", "LOW", "LYB", "MTB", "MRO", "MPC", "MKTX", "MAR", "MMC", "MLM", "MAS", "MA", "MTCH", "MKC",
    "MCD", "MCK", "MDT", "MRK", "META", "MET", "MTD", "MGM", "MCHP", "MU", "MSFT", "MAA", "MRNA", "MHK",
    "MOH", "TAP", "MDLZ", "MPWR", "MNST", "MCO", "MS", "MOS", "MSI", "MSCI", "NDAQ", "NTAP", "NFLX", "NWL",
    "NEM", "NWSA", "NWS", "NEE", "NKE", "NI", "NDSN", "NSC", "NTRS", "NOC", "NCLH", "NRG", "NUE", "NVDA",
    "NVR", "NXPI", "ORLY", "OXY", "ODFL", "OMC", "ON", "OKE", "ORCL", "OGN", "OTIS", "PCAR", "PKG", "PANW",
    "PARA", "PH", "PAYX", "PAYC", "PYPL", "PNR", "PEP", "PFE", "PCG", "PM", "PSX", "PNW", "PXD", "PNC",
    "POOL", "PPG", "PPL", "PFG", "PG", "PGR", "PLD", "PRU", "PEG", "PTC", "PSA", "PHM", "QRVO", "PWR",
    "QCOM", "DGX", "RL", "RJF", "RTX", "O", "REG", "REGN", "RF", "RSG", "RMD", "RVTY", "RHI", "ROK",
    "ROL", "ROP", "ROST", "RCL", "SPGI", "CRM", "SBAC", "SLB", "STX", "SEE", "SRE", "NOW", "SHW", "SPG",
    "SWKS", "SJM", "SNA", "SEDG", "SO", "LUV", "SWK", "SBUX", "STT", "STLD", "STE", "SYK", "SYF", "SNPS",
    "SYY", "TMUS", "TROW", "TTWO", "TPR", "TRGP", "TGT", "TEL", "TDY", "TFX", "TER", "TSLA", "TXN", "TXT",
    "TMO", "TJX", "TSCO", "TT", "TDG", "TRV", "TRMB", "TFC", "TYL", "TSN", "USB", "UDR", "ULTA", "UNP",
    "UAL", "UPS", "URI", "UNH", "UHS", "VLO", "VTR", "VRSN", "VRSK", "VZ", "VRTX", "VFC", "VTRS", "VICI",
    "V", "VMC", "WAB", "WBA", "WMT", "WBD", "WM", "WAT", "WEC", "WFC", "WELL", "WST", "WDC", "WRK",
    "WY", "WHR", "WMB", "WTW", "GWW", "WYNN", "XEL", "XYL", "YUM", "ZBRA", "ZBH", "ZION", "ZTS",
];

/// A validated stock ticker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// The symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = DivinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim().to_ascii_uppercase();
        if is_ticker_shape(&symbol) {
            Ok(Ticker(symbol))
        } else {
            Err(DivinationError::ParseTickersFile(format!(
                "'{}' is not a ticker symbol",
                s.trim()
            )))
        }
    }
}

impl TryFrom<String> for Ticker {
    type Error = DivinationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// Returns `true` for `ABC` and `ABC.D` style symbols.
pub fn is_ticker_shape(symbol: &str) -> bool {
    let is_letters = |part: &str, max: usize| {
        !part.is_empty() && part.len() <= max && part.bytes().all(|b| b.is_ascii_uppercase())
    };
    match symbol.split_once('.') {
        Some((base, class)) => is_letters(base, MAX_SYMBOL_LEN) && is_letters(class, MAX_CLASS_LEN),
        None => is_letters(symbol, MAX_SYMBOL_LEN),
    }
}

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces, or new lines. Blank entries
    /// are skipped; an invalid or repeated symbol fails the whole file.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, DivinationError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, DivinationError> {
        let mut tickers = Vec::new();
        let mut seen = HashSet::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(DivinationError::Io)?;
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                let ticker = token.parse::<Self>()?;
                if !seen.insert(ticker.clone()) {
                    return Err(DivinationError::ParseTickersFile(format!(
                        "duplicate symbol '{}'",
                        ticker
                    )));
                }
                tickers.push(ticker);
            }
        }
        Ok(tickers)
    }
}

/// Ordered, non-empty list of tickers to divine from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    tickers: Vec<Ticker>,
}

impl Universe {
    /// Wraps an ordered ticker list. Fails on an empty list.
    pub fn new(tickers: Vec<Ticker>) -> Result<Self, DivinationError> {
        if tickers.is_empty() {
            return Err(DivinationError::ParseTickersFile(
                "ticker universe is empty".to_string(),
            ));
        }
        Ok(Self { tickers })
    }

    /// Reads a universe from a ticker file.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DivinationError> {
        Self::new(Ticker::parse_from_file(reader)?)
    }

    /// The built-in S&P 500 universe.
    pub fn sp500() -> Self {
        Self {
            tickers: SP_500.iter().map(|s| Ticker((*s).to_string())).collect(),
        }
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// `true` when there are no tickers, which a constructed universe never is.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Ticker at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Ticker> {
        self.tickers.get(index)
    }

    /// All tickers in universe order.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::sp500()
    }
}
