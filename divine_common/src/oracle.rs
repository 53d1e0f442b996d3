//! Image in, ordered ticker list out.
//!
//! The [`Oracle`] owns the ticker universe and the number of picks. Given any
//! [`LumaSource`] it derives the image [`Signature`], scales it into the space
//! of `C(universe, picks)` combinations and unranks the resulting index into
//! tickers. The whole chain is a pure function of the pixel content.

use log::{debug, info};

use crate::combination::{binomial, nth_combination};
use crate::error::DivinationError;
use crate::pixels::LumaSource;
use crate::result::Result;
use crate::signature::{Signature, scale_into};
use crate::tickers::{Ticker, Universe};

/// Number of tickers picked unless told otherwise.
pub const DEFAULT_PICKS: usize = 4;
/// `C(503, DEFAULT_PICKS)`: size of the combination space of the default oracle.
pub const SP500_CHOICES: u64 = 2_635_531_375;

/// Selects tickers from a universe based on image content.
#[derive(Debug, Clone)]
pub struct Oracle {
    universe: Universe,
    picks: usize,
    choices: u64,
}

/// One divination: the tickers plus how they were reached.
#[derive(Debug, Clone)]
pub struct Reading {
    /// Picked tickers, ascending by universe position.
    pub tickers: Vec<Ticker>,
    /// Combination index the signature scaled to.
    pub index: u64,
    /// Raw signature bits.
    pub signature: u64,
}

impl Oracle {
    /// Creates an oracle picking `picks` tickers from `universe`.
    ///
    /// Fails if `picks` is zero, exceeds the universe, or the number of
    /// combinations does not fit in 64 bits.
    pub fn new(universe: Universe, picks: usize) -> Result<Self> {
        if picks == 0 || picks > universe.len() {
            return Err(DivinationError::InvalidPicks(format!(
                "need 1..={} picks, got {}",
                universe.len(),
                picks
            )));
        }
        let choices = binomial(universe.len(), picks).ok_or_else(|| {
            DivinationError::InvalidPicks(format!(
                "too many combinations of {} from {}",
                picks,
                universe.len()
            ))
        })?;
        Ok(Self {
            universe,
            picks,
            choices,
        })
    }

    /// Four picks from the built-in S&P 500 universe.
    pub fn sp500() -> Self {
        Self {
            universe: Universe::sp500(),
            picks: DEFAULT_PICKS,
            choices: SP500_CHOICES,
        }
    }

    /// Number of tickers per reading.
    pub fn picks(&self) -> usize {
        self.picks
    }

    /// Size of the combination space.
    pub fn choices(&self) -> u64 {
        self.choices
    }

    /// The universe tickers are drawn from.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Divines tickers from any luminance source.
    pub fn divine<S: LumaSource + ?Sized>(&self, source: &S) -> Result<Reading> {
        let grid = source.luma()?;
        debug!("Luminance grid: {}x{}", grid.width(), grid.height());
        let signature = Signature::from_grid(&grid)?;
        self.pick(signature.value(), signature.scale_into(self.choices))
    }

    /// Maps raw signature bits to tickers.
    pub fn read_signature(&self, signature: u64) -> Result<Reading> {
        self.pick(signature, scale_into(signature, self.choices))
    }

    fn pick(&self, signature: u64, index: u64) -> Result<Reading> {
        let positions = nth_combination(self.universe.len(), self.picks, index)?;
        let tickers = positions
            .into_iter()
            .map(|i| {
                self.universe.get(i).cloned().ok_or_else(|| {
                    DivinationError::Combination(format!("position {} outside universe", i))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!("Combination {} of {}: {:?}", index, self.choices, tickers);
        Ok(Reading {
            tickers,
            index,
            signature,
        })
    }
}

impl Default for Oracle {
    fn default() -> Self {
        Self::sp500()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::LumaGrid;
    use crate::tickers::is_ticker_shape;
    use std::io::Cursor;

    fn symbols(reading: &Reading) -> Vec<&str> {
        reading.tickers.iter().map(Ticker::as_str).collect()
    }

    fn golden_grid() -> LumaGrid {
        let columns = [0u8, 0, 0, 1, 1, 0, 0];
        let rows = [0u8, 0, 1, 1, 1, 1, 1];
        LumaGrid::from_fn(70, 70, |x, y| 40 + 120 * columns[x / 10] + 80 * rows[y / 10]).unwrap()
    }

    #[test]
    fn sp500_oracle_matches_checked_constructor() {
        let checked = Oracle::new(Universe::sp500(), DEFAULT_PICKS).unwrap();
        let preset = Oracle::sp500();
        assert_eq!(preset.choices(), checked.choices());
        assert_eq!(preset.picks(), checked.picks());
        assert_eq!(preset.universe(), checked.universe());
    }

    #[test]
    fn grid_and_raw_signature_agree() {
        let grid = golden_grid();
        let oracle = Oracle::sp500();
        let from_grid = oracle.divine(&grid).unwrap();
        let signature = Signature::from_grid(&grid).unwrap();
        let from_bits = oracle.read_signature(signature.value()).unwrap();
        assert_eq!(from_grid.index, signature.scale_into(oracle.choices()));
        assert_eq!(from_grid.tickers, from_bits.tickers);
    }

    #[test]
    fn golden_reading() {
        let reading = Oracle::default().divine(&golden_grid()).unwrap();
        assert_eq!(symbols(&reading), vec!["DXCM", "TSN", "UPS", "WEC"]);
        assert_eq!(reading.index, 1_992_212_049);
    }

    #[test]
    fn flat_image_picks_the_tail() {
        let grid = LumaGrid::from_fn(9, 9, |_, _| 17).unwrap();
        let reading = Oracle::default().divine(&grid).unwrap();
        assert_eq!(symbols(&reading), vec!["ZBRA", "ZBH", "ZION", "ZTS"]);
    }

    #[test]
    fn zero_signature_picks_the_head() {
        let reading = Oracle::default().read_signature(0).unwrap();
        assert_eq!(symbols(&reading), vec!["MMM", "AOS", "ABT", "ABBV"]);
    }

    #[test]
    fn readings_are_deterministic() {
        let grid = LumaGrid::from_fn(31, 17, |x, y| ((x * 37 + y * 101) % 256) as u8).unwrap();
        let oracle = Oracle::default();
        let first = oracle.divine(&grid).unwrap();
        let second = oracle.divine(&grid).unwrap();
        assert_eq!(first.tickers, second.tickers);
        assert_eq!(first.signature, second.signature);
    }

    #[test]
    fn readings_are_well_formed_across_signatures() {
        let oracle = Oracle::default();
        for signature in [0, 1, 0x1234_5678_9abc, (1 << 49) - 2, (1 << 49) - 1] {
            let reading = oracle.read_signature(signature).unwrap();
            assert_eq!(reading.tickers.len(), DEFAULT_PICKS);
            assert!(reading.tickers.iter().all(|t| is_ticker_shape(t.as_str())));
            let positions: Vec<usize> = reading
                .tickers
                .iter()
                .map(|t| oracle.universe().tickers().iter().position(|u| u == t).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn custom_universe_and_picks() {
        let universe = Universe::from_reader(Cursor::new("AAA BBB CCC DDD")).unwrap();
        let oracle = Oracle::new(universe, 2).unwrap();
        assert_eq!(oracle.choices(), 6);
        let reading = oracle.read_signature((1 << 49) - 1).unwrap();
        assert_eq!(symbols(&reading), vec!["CCC", "DDD"]);
    }

    #[test]
    fn invalid_picks_are_rejected() {
        let small = Universe::from_reader(Cursor::new("AAA BBB")).unwrap();
        assert!(matches!(
            Oracle::new(small.clone(), 0),
            Err(DivinationError::InvalidPicks(_))
        ));
        assert!(matches!(
            Oracle::new(small, 3),
            Err(DivinationError::InvalidPicks(_))
        ));
        assert!(matches!(
            Oracle::new(Universe::sp500(), 100),
            Err(DivinationError::InvalidPicks(_))
        ));
    }
}
