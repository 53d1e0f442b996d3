//! The 49-bit image signature.
//!
//! The grid is squeezed three ways: to a single mean sample, to seven
//! column bands and to seven row bands. Each band is thresholded against the
//! mean, and every (column band, row band) pair contributes one bit that is
//! set when both sides fall on the same side of the mean.

use std::fmt;

use log::debug;

use crate::pixels::LumaGrid;
use crate::resample::resize;
use crate::result::Result;

/// Bands per axis.
pub const SIDE: usize = 7;
/// Width of a signature in bits.
pub const BITS: u32 = (SIDE * SIDE) as u32;

/// Band profiles and the resulting bits for one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    mean: u8,
    columns: [u8; SIDE],
    rows: [u8; SIDE],
    value: u64,
}

impl Signature {
    /// Derives the signature of `grid`.
    pub fn from_grid(grid: &LumaGrid) -> Result<Self> {
        let mean = resize(grid, 1, 1)?.samples()[0];
        let columns = to_bands(resize(grid, SIDE, 1)?.samples());
        let rows = to_bands(resize(grid, 1, SIDE)?.samples());

        let value = columns
            .iter()
            .flat_map(|&c| rows.iter().map(move |&r| (c > mean) == (r > mean)))
            .fold(0u64, |acc, agree| (acc << 1) | agree as u64);

        debug!(
            "Signature: mean={} columns={:?} rows={:?} value={:#015x}",
            mean, columns, rows, value
        );
        Ok(Self {
            mean,
            columns,
            rows,
            value,
        })
    }

    /// Luminance of the whole grid squeezed to one sample.
    pub fn mean(&self) -> u8 {
        self.mean
    }

    /// The seven column-band samples, left to right.
    pub fn columns(&self) -> &[u8; SIDE] {
        &self.columns
    }

    /// The seven row-band samples, top to bottom.
    pub fn rows(&self) -> &[u8; SIDE] {
        &self.rows
    }

    /// The signature bits; always below `2^49`.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Maps the signature onto `[0, choices)` proportionally.
    pub fn scale_into(&self, choices: u64) -> u64 {
        scale_into(self.value, choices)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = BITS as usize)
    }
}

fn to_bands(samples: &[u8]) -> [u8; SIDE] {
    let mut bands = [0u8; SIDE];
    bands.copy_from_slice(&samples[..SIDE]);
    bands
}

/// `floor(value / 2^49 * choices)` in double precision, kept below `choices`.
///
/// `value` is exact in an `f64` and the division is a power of two, so the
/// only rounding happens in the multiplication.
pub fn scale_into(value: u64, choices: u64) -> u64 {
    if choices == 0 {
        return 0;
    }
    let fraction = value as f64 / (1u64 << BITS) as f64;
    let scaled = (fraction * choices as f64).floor() as u64;
    scaled.min(choices - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_grid(columns: [u8; SIDE], rows: [u8; SIDE], block: usize) -> LumaGrid {
        let side = SIDE * block;
        LumaGrid::from_fn(side, side, |x, y| {
            40 + 120 * columns[x / block] + 80 * rows[y / block]
        })
        .unwrap()
    }

    #[test]
    fn flat_grid_sets_every_bit() {
        let grid = LumaGrid::from_fn(50, 30, |_, _| 128).unwrap();
        let signature = Signature::from_grid(&grid).unwrap();
        assert_eq!(signature.mean(), 128);
        assert_eq!(signature.value(), (1 << BITS) - 1);
    }

    #[test]
    fn block_grid_profiles() {
        let signature =
            Signature::from_grid(&block_grid([0, 0, 0, 1, 1, 0, 0], [0, 0, 1, 1, 1, 1, 1], 1))
                .unwrap();
        assert_eq!(signature.columns(), &[100, 100, 100, 220, 220, 100, 100]);
        assert_eq!(signature.rows(), &[80, 80, 160, 160, 160, 160, 160]);
        assert_eq!(signature.mean(), 140);
        assert_eq!(signature.value(), 425_536_835_285_088);
    }

    #[test]
    fn block_size_does_not_change_the_bits() {
        let columns = [0, 0, 0, 1, 1, 0, 0];
        let rows = [0, 0, 1, 1, 1, 1, 1];
        let small = Signature::from_grid(&block_grid(columns, rows, 1)).unwrap();
        for block in [3, 10] {
            let large = Signature::from_grid(&block_grid(columns, rows, block)).unwrap();
            assert_eq!(large.value(), small.value());
        }
    }

    #[test]
    fn first_pair_is_most_significant() {
        // Only the first column band is bright and only the first row band is
        // dark: pair (0, 0) disagrees, so the top bit is clear.
        let signature =
            Signature::from_grid(&block_grid([1, 0, 0, 0, 0, 0, 0], [0, 1, 1, 1, 1, 1, 1], 4))
                .unwrap();
        assert_eq!(signature.value() >> (BITS - 1), 0);
        assert_eq!(signature.to_string().len(), BITS as usize);
    }

    #[test]
    fn scaling_is_proportional_and_bounded() {
        assert_eq!(scale_into(0, 1000), 0);
        assert_eq!(scale_into(1 << 48, 1000), 500);
        assert_eq!(scale_into((1 << BITS) - 1, 2_635_531_375), 2_635_531_374);
        assert_eq!(scale_into(425_536_835_285_088, 2_635_531_375), 1_992_212_049);
        assert_eq!(scale_into(123, 0), 0);
    }
}
