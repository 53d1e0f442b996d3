//! Bicubic reduction of luminance grids.
//!
//! A separable convolution resize: a horizontal pass (only if the width
//! changes) followed by a vertical pass (only if the height changes). When
//! shrinking, the filter support widens by the scale factor, so every input
//! sample contributes to some output sample. Weights are applied in fixed
//! point with [`PRECISION_BITS`] fractional bits and every pass rounds back
//! to `u8`.

use crate::pixels::LumaGrid;
use crate::result::Result;

/// Fractional bits of the fixed-point weights.
pub const PRECISION_BITS: u32 = 32 - 8 - 2;

/// Support radius of the bicubic kernel at scale 1.
const BICUBIC_SUPPORT: f64 = 2.0;

/// Keys cubic convolution kernel with `a = -0.5`.
fn bicubic(x: f64) -> f64 {
    const A: f64 = -0.5;
    let x = x.abs();
    if x < 1.0 {
        ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        (((x - 5.0) * x + 8.0) * x - 4.0) * A
    } else {
        0.0
    }
}

/// Weights for one output sample: the first contributing input index and
/// the fixed-point weight of each consecutive input.
#[derive(Debug, Clone, PartialEq)]
struct Taps {
    start: usize,
    weights: Vec<i64>,
}

fn to_fixed(weight: f64) -> i64 {
    let scaled = weight * (1u64 << PRECISION_BITS) as f64;
    if weight < 0.0 {
        (scaled - 0.5) as i64
    } else {
        (scaled + 0.5) as i64
    }
}

fn compute_taps(in_size: usize, out_size: usize) -> Vec<Taps> {
    let scale = in_size as f64 / out_size as f64;
    let filter_scale = scale.max(1.0);
    let support = BICUBIC_SUPPORT * filter_scale;

    (0..out_size)
        .map(|xx| {
            let center = (xx as f64 + 0.5) * scale;
            // Truncation toward zero, then clamp into the input.
            let start = ((center - support + 0.5) as i64).max(0) as usize;
            let end = ((center + support + 0.5) as i64).min(in_size as i64) as usize;

            let raw: Vec<f64> = (start..end)
                .map(|x| bicubic((x as f64 - center + 0.5) / filter_scale))
                .collect();
            let total: f64 = raw.iter().sum();
            let weights = raw
                .into_iter()
                .map(|w| if total != 0.0 { w / total } else { w })
                .map(to_fixed)
                .collect();
            Taps { start, weights }
        })
        .collect()
}

fn clip8(acc: i64) -> u8 {
    if acc >= (1i64 << PRECISION_BITS << 8) {
        255
    } else if acc <= 0 {
        0
    } else {
        (acc >> PRECISION_BITS) as u8
    }
}

fn convolve(taps: &Taps, sample: impl Fn(usize) -> u8) -> u8 {
    let acc = taps
        .weights
        .iter()
        .enumerate()
        .fold(1i64 << (PRECISION_BITS - 1), |acc, (i, w)| {
            acc + sample(taps.start + i) as i64 * w
        });
    clip8(acc)
}

fn resize_horizontal(grid: &LumaGrid, width: usize) -> Result<LumaGrid> {
    let taps = compute_taps(grid.width(), width);
    let mut samples = Vec::with_capacity(width * grid.height());
    for y in 0..grid.height() {
        let row = grid.row(y);
        samples.extend(taps.iter().map(|t| convolve(t, |x| row[x])));
    }
    LumaGrid::new(width, grid.height(), samples)
}

fn resize_vertical(grid: &LumaGrid, height: usize) -> Result<LumaGrid> {
    let taps = compute_taps(grid.height(), height);
    let mut samples = Vec::with_capacity(grid.width() * height);
    for t in &taps {
        samples.extend((0..grid.width()).map(|x| convolve(t, |y| grid.get(x, y))));
    }
    LumaGrid::new(grid.width(), height, samples)
}

/// Resizes `grid` to `width × height` with the bicubic filter.
///
/// Both target sides must be at least 1.
pub fn resize(grid: &LumaGrid, width: usize, height: usize) -> Result<LumaGrid> {
    let mut out = if width != grid.width() {
        resize_horizontal(grid, width)?
    } else {
        grid.clone()
    };
    if height != out.height() {
        out = resize_vertical(&out, height)?;
    }
    Ok(out)
}
