//! Luminance grids and the sources that produce them.
//!
//! Everything downstream of decoding works on a [`LumaGrid`]: a row-major
//! buffer of 8-bit luminance samples. [`LumaSource`] is the seam between the
//! selection logic and the image decoder, so tests can feed synthetic grids
//! while the binary reads files through [`ImageFile`].

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use log::debug;

use crate::error::DivinationError;
use crate::result::Result;

/// Anything that can produce an 8-bit luminance grid.
pub trait LumaSource {
    /// Produce the grid, decoding if necessary.
    fn luma(&self) -> Result<LumaGrid>;
}

/// Row-major 8-bit luminance samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaGrid {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl LumaGrid {
    /// Builds a grid from row-major samples.
    ///
    /// Fails with `EmptyImage` when either side is zero and with
    /// `InvalidGrid` when the sample count is not `width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DivinationError::EmptyImage {
                width: width as u32,
                height: height as u32,
            });
        }
        if samples.len() != width * height {
            return Err(DivinationError::InvalidGrid(format!(
                "expected {} samples for {}x{}, got {}",
                width * height,
                width,
                height,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` for every sample.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> Result<Self> {
        let samples = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, samples)
    }

    /// Converts a decoded image to luminance.
    ///
    /// Single-channel 8-bit images are taken as-is. Everything else is
    /// flattened to RGB (alpha dropped) and weighted with the ITU-R 601-2
    /// coefficients in 16-bit fixed point.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let samples = match image {
            DynamicImage::ImageLuma8(gray) => gray.as_raw().clone(),
            other => other
                .to_rgb8()
                .pixels()
                .map(|p| rgb_to_luma(p.0[0], p.0[1], p.0[2]))
                .collect(),
        };
        Self::new(width, height, samples)
    }

    /// Width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[y * self.width + x]
    }

    /// One row of samples.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.samples[y * self.width..(y + 1) * self.width]
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

impl LumaSource for LumaGrid {
    fn luma(&self) -> Result<LumaGrid> {
        Ok(self.clone())
    }
}

/// `L = (19595 R + 38470 G + 7471 B + 0x8000) >> 16`
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000;
    (weighted >> 16) as u8
}

/// An image file on disk, decoded on demand.
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    /// Wraps a path. Nothing is read until [`LumaSource::luma`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The wrapped path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(&self) -> Result<DynamicImage> {
        if !self.path.is_file() {
            return Err(DivinationError::InputNotFound(self.path.clone()));
        }
        let reader = ImageReader::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DivinationError::InputNotFound(self.path.clone()),
            _ => DivinationError::Io(e),
        })?;
        // Content sniffing wins; the extension is the fallback.
        let reader = reader.with_guessed_format()?;
        debug!("Decoding {} as {:?}", self.path.display(), reader.format());
        reader.decode().map_err(|source| DivinationError::DecodeFailure {
            path: self.path.clone(),
            source,
        })
    }
}

impl LumaSource for ImageFile {
    fn luma(&self) -> Result<LumaGrid> {
        let image = self.decode()?;
        debug!(
            "Decoded {} ({}x{}, {:?})",
            self.path.display(),
            image.width(),
            image.height(),
            image.color()
        );
        LumaGrid::from_image(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn luma_weights_match_601_fixed_point() {
        assert_eq!(rgb_to_luma(0, 0, 0), 0);
        assert_eq!(rgb_to_luma(255, 255, 255), 255);
        assert_eq!(rgb_to_luma(255, 0, 0), 76);
        assert_eq!(rgb_to_luma(0, 255, 0), 150);
        assert_eq!(rgb_to_luma(0, 0, 255), 29);
        assert_eq!(rgb_to_luma(90, 90, 90), 90);
    }

    #[test]
    fn grid_rejects_empty_and_mismatched_buffers() {
        assert!(matches!(
            LumaGrid::new(0, 3, vec![]),
            Err(DivinationError::EmptyImage { width: 0, height: 3 })
        ));
        assert!(matches!(
            LumaGrid::new(2, 2, vec![1, 2, 3]),
            Err(DivinationError::InvalidGrid(_))
        ));
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = LumaGrid::from_fn(3, 2, |x, y| (10 * y + x) as u8).unwrap();
        assert_eq!(grid.samples(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.row(1), &[10, 11, 12]);
        assert_eq!(grid.get(2, 1), 12);
    }

    #[test]
    fn rgb_image_converts_per_pixel() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        let grid = LumaGrid::from_image(&DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(grid.samples(), &[76, 150]);
    }

    #[test]
    fn alpha_is_ignored() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 255, 0]));
        let grid = LumaGrid::from_image(&DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(grid.samples(), &[29]);
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let source = ImageFile::new("/definitely/not/here.jpg");
        assert_eq!(source.path(), Path::new("/definitely/not/here.jpg"));
        match source.luma() {
            Err(DivinationError::InputNotFound(path)) => assert_eq!(path, source.path()),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }
}
