//!
//! Image-to-ticker divination shared by the `divine` binary and its tests.
//!
//! This crate aggregates:
//! - `error` — unified error type `DivinationError` used across the workspace.
//! - `result` — handy `Result<T, DivinationError>` alias.
//! - `tickers` — ticker symbols, the built-in S&P 500 universe and file parsing.
//! - `pixels` — luminance grids and the `LumaSource` capability that produces them.
//! - `resample` — bicubic reduction of luminance grids.
//! - `signature` — the 49-bit image signature.
//! - `combination` — binomial coefficients and combination unranking.
//! - `oracle` — image in, ordered ticker list out.
#![warn(missing_docs)]
pub mod combination;
pub mod error;
pub mod oracle;
pub mod pixels;
pub mod resample;
pub mod result;
pub mod signature;
pub mod tickers;

pub use error::DivinationError;
pub use oracle::Oracle;
pub use result::Result;
