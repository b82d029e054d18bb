//! Fixed-table quantization of 8-bit images.
//!
//! Every sample is mapped to the median of one of 32 bands of width 8
//! (`8 * i + 4`), optionally followed by a 3-bit right shift that leaves
//! the band index (0..=31).
//!
//! ```
//! use bandquant::{Image, ProcessingOption, process_image};
//!
//! let pixels = [0u8, 7, 8, 255];
//! let image = Image::gray(&pixels, 2, 2).unwrap();
//!
//! let out = process_image(&image, ProcessingOption::MedianQuantization);
//! assert_eq!(out.as_slice(), &[4, 4, 12, 252]);
//! ```

mod error;
mod image;
mod options;
mod quantize;
mod session;
mod table;

#[cfg(feature = "capi")]
mod capi;

pub use crate::error::{Error, Result};
pub use crate::image::{Image, MAX_CHANNELS, PixelArray, Shape};
pub use crate::options::{Options, ProcessingOption};
pub use crate::quantize::{
    process_image, quantize, quantize_in_place, reduce_bit_depth, reduce_bit_depth_in_place,
};
pub use crate::session::Session;
pub use crate::table::{BAND_COUNT, BAND_WIDTH, MEDIANS, QUANTIZE_LUT, QuantizationTable};
