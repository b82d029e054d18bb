use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No processing option was selected, or the code is not a known option
    #[error("invalid processing option {0}: expected 1 (median quantization) or 2 (median quantization + bit reduction)")]
    InvalidOption(i32),
    /// Processing was requested before an image was loaded
    #[error("no image loaded")]
    MissingInput,
    /// The slice provided to the function is too small for the declared shape
    #[error("buffer is too small: expected {expected} samples, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
    /// Width or height is zero
    #[error("image dimensions cannot be zero ({width}x{height})")]
    ZeroDimension { width: usize, height: usize },
    /// Channel axis outside of 1..=4
    #[error("unsupported channel count {0}, expected 1 to 4")]
    UnsupportedChannels(usize),
    /// Decoded samples are not 8 bits wide
    #[error("unsupported sample depth of {bits} bits, only 8-bit images can be quantized")]
    UnsupportedSampleDepth { bits: u8 },
}

impl Error {
    /// Returns `true` for the errors describing pixel data that can't be
    /// treated as an 8-bit array of the declared shape.
    pub fn is_malformed_pixel_data(&self) -> bool {
        matches!(
            self,
            Self::BufferTooSmall { .. }
                | Self::ZeroDimension { .. }
                | Self::UnsupportedChannels(_)
                | Self::UnsupportedSampleDepth { .. }
        )
    }
}
