use std::fmt;

use crate::error::{Error, Result};

/// Transform applied by [`process_image`](crate::process_image)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingOption {
    /// Replace every sample with its band median
    MedianQuantization = 1,
    /// Band median followed by a 3-bit right shift
    MedianQuantizationThenBitReduction = 2,
}

impl ProcessingOption {
    /// Numeric code of the option. `0` is reserved for "nothing selected".
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether the bit reduction pass follows quantization
    pub fn reduces_bit_depth(self) -> bool {
        matches!(self, Self::MedianQuantizationThenBitReduction)
    }
}

impl TryFrom<i32> for ProcessingOption {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::MedianQuantization),
            2 => Ok(Self::MedianQuantizationThenBitReduction),
            _ => Err(Error::InvalidOption(code)),
        }
    }
}

impl fmt::Display for ProcessingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MedianQuantization => write!(f, "median quantization"),
            Self::MedianQuantizationThenBitReduction => write!(f, "median quantization + bit reduction"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub processing_option: Option<ProcessingOption>,
}

impl Options {
    /// Selects the option with the given numeric code.
    ///
    /// Returns [`Error::InvalidOption`] and clears the selection if the code
    /// isn't 1 or 2.
    pub fn set_processing_option(&mut self, code: i32) -> Result<()> {
        self.processing_option = None;
        self.processing_option = Some(ProcessingOption::try_from(code)?);

        Ok(())
    }

    /// Returns the selected option, or [`Error::InvalidOption`] with code 0
    /// if nothing is selected
    pub fn get_processing_option(&self) -> Result<ProcessingOption> {
        self.processing_option.ok_or(Error::InvalidOption(0))
    }
}
