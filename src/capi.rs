use std::slice;

use crate::error::Error;
use crate::image::{Image, Shape};
use crate::options::ProcessingOption;
use crate::quantize::{process_image, quantize_in_place, reduce_bit_depth_in_place};

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum BandquantError {
    BandquantOk = 0,
    BandquantBufferTooSmall = 1,
    BandquantMissingInput = 2,
    BandquantInvalidOption = 99,
    BandquantValueOutOfRange = 100,
}

impl std::convert::From<Error> for BandquantError {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidOption(_) => Self::BandquantInvalidOption,
            Error::MissingInput => Self::BandquantMissingInput,
            Error::BufferTooSmall { .. } => Self::BandquantBufferTooSmall,
            Error::ZeroDimension { .. }
            | Error::UnsupportedChannels(_)
            | Error::UnsupportedSampleDepth { .. } => Self::BandquantValueOutOfRange,
        }
    }
}

fn status(result: Result<(), Error>) -> BandquantError {
    result.err().map_or(BandquantError::BandquantOk, |e| e.into())
}

/// Wraps caller-owned samples. `channels == 0` describes a 2-D grayscale
/// array. Returns null if the shape is invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bandquant_create_image<'data>(
    data: *const u8,
    width: u32,
    height: u32,
    channels: u32,
) -> Option<Box<Image<'data>>> {
    if data.is_null() {
        return None;
    }

    let shape = match channels {
        0 => Shape::gray(width as usize, height as usize),
        c => Shape::with_channels(width as usize, height as usize, c as usize),
    };
    shape.validate().ok()?;

    let data_slice = unsafe { slice::from_raw_parts(data, shape.sample_count()) };
    Image::new(data_slice, shape).ok().map(Box::new)
}

/// Writes the processed samples of `image` into `buffer`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bandquant_process(
    image: Option<&Image>,
    option: i32,
    buffer: *mut u8,
    buffer_size: usize,
) -> BandquantError {
    let Some(image) = image else {
        return BandquantError::BandquantMissingInput;
    };

    let option = match ProcessingOption::try_from(option) {
        Ok(option) => option,
        Err(e) => return e.into(),
    };

    let expected = image.data.len();
    if buffer.is_null() || buffer_size < expected {
        return status(Err(Error::BufferTooSmall { expected, actual: buffer_size }));
    }

    let buf = unsafe { slice::from_raw_parts_mut(buffer, buffer_size) };
    buf[..expected].copy_from_slice(process_image(image, option).as_slice());

    BandquantError::BandquantOk
}

/// Quantizes `len` samples in place
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bandquant_quantize_in_place(samples: *mut u8, len: usize) -> BandquantError {
    if samples.is_null() {
        return BandquantError::BandquantMissingInput;
    }

    quantize_in_place(unsafe { slice::from_raw_parts_mut(samples, len) });
    BandquantError::BandquantOk
}

/// Reduces `len` samples to 5 bits in place
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bandquant_reduce_bit_depth_in_place(samples: *mut u8, len: usize) -> BandquantError {
    if samples.is_null() {
        return BandquantError::BandquantMissingInput;
    }

    reduce_bit_depth_in_place(unsafe { slice::from_raw_parts_mut(samples, len) });
    BandquantError::BandquantOk
}

#[unsafe(no_mangle)]
pub extern "C" fn bandquant_free_image(image: Box<Image>) {
    std::mem::drop(image)
}
