use log::debug;

use crate::image::{Image, PixelArray};
use crate::options::ProcessingOption;
use crate::table::QUANTIZE_LUT;

/// Samples per parallel chunk
#[cfg(feature = "parallel")]
const PAR_CHUNK: usize = 64 * 1024;

/// Replaces every sample with the median of its band.
///
/// The output has the shape of `image` and only holds values from
/// [`MEDIANS`](crate::MEDIANS).
pub fn quantize(image: &Image) -> PixelArray {
    let mut out = image.to_pixel_array();
    quantize_in_place(out.as_mut_slice());
    out
}

/// Shifts every sample right by 3 bits, mapping 0..=255 to 0..=31
pub fn reduce_bit_depth(image: &Image) -> PixelArray {
    let mut out = image.to_pixel_array();
    reduce_bit_depth_in_place(out.as_mut_slice());
    out
}

/// In-place variant of [`quantize`] over raw samples
pub fn quantize_in_place(samples: &mut [u8]) {
    map_samples(samples, |v| QUANTIZE_LUT[v as usize]);
}

/// In-place variant of [`reduce_bit_depth`] over raw samples
pub fn reduce_bit_depth_in_place(samples: &mut [u8]) {
    map_samples(samples, |v| v >> 3);
}

/// Applies the transform selected by `option`.
///
/// Bit reduction runs as a second pass over the quantized samples.
pub fn process_image(image: &Image, option: ProcessingOption) -> PixelArray {
    debug!(
        "process_image: {} on {:?} ({} samples)",
        option,
        image.shape.dims(),
        image.data.len()
    );

    let mut out = quantize(image);

    if option.reduces_bit_depth() {
        reduce_bit_depth_in_place(out.as_mut_slice());
    }

    out
}

#[cfg(feature = "parallel")]
fn map_samples(samples: &mut [u8], f: impl Fn(u8) -> u8 + Sync) {
    use rayon::prelude::*;

    if samples.len() < PAR_CHUNK {
        samples.iter_mut().for_each(|v| *v = f(*v));
        return;
    }

    samples.par_chunks_mut(PAR_CHUNK).for_each(|chunk| {
        chunk.iter_mut().for_each(|v| *v = f(*v));
    });
}

#[cfg(not(feature = "parallel"))]
fn map_samples(samples: &mut [u8], f: impl Fn(u8) -> u8) {
    samples.iter_mut().for_each(|v| *v = f(*v));
}
