use std::ops::RangeInclusive;

/// Number of bands the 8-bit value domain is split into
pub const BAND_COUNT: usize = 32;

/// Number of consecutive values covered by one band
pub const BAND_WIDTH: usize = 8;

/// Representative value of each band: `8 * i + 4`
pub const MEDIANS: [u8; BAND_COUNT] = build_medians();

/// Value-to-median lookup for every possible 8-bit sample
pub const QUANTIZE_LUT: [u8; 256] = build_lut();

const fn build_medians() -> [u8; BAND_COUNT] {
    let mut medians = [0u8; BAND_COUNT];
    let mut i = 0;
    while i < BAND_COUNT {
        medians[i] = (i * BAND_WIDTH + BAND_WIDTH / 2) as u8;
        i += 1;
    }
    medians
}

const fn build_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut band = 0;
    while band < BAND_COUNT {
        let lower = band * BAND_WIDTH;
        let mut v = lower;
        while v < lower + BAND_WIDTH {
            lut[v] = MEDIANS[band];
            v += 1;
        }
        band += 1;
    }
    lut
}

/// The fixed 32-band quantization table.
///
/// Band `i` covers the values `8 * i ..= 8 * i + 7` and maps every one of
/// them to the band median `8 * i + 4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantizationTable;

impl QuantizationTable {
    /// Returns the band index (0..32) the value falls into
    #[inline(always)]
    pub const fn band_of(&self, value: u8) -> usize {
        (value >> 3) as usize
    }

    /// Returns the median of `band`, or `None` if the index is out of range
    pub fn median(&self, band: usize) -> Option<u8> {
        MEDIANS.get(band).copied()
    }

    /// Returns the inclusive value range covered by `band`
    pub fn bounds(&self, band: usize) -> Option<RangeInclusive<u8>> {
        if band >= BAND_COUNT {
            return None;
        }

        let lower = (band * BAND_WIDTH) as u8;
        Some(lower..=lower + (BAND_WIDTH - 1) as u8)
    }

    /// Maps a value to its band median.
    ///
    /// Rounding down to a multiple of 8 and setting bit 2 gives the same
    /// result as walking the bands.
    #[inline(always)]
    pub const fn quantize_value(&self, value: u8) -> u8 {
        (value & 0xF8) | 0x04
    }

    /// Iterates over `(bounds, median)` pairs in band order
    pub fn bands(&self) -> impl Iterator<Item = (RangeInclusive<u8>, u8)> + '_ {
        (0..BAND_COUNT).filter_map(move |band| Some((self.bounds(band)?, MEDIANS[band])))
    }
}
