use crate::error::{Error, Result};

/// Maximum number of interleaved channels per pixel
pub const MAX_CHANNELS: usize = 4;

/// Dimensions of a pixel array.
///
/// `channels: None` is a 2-D `(height, width)` array, `Some(c)` a 3-D
/// `(height, width, c)` array with a trailing channel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
    pub channels: Option<usize>,
}

impl Shape {
    /// 2-D grayscale shape
    pub fn gray(width: usize, height: usize) -> Self {
        Self { height, width, channels: None }
    }

    /// 3-D shape with a trailing channel axis
    pub fn with_channels(width: usize, height: usize, channels: usize) -> Self {
        Self { height, width, channels: Some(channels) }
    }

    /// Number of interleaved samples per pixel
    pub fn samples_per_pixel(&self) -> usize {
        self.channels.unwrap_or(1)
    }

    /// Total number of samples
    pub fn sample_count(&self) -> usize {
        self.width * self.height * self.samples_per_pixel()
    }

    /// Returns the shape as a dims vector: `[h, w]` or `[h, w, c]`
    pub fn dims(&self) -> Vec<usize> {
        match self.channels {
            Some(c) => vec![self.height, self.width, c],
            None => vec![self.height, self.width],
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::ZeroDimension { width: self.width, height: self.height });
        }

        if let Some(c) = self.channels {
            if c == 0 || c > MAX_CHANNELS {
                return Err(Error::UnsupportedChannels(c));
            }
        }

        Ok(())
    }
}

/// Image reference containing 8-bit samples and shape info
#[derive(Debug, Clone, Copy)]
pub struct Image<'data> {
    pub shape: Shape,
    pub data: &'data [u8],
}

impl<'data> Image<'data> {
    /// Creates an [`Image`] from a slice of interleaved samples.
    ///
    /// Returns [`Error::BufferTooSmall`] if the slice holds fewer than
    /// `shape.sample_count()` samples. Extra trailing samples are ignored.
    pub fn new(data: &'data [u8], shape: Shape) -> Result<Self> {
        shape.validate()?;

        let expected = shape.sample_count();
        if data.len() < expected {
            return Err(Error::BufferTooSmall { expected, actual: data.len() });
        }

        Ok(Self { shape, data: &data[..expected] })
    }

    /// Creates a 2-D grayscale [`Image`]
    pub fn gray(data: &'data [u8], width: usize, height: usize) -> Result<Self> {
        Self::new(data, Shape::gray(width, height))
    }

    /// Copies the samples into an owned [`PixelArray`]
    pub fn to_pixel_array(&self) -> PixelArray {
        PixelArray { shape: self.shape, data: self.data.to_vec() }
    }
}

/// Owned pixel array. Produced by every transform, same shape as its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelArray {
    shape: Shape,
    data: Vec<u8>,
}

impl PixelArray {
    /// Takes ownership of `data`, truncating it to `shape.sample_count()`
    pub fn new(mut data: Vec<u8>, shape: Shape) -> Result<Self> {
        Image::new(&data, shape)?;
        data.truncate(shape.sample_count());

        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrows the array as an [`Image`]
    pub fn as_image(&self) -> Image<'_> {
        Image { shape: self.shape, data: &self.data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_too_small() {
        let data = [0u8; 11];
        let err = Image::new(&data, Shape::with_channels(2, 2, 3)).unwrap_err();
        assert_eq!(err, Error::BufferTooSmall { expected: 12, actual: 11 });
    }

    #[test]
    fn test_extra_samples_ignored() {
        let data = [1u8; 10];
        let image = Image::gray(&data, 3, 3).unwrap();
        assert_eq!(image.data.len(), 9);

        let array = PixelArray::new(data.to_vec(), Shape::gray(3, 3)).unwrap();
        assert_eq!(array.as_slice().len(), 9);
        assert_eq!(array.as_image().data, image.data);
    }

    #[test]
    fn test_invalid_shapes() {
        let data = [0u8; 16];
        assert_eq!(
            Image::gray(&data, 0, 4).unwrap_err(),
            Error::ZeroDimension { width: 0, height: 4 }
        );
        assert_eq!(
            Image::new(&data, Shape::with_channels(1, 1, 5)).unwrap_err(),
            Error::UnsupportedChannels(5)
        );
        assert_eq!(
            Image::new(&data, Shape::with_channels(1, 1, 0)).unwrap_err(),
            Error::UnsupportedChannels(0)
        );
    }

    #[test]
    fn test_dims() {
        assert_eq!(Shape::gray(4, 3).dims(), vec![3, 4]);
        assert_eq!(Shape::with_channels(4, 3, 1).dims(), vec![3, 4, 1]);
        assert_ne!(Shape::gray(4, 3), Shape::with_channels(4, 3, 1));
        assert_eq!(Shape::with_channels(4, 3, 4).sample_count(), 48);
    }
}
