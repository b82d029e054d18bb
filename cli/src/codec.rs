//! Image decoding and encoding through the `image` crate.
//!
//! - `load_image`: decode a PNG/JPEG into a [`PixelArray`], rejecting
//!   anything that isn't 8 bits per sample.
//! - `to_dynamic`: wrap a [`PixelArray`] back into a `DynamicImage`.
//! - `save_image`: encode as PNG or JPEG.
//! - `save_preview`: write a thumbnail bounded by [`PREVIEW_SIZE`].
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bandquant::{Error, PixelArray, Shape};
use image::{ColorType, DynamicImage, GrayAlphaImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use log::{debug, warn};

/// Longest side of a preview thumbnail
pub const PREVIEW_SIZE: u32 = 250;

/// Suffix appended to the input file stem when no output path is given
const OUTPUT_SUFFIX: &str = "_quantized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Detects the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Decodes the image at `path`.
///
/// Grayscale images become 2-D arrays, everything else keeps its channel
/// axis. With `grayscale` set, color input is converted to luma first.
pub fn load_image(path: &Path, grayscale: bool) -> Result<PixelArray> {
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let color = img.color();
    let bits = color.bytes_per_pixel() / color.channel_count() * 8;
    if bits != 8 {
        return Err(Error::UnsupportedSampleDepth { bits })
            .with_context(|| format!("can't quantize {}", path.display()));
    }

    let img = if grayscale && !matches!(color, ColorType::L8) {
        debug!("converting {:?} to grayscale", color);
        DynamicImage::ImageLuma8(img.to_luma8())
    } else {
        img
    };

    from_dynamic(img)
}

/// Converts a decoded 8-bit image into a [`PixelArray`]
pub fn from_dynamic(img: DynamicImage) -> Result<PixelArray> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let shape = match img.color() {
        ColorType::L8 => Shape::gray(width, height),
        ColorType::La8 => Shape::with_channels(width, height, 2),
        ColorType::Rgb8 => Shape::with_channels(width, height, 3),
        ColorType::Rgba8 => Shape::with_channels(width, height, 4),
        other => bail!("unsupported color type {:?}", other),
    };

    Ok(PixelArray::new(img.into_bytes(), shape)?)
}

/// Wraps the samples of `array` into a `DynamicImage`
pub fn to_dynamic(array: &PixelArray) -> Result<DynamicImage> {
    let shape = array.shape();
    let width = shape.width as u32;
    let height = shape.height as u32;
    let data = array.as_slice().to_vec();

    let img = match shape.samples_per_pixel() {
        1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, data).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        c => return Err(Error::UnsupportedChannels(c).into()),
    };

    img.context("pixel buffer does not match image dimensions")
}

/// Default output location: `<dir>/<stem>_quantized.png` next to `input`
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{}", OutputFormat::Png.extension()))
}

/// Picks the output format and final path.
///
/// An explicit `format` wins over the extension. A path without extension
/// gets one, `.png` unless `format` says otherwise.
pub fn resolve_output(path: &Path, format: Option<OutputFormat>) -> Result<(PathBuf, OutputFormat)> {
    if path.extension().is_none() {
        let format = format.unwrap_or(OutputFormat::Png);
        return Ok((path.with_extension(format.extension()), format));
    }

    match format.or_else(|| OutputFormat::from_path(path)) {
        Some(format) => Ok((path.to_path_buf(), format)),
        None => bail!(
            "can't detect output format of {}, use .png, .jpg or .jpeg",
            path.display()
        ),
    }
}

/// Encodes `img` to `path`. JPEG has no alpha channel, so it is dropped.
///
/// The image is encoded in memory first; nothing touches the filesystem if
/// encoding fails.
pub fn save_image(img: &DynamicImage, path: &Path, format: OutputFormat) -> Result<()> {
    let flattened;
    let img = match (format, img.color()) {
        (OutputFormat::Jpeg, ColorType::La8) => {
            warn!("JPEG has no alpha channel, dropping it");
            flattened = DynamicImage::ImageLuma8(img.to_luma8());
            &flattened
        }
        (OutputFormat::Jpeg, ColorType::Rgba8) => {
            warn!("JPEG has no alpha channel, dropping it");
            flattened = DynamicImage::ImageRgb8(img.to_rgb8());
            &flattened
        }
        _ => img,
    };

    let mut encoded = Cursor::new(Vec::new());
    img.write_to(&mut encoded, format.image_format())
        .with_context(|| format!("failed to encode {}", path.display()))?;

    ensure_parent_dir(path)?;
    fs::write(path, encoded.into_inner())
        .with_context(|| format!("failed to save {}", path.display()))
}

/// Writes a thumbnail of `img` no larger than [`PREVIEW_SIZE`] on either side
pub fn save_preview(img: &DynamicImage, path: &Path) -> Result<PathBuf> {
    let (path, format) = resolve_output(path, None)?;
    let thumb = img.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE);
    debug!("preview {}x{} -> {}", thumb.width(), thumb.height(), path.display());

    save_image(&thumb, &path, format)?;
    Ok(path)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path(Path::new("a.JPG")), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_path(Path::new("a.jpeg")), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_path(Path::new("a.bmp")), None);
        assert_eq!(OutputFormat::from_path(Path::new("a")), None);
    }

    #[test]
    fn test_resolve_output() {
        let (path, format) = resolve_output(Path::new("out"), None).unwrap();
        assert_eq!(path, PathBuf::from("out.png"));
        assert_eq!(format, OutputFormat::Png);

        let (path, format) = resolve_output(Path::new("out"), Some(OutputFormat::Jpeg)).unwrap();
        assert_eq!(path, PathBuf::from("out.jpeg"));
        assert_eq!(format, OutputFormat::Jpeg);

        let (path, format) = resolve_output(Path::new("out.png"), Some(OutputFormat::Jpeg)).unwrap();
        assert_eq!(path, PathBuf::from("out.png"));
        assert_eq!(format, OutputFormat::Jpeg);

        assert!(resolve_output(Path::new("out.tiff"), None).is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/photos/cat.jpg")),
            PathBuf::from("/tmp/photos/cat_quantized.png")
        );
    }

    #[test]
    fn test_dynamic_conversion_keeps_shape() {
        let gray = PixelArray::new(vec![1, 2, 3, 4, 5, 6], Shape::gray(3, 2)).unwrap();
        let img = to_dynamic(&gray).unwrap();
        assert_eq!(img.color(), ColorType::L8);
        assert_eq!(from_dynamic(img).unwrap(), gray);

        let rgba = PixelArray::new((0..16).collect(), Shape::with_channels(2, 2, 4)).unwrap();
        let img = to_dynamic(&rgba).unwrap();
        assert_eq!(img.color(), ColorType::Rgba8);
        assert_eq!(from_dynamic(img).unwrap(), rgba);
    }

    #[test]
    fn test_single_channel_axis_encodes_as_gray() {
        let array = PixelArray::new(vec![9; 4], Shape::with_channels(2, 2, 1)).unwrap();
        assert_eq!(to_dynamic(&array).unwrap().color(), ColorType::L8);
    }
}
