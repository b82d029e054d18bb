use log::debug;

use crate::error::{Error, Result};
use crate::image::PixelArray;
use crate::options::{Options, ProcessingOption};
use crate::quantize::process_image;

/// Image loaded by the caller plus the option picked for it.
///
/// Front ends keep one of these instead of stashing the selection in widget
/// state, and drive it through [`Session::load`] and [`Session::process`].
#[derive(Debug, Default)]
pub struct Session {
    image: Option<PixelArray>,
    options: Options,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the loaded image
    pub fn load(&mut self, image: PixelArray) {
        debug!("session: loaded {:?}", image.shape().dims());
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&PixelArray> {
        self.image.as_ref()
    }

    /// Selects an option by numeric code. See [`Options::set_processing_option`].
    pub fn select_option(&mut self, code: i32) -> Result<()> {
        self.options.set_processing_option(code)
    }

    pub fn clear_option(&mut self) {
        self.options.processing_option = None;
    }

    pub fn option(&self) -> Option<ProcessingOption> {
        self.options.processing_option
    }

    /// Runs the selected transform on the loaded image.
    ///
    /// Returns [`Error::MissingInput`] if no image was loaded and
    /// [`Error::InvalidOption`] if no option is selected, in that order.
    /// The loaded image stays in the session.
    pub fn process(&self) -> Result<PixelArray> {
        let image = self.image.as_ref().ok_or(Error::MissingInput)?;
        let option = self.options.get_processing_option()?;

        Ok(process_image(&image.as_image(), option))
    }
}
