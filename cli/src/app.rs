use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bandquant::{Error, ProcessingOption, Session, Shape};
use image::DynamicImage;
use log::info;

use crate::codec::{self, OutputFormat};

/// Numeric option code for the user's choice.
///
/// A named mode wins over a raw code; with neither the result is `0`, which
/// [`App::on_process_requested`] rejects as "nothing selected".
pub fn option_code(mode: Option<ProcessingOption>, code: Option<i32>) -> i32 {
    mode.map(ProcessingOption::code).or(code).unwrap_or(0)
}

/// What [`App::on_process_requested`] wrote
pub struct ProcessOutcome {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub image: DynamicImage,
}

/// Front-end state: the session plus the path the image came from
#[derive(Default)]
pub struct App {
    session: Session,
    source: Option<PathBuf>,
    grayscale: bool,
}

impl App {
    /// With `grayscale` set, color images are converted to luma on load
    pub fn new(grayscale: bool) -> Self {
        Self { grayscale, ..Self::default() }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Decodes `path` and makes it the image to process
    pub fn on_file_chosen(&mut self, path: &Path) -> Result<Shape> {
        let pixels = codec::load_image(path, self.grayscale)?;
        let shape = pixels.shape();
        info!("loaded {} {:?}", path.display(), shape.dims());

        self.session.load(pixels);
        self.source = Some(path.to_path_buf());

        Ok(shape)
    }

    /// Processes the loaded image with the option `code` and saves it.
    ///
    /// Fails with [`Error::MissingInput`] before looking at the option, and
    /// with [`Error::InvalidOption`] for anything but 1 or 2. Without
    /// `output` the result goes next to the source file.
    pub fn on_process_requested(
        &mut self,
        code: i32,
        output: Option<&Path>,
        format: Option<OutputFormat>,
    ) -> Result<ProcessOutcome> {
        let source = self.source.clone().ok_or(Error::MissingInput)?;

        self.session.select_option(code)?;
        let processed = self.session.process()?;

        let output = output.map_or_else(|| codec::default_output_path(&source), Path::to_path_buf);
        let (path, format) = codec::resolve_output(&output, format)?;

        let image = codec::to_dynamic(&processed)?;
        codec::save_image(&image, &path, format)
            .with_context(|| format!("failed to write result of {}", source.display()))?;

        if let Some(option) = self.session.option() {
            info!("{}: image saved as {}", option, path.display());
        }

        Ok(ProcessOutcome { path, format, image })
    }
}
