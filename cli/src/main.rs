//! bandquant CLI
//!
//! Loads an image, applies median quantization (optionally followed by bit
//! reduction) and saves the result as PNG or JPEG.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use bandquant::ProcessingOption;
use bandquant_cli::{App, OutputFormat, option_code};

/// Quantize an 8-bit image into 32 fixed bands.
#[derive(Parser, Debug)]
#[command(name = "bandquant")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image file (PNG or JPEG)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (format detected from extension, defaults to <INPUT>_quantized.png)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Processing mode
    #[arg(short, long, value_enum, conflicts_with = "option")]
    mode: Option<ModeArg>,

    /// Processing option by number: 1 = median quantization, 2 = quantization + bit reduction
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    option: Option<i32>,

    /// Output format (overrides extension detection)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Convert color images to grayscale before processing
    #[arg(long)]
    grayscale: bool,

    /// Also write a thumbnail of the result to this path
    #[arg(long, value_name = "PATH")]
    preview: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Replace every value with its band median
    Median,
    /// Band median followed by reduction to 32 levels
    MedianBits,
}

impl From<ModeArg> for ProcessingOption {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Median => ProcessingOption::MedianQuantization,
            ModeArg::MedianBits => ProcessingOption::MedianQuantizationThenBitReduction,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// PNG format (lossless)
    Png,
    /// JPEG format (lossy)
    Jpeg,
    /// JPEG format (alias for jpeg)
    Jpg,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpeg | FormatArg::Jpg => OutputFormat::Jpeg,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let code = option_code(args.mode.map(ProcessingOption::from), args.option);

    let mut app = App::new(args.grayscale);
    app.on_file_chosen(&args.input)?;

    let outcome = app.on_process_requested(
        code,
        args.output.as_deref(),
        args.format.map(OutputFormat::from),
    )?;

    if let Some(preview) = args.preview {
        let path = bandquant_cli::codec::save_preview(&outcome.image, &preview)?;
        info!("preview saved as {}", path.display());
    }

    println!("{}", outcome.path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(argv: &[&str]) -> i32 {
        let args = Args::try_parse_from(argv).unwrap();
        option_code(args.mode.map(ProcessingOption::from), args.option)
    }

    #[test]
    fn test_option_selection() {
        assert_eq!(code_of(&["bandquant", "in.png", "--mode", "median"]), 1);
        assert_eq!(code_of(&["bandquant", "in.png", "-m", "median-bits"]), 2);
        assert_eq!(code_of(&["bandquant", "in.png", "--option", "2"]), 2);
        assert_eq!(code_of(&["bandquant", "in.png", "--option", "-1"]), -1);
        assert_eq!(code_of(&["bandquant", "in.png"]), 0);
    }

    #[test]
    fn test_mode_conflicts_with_option() {
        let res = Args::try_parse_from(["bandquant", "in.png", "--mode", "median", "--option", "1"]);
        assert_eq!(res.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_format_override() {
        let args = Args::try_parse_from(["bandquant", "in.png", "-f", "jpg", "-o", "out"]).unwrap();
        assert_eq!(args.format.map(OutputFormat::from), Some(OutputFormat::Jpeg));
        assert_eq!(args.output, Some(PathBuf::from("out")));
    }
}
