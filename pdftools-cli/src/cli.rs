//! CLI argument parsing for pdftools.
//!
//! The arguments only configure the interactive session; every operation is
//! chosen from the menu once the program is running.

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use pdftools::config::{CompressionLevel, Config, PageRange};
use pdftools::error::{PdfToolsError, Result};

/// Merge, split and convert PDF files interactively.
///
/// pdftools shows a numbered menu: convert a PDF to a Word document, merge
/// several PDFs into one, or split a PDF into one file per page. Paths can
/// be typed or dragged onto the terminal.
#[derive(Parser, Debug)]
#[command(name = "pdftools")]
#[command(version)]
#[command(about = "Merge, split and convert PDF files interactively", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Directory for merged PDFs and split page folders
    ///
    /// Relative merge output names and the `<name>_split_pages` folders are
    /// created here. Converted documents are always written next to their
    /// source PDF.
    #[arg(short, long, value_name = "DIR", default_value = ".", env = "PDFTOOLS_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Compression level for written PDFs
    ///
    /// - none: No compression (preserves exact streams)
    /// - standard: Compress streams (default)
    /// - maximum: Compress streams and drop unused objects
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        default_value = "standard",
        env = "PDFTOOLS_COMPRESSION"
    )]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Skip merge inputs that cannot be read instead of cancelling the merge
    ///
    /// Skipped files are listed with the reason once the merge is written.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Pages to include when converting to a Word document (e.g., "1-5,10")
    ///
    /// Page numbers are 1-indexed. Use commas to separate ranges.
    #[arg(long, value_name = "RANGE")]
    pub pages: Option<String>,

    /// Verbose output - show timings, sizes and diagnostic logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress informational output
    ///
    /// Menus, prompts, final results, warnings and errors are still shown.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is invalid
    /// - Page range format is invalid
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let convert_pages = self
            .pages
            .as_deref()
            .map(PageRange::from_str)
            .transpose()?;

        let config = Config {
            output_dir: self.output_dir.clone(),
            verbose: self.verbose,
            quiet: self.quiet,
            continue_on_error: self.continue_on_error,
            compression,
            convert_pages,
        };

        config.validate().map_err(|e| {
            PdfToolsError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Default `tracing` filter directive for these flags.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pdftools").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap().to_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.compression, CompressionLevel::Standard);
        assert!(!config.continue_on_error);
        assert!(config.convert_pages.is_none());
    }

    #[rstest]
    #[case("none", CompressionLevel::None)]
    #[case("standard", CompressionLevel::Standard)]
    #[case("maximum", CompressionLevel::Maximum)]
    fn test_compression(#[case] value: &str, #[case] expected: CompressionLevel) {
        let config = parse(&["-c", value]).unwrap().to_config().unwrap();
        assert_eq!(config.compression, expected);
    }

    #[test]
    fn test_unknown_compression_rejected() {
        assert!(parse(&["--compression", "ultra"]).is_err());
    }

    #[test]
    fn test_pages_parsed() {
        let config = parse(&["--pages", "1-3,7"]).unwrap().to_config().unwrap();
        let pages = config.convert_pages.unwrap();
        assert!(pages.contains(2));
        assert!(pages.contains(7));
        assert!(!pages.contains(5));
    }

    #[test]
    fn test_bad_pages_rejected() {
        let cli = parse(&["--pages", "3-x"]).unwrap();
        assert!(matches!(
            cli.to_config(),
            Err(PdfToolsError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(parse(&["-v", "-q"]).is_err());
    }

    #[test]
    fn test_output_dir_must_be_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let cli = parse(&["-o", &file.path().to_string_lossy()]).unwrap();
        assert!(cli.to_config().is_err());
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(parse(&["-v"]).unwrap().log_filter(), "debug");
        assert_eq!(parse(&[]).unwrap().log_filter(), "warn");
    }
}
