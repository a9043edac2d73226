//! Configuration module for pdftools.
//!
//! [`Config`] holds the settings that shape every operation of a session:
//! where generated files go, how aggressively output is compressed, how
//! failures while collecting merge inputs are treated and how chatty the
//! console is. The CLI builds one from its arguments; tests build them
//! directly.

use anyhow::{Context, Result, bail};

use crate::PdfToolsError;
use std::{path::PathBuf, str::FromStr};

/// File name used for merge output when the user does not provide one.
pub const DEFAULT_MERGE_OUTPUT: &str = "merged_output.pdf";

/// Compression level for written PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as they were read.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and drop unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfToolsError;

    /// Parse compression level from string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not one of "none", "standard" or
    /// "maximum" (case-insensitive).
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfToolsError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Page range specification.
///
/// Supports individual pages and ranges:
/// - "1" - single page
/// - "1-5" - range of pages (inclusive)
/// - "1,3,5" - multiple individual pages
/// - "1-5,10-15" - combination of ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    source: String,
    ranges: Vec<PageRangeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageRangeItem {
    Single(u32),
    Range(u32, u32),
}

impl PageRange {
    /// Parse a page range string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string format is invalid or contains page
    /// numbers below 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftools::config::PageRange;
    ///
    /// let range = PageRange::parse("1-5,10").unwrap();
    /// assert!(range.contains(3));
    /// assert!(range.contains(10));
    /// assert!(!range.contains(7));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut ranges = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start, end)) = part.split_once('-') {
                if end.contains('-') {
                    bail!("Invalid page range format: {part}. Expected format like '1-5'");
                }

                let start: u32 = start
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {start}"))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {end}"))?;

                if start == 0 || end == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }

                if start > end {
                    bail!(
                        "Invalid range {start}-{end}: start page must be less than or equal to end page"
                    );
                }

                ranges.push(PageRangeItem::Range(start, end));
            } else {
                let page: u32 = part
                    .parse()
                    .with_context(|| format!("Invalid page number: {part}"))?;

                if page == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }

                ranges.push(PageRangeItem::Single(page));
            }
        }

        if ranges.is_empty() {
            bail!("Page range cannot be empty");
        }

        Ok(Self {
            source: s.trim().to_string(),
            ranges,
        })
    }

    /// Check if a 1-indexed page number is included in this range.
    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|item| match item {
            PageRangeItem::Single(p) => *p == page,
            PageRangeItem::Range(start, end) => page >= *start && page <= *end,
        })
    }

    /// Sorted, deduplicated page numbers of this range up to `max_pages`.
    pub fn to_pages(&self, max_pages: u32) -> Vec<u32> {
        (1..=max_pages).filter(|p| self.contains(*p)).collect()
    }

    /// The range as the user wrote it.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for PageRange {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> crate::Result<Self> {
        Ok(Self::parse(s)?)
    }
}

/// Settings shared by every operation of a session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory receiving merge outputs and split page directories.
    pub output_dir: PathBuf,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Skip merge inputs that fail to load instead of aborting.
    pub continue_on_error: bool,

    /// Compression level for written PDFs.
    pub compression: CompressionLevel,

    /// Pages to include when converting to a document. `None` means all.
    pub convert_pages: Option<PageRange>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            verbose: false,
            quiet: false,
            continue_on_error: false,
            compression: CompressionLevel::default(),
            convert_pages: None,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The output directory exists but is not a directory
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            bail!(
                "Output directory is not a directory: {}",
                self.output_dir.display()
            );
        }

        Ok(())
    }
}
