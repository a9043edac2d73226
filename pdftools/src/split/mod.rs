//! Splitting a PDF into single-page files.
//!
//! `report.pdf` with three pages becomes
//!
//! ```text
//! report_split_pages/
//!     report_page_1.pdf
//!     report_page_2.pdf
//!     report_page_3.pdf
//! ```
//!
//! inside the configured output directory. An existing directory of that
//! name is never reused; the first free `report_split_pages(n)` is taken
//! instead.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{PdfToolsError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::pages::PageExtractor;
use crate::utils::{file_stem_or_default, unique_dir_path};

/// Suffix appended to the input stem to name the output directory.
pub const SPLIT_DIR_SUFFIX: &str = "_split_pages";

/// Directory that will receive the pages of `input`.
pub fn split_output_dir(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = file_stem_or_default(input);
    unique_dir_path(&output_dir.join(format!("{stem}{SPLIT_DIR_SUFFIX}")))
}

/// File name of page `page_number` (1-based).
pub fn page_file_name(stem: &str, page_number: u32) -> String {
    format!("{stem}_page_{page_number}.pdf")
}

/// Result of a split operation.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Directory holding the page files.
    pub output_dir: PathBuf,

    /// Written files in page order.
    pub files: Vec<PathBuf>,

    /// Number of pages in the input.
    pub page_count: usize,

    /// Total time taken.
    pub split_time: Duration,
}

/// Writes every page of a document to its own file.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    reader: PdfReader,
    writer: PdfWriter,
    page_extractor: PageExtractor,
}

impl Splitter {
    /// Create a splitter writing with `config`'s compression.
    pub fn new(config: &Config) -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::from_config(config),
            page_extractor: PageExtractor::new(),
        }
    }

    /// Split `input` into `output_dir`, which must not exist yet or be
    /// empty.
    ///
    /// The input is fully loaded before anything is created on disk, so a
    /// missing, non-PDF or unreadable input leaves no directory behind.
    ///
    /// # Errors
    ///
    /// - any load error from [`PdfReader::load`]
    /// - [`PdfToolsError::FailedToCreateOutput`] if the directory cannot
    ///   be created
    /// - write errors for individual pages; pages written before the
    ///   failure are kept
    pub async fn split(&self, input: &Path, output_dir: &Path) -> Result<SplitResult> {
        let start = Instant::now();
        let loaded = self.reader.load(input).await?;
        let stem = file_stem_or_default(input);

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| PdfToolsError::FailedToCreateOutput {
                path: output_dir.to_path_buf(),
                source: e,
            })?;

        let mut files = Vec::with_capacity(loaded.page_count);
        for page_number in loaded.document.get_pages().into_keys() {
            let single = self
                .page_extractor
                .extract_page(&loaded.document, page_number)?;
            let path = output_dir.join(page_file_name(&stem, page_number));

            self.writer.save(single, &path).await?;
            tracing::debug!(page = page_number, path = %path.display(), "wrote page");
            files.push(path);
        }

        tracing::info!(
            input = %input.display(),
            pages = files.len(),
            dir = %output_dir.display(),
            "split complete"
        );

        Ok(SplitResult {
            output_dir: output_dir.to_path_buf(),
            files,
            page_count: loaded.page_count,
            split_time: start.elapsed(),
        })
    }
}

/// Split `input` into a fresh `<stem>_split_pages` directory under
/// `config.output_dir`.
///
/// # Errors
///
/// See [`Splitter::split`].
///
/// # Examples
///
/// ```no_run
/// use pdftools::{Config, split};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = split::split_pdf(Path::new("report.pdf"), &Config::default()).await?;
/// println!("{} pages in {}", result.files.len(), result.output_dir.display());
/// # Ok(())
/// # }
/// ```
pub async fn split_pdf(input: &Path, config: &Config) -> Result<SplitResult> {
    PdfReader::check_pdf_path(input)?;
    let output_dir = split_output_dir(input, &config.output_dir);
    Splitter::new(config).split(input, &output_dir).await
}
