//! PDF reading and loading operations.
//!
//! Documents are parsed by `lopdf` on a blocking task so the prompt loop's
//! runtime is never stalled by a large file. Loading is always one document
//! at a time; callers await each load before starting the next.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfToolsError, Result};
use crate::utils::has_pdf_extension;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// Loads PDFs from disk, rejecting documents without pages.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` names an existing regular file ending in `.pdf`.
    ///
    /// # Errors
    ///
    /// - [`PdfToolsError::FileNotFound`] if nothing exists at `path`
    /// - [`PdfToolsError::NotAFile`] if `path` is a directory or other non-file
    /// - [`PdfToolsError::NotAPdf`] if the extension is not `.pdf`
    pub fn check_pdf_path(path: &Path) -> Result<()> {
        if !path.try_exists()? {
            return Err(PdfToolsError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfToolsError::not_a_file(path.to_path_buf()));
        }

        if !has_pdf_extension(path) {
            return Err(PdfToolsError::not_a_pdf(path.to_path_buf()));
        }

        Ok(())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path fails [`PdfReader::check_pdf_path`]
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_pdf_path(path)?;

        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || {
            let start = Instant::now();

            let doc = Document::load(&path_buf).map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    PdfToolsError::encrypted_pdf(path_buf.clone())
                } else {
                    PdfToolsError::failed_to_load_pdf(path_buf.clone(), err_msg)
                }
            })?;

            if doc.get_pages().is_empty() {
                return Err(PdfToolsError::corrupted_pdf(path_buf, "PDF has no pages"));
            }

            let loaded = LoadedPdf::new(doc, path_buf, start.elapsed());
            tracing::debug!(
                path = %loaded.path.display(),
                pages = loaded.page_count,
                bytes = loaded.file_size,
                "loaded pdf"
            );
            Ok(loaded)
        })
        .await
        .map_err(|e| PdfToolsError::other(format!("Load task failed: {e}")))?
    }
}
