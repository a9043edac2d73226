//! PDF to DOCX conversion.
//!
//! Text is pulled out of each page with `lopdf` and laid out as one
//! paragraph per line, with a page break between pages. Images, fonts and
//! positioning are not carried over.

pub mod docx;

pub use docx::DocxDocument;

use lopdf::{Document, Object};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::{Config, PageRange};
use crate::error::{PdfToolsError, Result};
use crate::io::PdfReader;
use crate::io::writer::temp_path_for;
use crate::utils::{ensure_extension, file_stem_or_default, format_file_size};

/// Where the converted document for `pdf` goes.
///
/// Without `custom` this is `<pdf dir>/<stem>.docx`. A custom name is placed
/// in the same directory with `.docx` appended unless already present.
/// Existing files are overwritten.
pub fn resolve_output_path(pdf: &Path, custom: Option<&str>) -> PathBuf {
    let dir = pdf.parent().unwrap_or_else(|| Path::new(""));
    let name = match custom.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => ensure_extension(name, "docx"),
        None => format!("{}.docx", file_stem_or_default(pdf)),
    };
    dir.join(name)
}

/// Statistics about a conversion.
#[derive(Debug, Clone)]
pub struct ConvertStatistics {
    /// Written document.
    pub output_path: PathBuf,

    /// Pages written to the document.
    pub pages_converted: usize,

    /// Pages that produced no text.
    pub pages_without_text: usize,

    /// Size of the written document in bytes.
    pub file_size: u64,

    /// Total time taken.
    pub convert_time: Duration,
}

impl ConvertStatistics {
    /// Format output size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Converts PDFs to DOCX documents.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    reader: PdfReader,
}

impl DocxConverter {
    /// Create a new converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `input` into a DOCX document at `output`.
    ///
    /// `pages` restricts the conversion to a subset of pages; `None`
    /// converts the whole document.
    ///
    /// # Errors
    ///
    /// - any load error from [`PdfReader::load`]
    /// - [`PdfToolsError::InvalidPageRange`] if `pages` selects no page
    /// - [`PdfToolsError::FailedToCreateOutput`] if `output` cannot be
    ///   created
    /// - [`PdfToolsError::ConversionFailed`] if the archive cannot be written
    /// - [`PdfToolsError::FailedToWrite`] if the finished archive cannot be
    ///   moved into place
    pub async fn convert(
        &self,
        input: &Path,
        output: &Path,
        pages: Option<&PageRange>,
    ) -> Result<ConvertStatistics> {
        let start = Instant::now();
        let loaded = self.reader.load(input).await?;

        let selected: Vec<u32> = match pages {
            Some(range) => range.to_pages(loaded.page_count as u32),
            None => loaded.document.get_pages().into_keys().collect(),
        };
        if selected.is_empty() {
            return Err(PdfToolsError::InvalidPageRange {
                path: input.to_path_buf(),
                range: pages.map(|r| r.as_str().to_string()).unwrap_or_default(),
                total_pages: loaded.page_count,
            });
        }

        let input = input.to_path_buf();
        let output = output.to_path_buf();
        let document = loaded.document;

        task::spawn_blocking(move || {
            let (content, pages_without_text) = extract_document(&document, &selected);

            // build beside the target; it is only replaced once complete
            let temp = temp_path_for(&output);
            let file = std::fs::File::create(&temp).map_err(|e| {
                PdfToolsError::FailedToCreateOutput {
                    path: temp.clone(),
                    source: e,
                }
            })?;
            let written = content
                .write(BufWriter::new(file))
                .and_then(|writer| writer.into_inner().map_err(|e| e.into_error().into()))
                .map_err(|e| PdfToolsError::conversion_failed(input.clone(), e.to_string()));
            if let Err(err) = written {
                let _ = std::fs::remove_file(&temp);
                return Err(err);
            }

            if let Err(e) = std::fs::rename(&temp, &output) {
                let _ = std::fs::remove_file(&temp);
                return Err(PdfToolsError::FailedToWrite {
                    path: output,
                    source: e,
                });
            }

            let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                pages = selected.len(),
                "conversion complete"
            );

            Ok(ConvertStatistics {
                output_path: output,
                pages_converted: selected.len(),
                pages_without_text,
                file_size,
                convert_time: start.elapsed(),
            })
        })
        .await
        .map_err(|e| PdfToolsError::other(format!("Convert task failed: {e}")))?
    }
}

/// Convert `input` to `output` using the page selection from `config`.
///
/// # Errors
///
/// See [`DocxConverter::convert`].
///
/// # Examples
///
/// ```no_run
/// use pdftools::{Config, convert};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let input = Path::new("report.pdf");
/// let output = convert::resolve_output_path(input, None);
/// let stats = convert::convert_pdf(input, &output, &Config::default()).await?;
/// println!("Wrote {}", stats.output_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn convert_pdf(
    input: &Path,
    output: &Path,
    config: &Config,
) -> Result<ConvertStatistics> {
    DocxConverter::new()
        .convert(input, output, config.convert_pages.as_ref())
        .await
}

/// Paragraphs for each selected page plus the number of pages without text.
fn extract_document(doc: &Document, pages: &[u32]) -> (DocxDocument, usize) {
    let mut without_text = 0;
    let mut content = Vec::with_capacity(pages.len());

    for &page in pages {
        let paragraphs: Vec<String> = match doc.extract_text(&[page]) {
            Ok(text) => text
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                tracing::warn!(page, error = %e, "could not extract text");
                Vec::new()
            }
        };

        if paragraphs.is_empty() {
            without_text += 1;
        }
        tracing::debug!(page, paragraphs = paragraphs.len(), "extracted page");
        content.push(paragraphs);
    }

    let document = DocxDocument {
        title: document_title(doc),
        pages: content,
    };
    (document, without_text)
}

/// `Title` entry of the document information dictionary, if any.
fn document_title(doc: &Document) -> Option<String> {
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    let Object::String(bytes, _) = info.get(b"Title").ok()? else {
        return None;
    };

    let title = decode_text_string(bytes);
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Decode a PDF text string: UTF-16BE with a byte order mark, otherwise
/// treated as Latin-1.
fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
