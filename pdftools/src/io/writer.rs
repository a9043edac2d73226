//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to a sibling temp file, then rename)
//! - Compression according to [`CompressionLevel`]
//! - Creation of missing parent directories
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::{CompressionLevel, Config};
use crate::error::{PdfToolsError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compression applied before writing.
    pub compression: CompressionLevel,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer honouring the session's compression setting.
    pub fn from_config(config: &Config) -> Self {
        Self::with_options(WriteOptions {
            compression: config.compression,
            ..Default::default()
        })
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directories cannot be created
    /// - The file cannot be created (permissions, missing volume)
    /// - Serialization or flushing fails
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdftools::io::writer::PdfWriter;
    /// # use lopdf::Document;
    /// # use std::path::Path;
    /// # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let writer = PdfWriter::new();
    /// let stats = writer.save_with_stats(doc, Path::new("output.pdf")).await?;
    /// println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_with_stats(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || {
            let start = Instant::now();

            match options.compression {
                CompressionLevel::None => {}
                CompressionLevel::Standard => doc.compress(),
                CompressionLevel::Maximum => {
                    doc.prune_objects();
                    doc.compress();
                }
            }
            doc.renumber_objects();

            if let Some(parent) = path_buf.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PdfToolsError::FailedToCreateOutput {
                        path: parent.to_path_buf(),
                        source: e,
                    }
                })?;
            }

            let write_path = if options.atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|e| {
                PdfToolsError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            let written = doc
                .save_to(&mut writer)
                .map_err(|e| PdfToolsError::FailedToWrite {
                    path: write_path.clone(),
                    source: std::io::Error::other(e),
                })
                .and_then(|_| {
                    writer.flush().map_err(|e| PdfToolsError::FailedToWrite {
                        path: write_path.clone(),
                        source: e,
                    })
                });

            if let Err(err) = written {
                drop(writer);
                let _ = std::fs::remove_file(&write_path);
                return Err(err);
            }
            drop(writer);

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    PdfToolsError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);
            tracing::debug!(path = %path_buf.display(), bytes = file_size, "wrote pdf");

            Ok::<_, PdfToolsError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
                compressed: options.compression != CompressionLevel::None,
            })
        })
        .await
        .map_err(|e| PdfToolsError::other(format!("Write task failed: {e}")))?
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// `out.pdf` becomes `out.pdf.tmp` in the same directory.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::build_test_document;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let writer = PdfWriter::new();
        writer
            .save(build_test_document(1), &output_path)
            .await
            .unwrap();

        assert!(output_path.exists());
        assert!(!temp_dir.path().join("output.pdf.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_with_stats() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let stats = PdfWriter::new()
            .save_with_stats(build_test_document(2), &output_path)
            .await
            .unwrap();

        assert!(stats.file_size > 0);
        assert_eq!(stats.output_path, output_path);
        assert!(stats.compressed);

        let reloaded = Document::load(&output_path).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("nested").join("deeper").join("out.pdf");

        PdfWriter::new()
            .save(build_test_document(1), &output_path)
            .await
            .unwrap();

        assert!(output_path.exists());
    }

    #[tokio::test]
    async fn test_custom_options() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let writer = PdfWriter::with_options(WriteOptions {
            atomic: false,
            compression: CompressionLevel::None,
            buffer_size: 4096,
        });

        let stats = writer
            .save_with_stats(build_test_document(1), &output_path)
            .await
            .unwrap();
        assert!(!stats.compressed);
        assert!(output_path.exists());
    }

    #[tokio::test]
    async fn test_unwritable_target_reports_create_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory squatting on the target name makes the rename fail
        // and a non-atomic create fail.
        let output_path = temp_dir.path().join("taken.pdf");
        std::fs::create_dir(&output_path).unwrap();

        let writer = PdfWriter::with_options(WriteOptions {
            atomic: false,
            ..Default::default()
        });
        let result = writer.save(build_test_document(1), &output_path).await;

        assert!(matches!(
            result,
            Err(PdfToolsError::FailedToCreateOutput { .. })
        ));
    }

    #[test]
    fn test_temp_path_for() {
        assert_eq!(
            temp_path_for(Path::new("/out/merged.pdf")),
            PathBuf::from("/out/merged.pdf.tmp")
        );
    }
}
