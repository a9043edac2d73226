//! Core PDF merging implementation.
//!
//! Inputs are loaded one after another. The first document that loads
//! becomes the base; every later document has its objects renumbered past
//! the base's highest id, its pages detached from their old tree and
//! appended to the base's root `Pages` node.

use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{PdfToolsError, Result};
use crate::io::PdfReader;
use crate::pages::PageExtractor;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs that ended up in the output.
    pub files_merged: usize,

    /// Number of inputs skipped because they failed to load.
    pub files_skipped: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of the merged input files.
    pub input_size: u64,

    /// Time spent loading and combining documents.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of combining documents in memory.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in page order.
    pub merged_files: Vec<PathBuf>,

    /// Inputs that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    page_extractor: PageExtractor,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `inputs` in order and concatenate their pages.
    ///
    /// With `config.continue_on_error` set, inputs failing with a
    /// recoverable error are skipped and reported in
    /// [`MergeResult::skipped`]; otherwise the first failure aborts the
    /// merge.
    ///
    /// # Errors
    ///
    /// - [`PdfToolsError::NoFilesToMerge`] if `inputs` is empty or every
    ///   input was skipped
    /// - the load error of the first failing input when not continuing
    /// - [`PdfToolsError::MergeFailed`] if a page tree cannot be rebuilt
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdftools::merge::Merger;
    /// # use pdftools::Config;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let result = Merger::new().merge(&inputs, &Config::default()).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, inputs: &[PathBuf], config: &Config) -> Result<MergeResult> {
        if inputs.is_empty() {
            return Err(PdfToolsError::NoFilesToMerge);
        }

        let start = Instant::now();
        let mut merged: Option<Document> = None;
        let mut merged_files = Vec::with_capacity(inputs.len());
        let mut skipped = Vec::new();
        let mut input_size = 0;

        for path in inputs {
            let loaded = match self.reader.load(path).await {
                Ok(loaded) => loaded,
                Err(err) if config.continue_on_error && err.is_recoverable() => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping input");
                    skipped.push((path.clone(), err.to_string()));
                    continue;
                }
                Err(err) => return Err(err),
            };

            input_size += loaded.file_size;
            match merged.as_mut() {
                None => merged = Some(loaded.document),
                Some(base) => self.append_document(base, loaded.document, &loaded.path)?,
            }
            merged_files.push(loaded.path);
        }

        let document = merged.ok_or(PdfToolsError::NoFilesToMerge)?;

        let statistics = MergeStatistics {
            files_merged: merged_files.len(),
            files_skipped: skipped.len(),
            total_pages: self.page_extractor.page_count(&document),
            input_size,
            merge_time: start.elapsed(),
        };
        tracing::debug!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            "merged documents"
        );

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
            skipped,
        })
    }

    /// Move every page of `doc` to the end of `base`.
    fn append_document(&self, base: &mut Document, mut doc: Document, source: &Path) -> Result<()> {
        doc.renumber_objects_with(base.max_id + 1);

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &page_ids {
            self.page_extractor
                .materialize_inherited(&mut doc, page_id)
                .map_err(|e| {
                    PdfToolsError::merge_failed(format!("{}: {e}", source.display()))
                })?;
        }

        base.max_id = base.max_id.max(doc.max_id);
        base.objects.extend(doc.objects);

        self.page_extractor.append_pages(base, &page_ids)
    }
}
