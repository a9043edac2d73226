//! Building the ordered list of files to merge.
//!
//! The prompt loop hands every line the user types to [`classify_input`]
//! and decides what to do from the returned [`InputKind`]; nothing in here
//! reads from the console.

use glob::MatchOptions;
use std::path::{Path, PathBuf};

use crate::error::{PdfToolsError, Result};
use crate::utils::has_pdf_extension;

/// What a line of user input refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Empty input: collection is over.
    Finished,
    /// An existing file with a `.pdf` extension.
    PdfFile(PathBuf),
    /// An existing directory and its immediate PDF children, sorted.
    Directory {
        /// The directory itself.
        path: PathBuf,
        /// PDFs directly inside it, in lexicographic order. May be empty.
        pdfs: Vec<PathBuf>,
    },
    /// Anything else: missing paths, non-PDF files, special files.
    Invalid(PathBuf),
}

/// Strip surrounding whitespace and the quotes terminals add when a file is
/// dragged onto the window.
pub fn normalize_input(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

/// Classify one line of user input.
///
/// # Errors
///
/// Returns an error only if a directory cannot be listed.
pub fn classify_input(raw: &str) -> Result<InputKind> {
    let input = normalize_input(raw);
    if input.is_empty() {
        return Ok(InputKind::Finished);
    }

    let path = PathBuf::from(input);
    if path.is_file() && has_pdf_extension(&path) {
        Ok(InputKind::PdfFile(path))
    } else if path.is_dir() {
        let pdfs = pdfs_in_directory(&path)?;
        Ok(InputKind::Directory { path, pdfs })
    } else {
        Ok(InputKind::Invalid(path))
    }
}

/// List the `.pdf` files directly inside `dir`, in lexicographic order.
///
/// Matching ignores case, so `SCAN.PDF` is picked up. Subdirectories are not
/// searched.
pub fn pdfs_in_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.pdf",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let entries = glob::glob_with(&pattern, options).map_err(|err| PdfToolsError::Other {
        message: err.to_string(),
    })?;

    let mut pdfs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| PdfToolsError::Other {
            message: err.to_string(),
        })?;
        if path.is_file() {
            pdfs.push(path);
        }
    }

    pdfs.sort();
    tracing::debug!(dir = %dir.display(), found = pdfs.len(), "listed pdfs");
    Ok(pdfs)
}

/// Ordered list of PDFs awaiting a merge. Order of insertion is the order
/// of pages in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeList {
    files: Vec<PathBuf>,
}

impl MergeList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file.
    pub fn push(&mut self, path: PathBuf) {
        self.files.push(path);
    }

    /// Append several files, keeping their order.
    pub fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        self.files.extend(paths);
    }

    /// Number of queued files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Queued files in merge order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }
}
