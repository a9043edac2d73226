//! PDF merging functionality.
//!
//! [`collect`] turns user input into an ordered list of files, [`merger`]
//! concatenates their pages and [`merge_pdfs`] ties both to the writer.

pub mod collect;
pub mod merger;

pub use collect::{InputKind, MergeList, classify_input, normalize_input, pdfs_in_directory};
pub use merger::{MergeResult, MergeStatistics, Merger};

use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_MERGE_OUTPUT};
use crate::error::{PdfToolsError, Result};
use crate::io::{PdfWriter, WriteStatistics};
use crate::utils::{ensure_extension, unique_path};

/// Everything a finished merge produced.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Statistics about combining the inputs.
    pub statistics: MergeStatistics,

    /// Statistics about writing the output file.
    pub write: WriteStatistics,

    /// Inputs that made it into the output, in page order.
    pub merged_files: Vec<PathBuf>,

    /// Inputs that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Work out where a merge should be written.
///
/// A blank name becomes [`DEFAULT_MERGE_OUTPUT`], `.pdf` is appended when
/// missing, relative names land in `output_dir` and the result is moved to
/// the first free `name(n).pdf` if the file already exists.
pub fn resolve_output_path(raw: &str, output_dir: &Path) -> PathBuf {
    let name = raw.trim();
    let name = if name.is_empty() {
        DEFAULT_MERGE_OUTPUT.to_string()
    } else {
        ensure_extension(name, "pdf")
    };

    let requested = PathBuf::from(name);
    let requested = if requested.is_absolute() {
        requested
    } else {
        output_dir.join(requested)
    };

    unique_path(&requested)
}

/// Merge `inputs` in order and write the result to `output`.
///
/// Nothing is written when `inputs` is empty or no input could be loaded.
///
/// # Errors
///
/// Returns [`PdfToolsError::NoFilesToMerge`] for an empty list, any error
/// from [`Merger::merge`], or a write error from [`PdfWriter`].
///
/// # Examples
///
/// ```no_run
/// use pdftools::{Config, merge};
/// use std::path::{Path, PathBuf};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
/// let output = merge::resolve_output_path("", &config.output_dir);
///
/// let outcome = merge::merge_pdfs(&inputs, &output, &config).await?;
/// println!("Created {} page document", outcome.statistics.total_pages);
/// # Ok(())
/// # }
/// ```
pub async fn merge_pdfs(
    inputs: &[PathBuf],
    output: &Path,
    config: &Config,
) -> Result<MergeOutcome> {
    if inputs.is_empty() {
        return Err(PdfToolsError::NoFilesToMerge);
    }

    let result = Merger::new().merge(inputs, config).await?;
    let write = PdfWriter::from_config(config)
        .save_with_stats(result.document, output)
        .await?;

    tracing::info!(
        output = %write.output_path.display(),
        pages = result.statistics.total_pages,
        "merge complete"
    );

    Ok(MergeOutcome {
        statistics: result.statistics,
        write,
        merged_files: result.merged_files,
        skipped: result.skipped,
    })
}
