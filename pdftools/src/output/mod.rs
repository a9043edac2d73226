//! Output formatting and display for pdftools.
//!
//! This module handles all user-facing output including:
//! - Leveled status messages (info, success, warning, error, debug)
//! - Prompts for the interactive session
//! - Summaries of finished operations
//! - Quiet and verbose modes
//!
//! The summaries always report where the output went, even in quiet mode.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::convert::ConvertStatistics;
use crate::merge::MergeOutcome;
use crate::split::SplitResult;
use std::io::{self, Write};

/// Display the outcome of a merge.
pub fn display_merge_summary<W: Write>(
    formatter: &mut OutputFormatter<W>,
    outcome: &MergeOutcome,
) -> io::Result<()> {
    for (path, reason) in &outcome.skipped {
        formatter.warning(&format!("Skipped {}: {reason}", path.display()))?;
    }

    formatter.outcome(&format!(
        "Merged PDF saved as: {} ({} pages, {})",
        outcome.write.output_path.display(),
        outcome.statistics.total_pages,
        outcome.write.format_file_size()
    ))?;

    formatter.detail("Input files", &outcome.statistics.files_merged.to_string())?;
    formatter.detail("Input size", &outcome.statistics.format_input_size())?;
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", outcome.statistics.merge_time.as_secs_f64()),
    )?;
    formatter.detail(
        "Write time",
        &format!("{:.2}s", outcome.write.write_time.as_secs_f64()),
    )
}

/// Display the outcome of a split.
pub fn display_split_summary<W: Write>(
    formatter: &mut OutputFormatter<W>,
    result: &SplitResult,
) -> io::Result<()> {
    for file in &result.files {
        formatter.success(&format!("Saved: {}", file.display()))?;
    }

    formatter.blank_line()?;
    formatter.outcome(&format!(
        "All {} page(s) have been split into individual PDFs in the directory: {}",
        result.files.len(),
        result.output_dir.display()
    ))?;
    formatter.detail(
        "Split time",
        &format!("{:.2}s", result.split_time.as_secs_f64()),
    )
}

/// Display the outcome of a conversion.
pub fn display_convert_summary<W: Write>(
    formatter: &mut OutputFormatter<W>,
    stats: &ConvertStatistics,
) -> io::Result<()> {
    if stats.pages_without_text > 0 {
        formatter.warning(&format!(
            "{} page(s) had no extractable text",
            stats.pages_without_text
        ))?;
    }

    formatter.outcome(&format!(
        "Conversion successful! Word file saved at: {}",
        stats.output_path.display()
    ))?;
    formatter.detail("Pages converted", &stats.pages_converted.to_string())?;
    formatter.detail("Output size", &stats.format_file_size())?;
    formatter.detail(
        "Convert time",
        &format!("{:.2}s", stats.convert_time.as_secs_f64()),
    )
}
