//! pdftools - merge, split and convert PDF files.
//!
//! This library holds the operations behind the interactive `pdftools`
//! command:
//!
//! - Merging several PDFs (or every PDF in a directory) into one document
//! - Splitting a PDF into one file per page
//! - Converting a PDF's text into a DOCX document
//! - Choosing output names that never clobber existing files
//!
//! Every operation takes a [`Config`] and returns statistics for display.
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdftools::{Config, merge};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let output = merge::resolve_output_path("combined", &config.output_dir);
//!
//! let outcome = merge::merge_pdfs(&inputs, &output, &config).await?;
//! println!("Created {} page document", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Split and convert
//!
//! ```no_run
//! use pdftools::{Config, convert, split};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let input = Path::new("report.pdf");
//!
//! let pages = split::split_pdf(input, &config).await?;
//! println!("{} files in {}", pages.files.len(), pages.output_dir.display());
//!
//! let docx = convert::resolve_output_path(input, None);
//! convert::convert_pdf(input, &docx, &config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod pages;
pub mod split;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfToolsError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
