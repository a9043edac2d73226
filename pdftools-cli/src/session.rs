//! The interactive menu loop.
//!
//! [`Session`] reads answers line by line from any [`BufRead`] and talks
//! through an [`OutputFormatter`], so the whole conversation can be replayed
//! in tests. End of input at any prompt ends the session.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use pdftools::config::{Config, DEFAULT_MERGE_OUTPUT};
use pdftools::convert::{self, convert_pdf};
use pdftools::error::PdfToolsError;
use pdftools::io::PdfReader;
use pdftools::merge::{self, InputKind, MergeList, classify_input, merge_pdfs, normalize_input};
use pdftools::output::{
    OutputFormatter, display_convert_summary, display_merge_summary, display_split_summary,
};
use pdftools::split::split_pdf;

/// Result of one handler: keep going, or stop because input ended.
type Step = io::Result<ControlFlow<()>>;

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Convert a PDF to a Word document.
    Convert,
    /// Merge PDFs into one.
    Merge,
    /// Split a PDF into single pages.
    Split,
}

impl Action {
    /// Parse a menu answer.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Convert),
            "2" => Some(Self::Merge),
            "3" => Some(Self::Split),
            _ => None,
        }
    }
}

/// Interactive session over an input and an output stream.
pub struct Session<R, W: Write> {
    input: R,
    console: OutputFormatter<W>,
    config: Config,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session.
    pub fn new(input: R, console: OutputFormatter<W>, config: Config) -> Self {
        Self {
            input,
            console,
            config,
        }
    }

    /// Hand back the console, mostly to inspect what was printed.
    pub fn into_console(self) -> OutputFormatter<W> {
        self.console
    }

    /// Run the menu loop until the user declines to continue or input ends.
    ///
    /// # Errors
    ///
    /// Only console failures are returned; operation errors are reported
    /// to the user and the loop carries on.
    pub async fn run(&mut self) -> io::Result<()> {
        self.console
            .section(&format!("{} v{}", pdftools::NAME, pdftools::VERSION))?;

        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("Enter the number of your choice: ")? else {
                break;
            };

            let Some(action) = Action::from_choice(&choice) else {
                self.console
                    .error("Invalid choice. Please select a valid option.")?;
                continue;
            };

            tracing::debug!(?action, "dispatching");
            let step = match action {
                Action::Convert => self.handle_convert().await?,
                Action::Merge => self.handle_merge().await?,
                Action::Split => self.handle_split().await?,
            };
            if step.is_break() {
                break;
            }

            self.console.blank_line()?;
            let Some(answer) = self.prompt("Do you want to perform another action? (Y/n): ")?
            else {
                break;
            };
            if is_no(&answer) {
                break;
            }
        }

        self.console.blank_line()?;
        self.console.info("Goodbye!")
    }

    fn show_menu(&mut self) -> io::Result<()> {
        self.console.line("\nChoose an action:")?;
        self.console.line("1. Convert PDF to Word (DOCX)")?;
        self.console.line("2. Merge PDFs")?;
        self.console.line("3. Split PDF into single pages")
    }

    /// Ask `question` and return the answer without its line ending, or
    /// `None` at end of input.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        self.console.prompt(question)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("input closed");
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn handle_merge(&mut self) -> Step {
        self.console.section("Merge PDFs")?;
        self.console.line(
            "Enter PDF files or folders one at a time. Press Enter on an empty line when done.",
        )?;

        let mut list = MergeList::new();
        loop {
            let Some(line) = self.prompt("PDF file or folder: ")? else {
                return Ok(ControlFlow::Break(()));
            };

            match classify_input(&line) {
                Ok(InputKind::Finished) => break,
                Ok(InputKind::PdfFile(path)) => {
                    self.console.success(&format!("Added: {}", path.display()))?;
                    list.push(path);
                }
                Ok(InputKind::Directory { path, pdfs }) if pdfs.is_empty() => {
                    self.console
                        .warning(&format!("No PDF files found in {}", path.display()))?;
                }
                Ok(InputKind::Directory { path, pdfs }) => {
                    self.console.line(&format!(
                        "Found {} PDF file(s) in {}:",
                        pdfs.len(),
                        path.display()
                    ))?;
                    for pdf in &pdfs {
                        self.console.line(&format!("  - {}", display_name(pdf)))?;
                    }

                    let Some(answer) = self.prompt("Add all of these files? (y/n): ")? else {
                        return Ok(ControlFlow::Break(()));
                    };
                    if is_yes(&answer) {
                        self.console
                            .success(&format!("Added {} file(s)", pdfs.len()))?;
                        list.extend(pdfs);
                    } else {
                        self.console.info("Folder skipped.")?;
                    }
                }
                Ok(InputKind::Invalid(path)) => {
                    self.console.error(&format!(
                        "Invalid input: {} is not a PDF file or a folder",
                        path.display()
                    ))?;
                }
                Err(err) => self.console.error(&err.to_string())?,
            }
        }

        if list.is_empty() {
            self.console.error(&PdfToolsError::NoFilesToMerge.to_string())?;
            return Ok(ControlFlow::Continue(()));
        }

        let Some(name) = self.prompt(&format!(
            "Output file name (Enter for {DEFAULT_MERGE_OUTPUT}): "
        ))?
        else {
            return Ok(ControlFlow::Break(()));
        };
        let output = merge::resolve_output_path(normalize_input(&name), &self.config.output_dir);
        self.console
            .debug(&format!("Writing merged PDF to {}", output.display()))?;

        self.console
            .info(&format!("Merging {} file(s)...", list.len()))?;
        match merge_pdfs(list.paths(), &output, &self.config).await {
            Ok(outcome) => display_merge_summary(&mut self.console, &outcome)?,
            Err(err) => self.console.error(&err.to_string())?,
        }

        Ok(ControlFlow::Continue(()))
    }

    async fn handle_split(&mut self) -> Step {
        self.console.section("Split PDF")?;
        let Some(line) = self.prompt("Enter the path of the PDF file to split: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let Some(input) = entered_path(&line) else {
            self.console.error("No file path entered.")?;
            return Ok(ControlFlow::Continue(()));
        };

        self.console.debug(&format!(
            "Page files go under {}",
            self.config.output_dir.display()
        ))?;
        match split_pdf(&input, &self.config).await {
            Ok(result) => display_split_summary(&mut self.console, &result)?,
            Err(err) => self.console.error(&err.to_string())?,
        }

        Ok(ControlFlow::Continue(()))
    }

    async fn handle_convert(&mut self) -> Step {
        self.console.section("Convert PDF to Word")?;

        loop {
            let Some(line) = self.prompt("Enter the path of the PDF file to convert: ")? else {
                return Ok(ControlFlow::Break(()));
            };

            match entered_path(&line) {
                None => self.console.error("No file path entered.")?,
                Some(input) => {
                    if let Err(err) = PdfReader::check_pdf_path(&input) {
                        self.console.error(&err.to_string())?;
                    } else {
                        let Some(custom) = self.prompt(
                            "Enter a name for the Word file (leave blank to use the PDF name): ",
                        )?
                        else {
                            return Ok(ControlFlow::Break(()));
                        };

                        let output =
                            convert::resolve_output_path(&input, Some(normalize_input(&custom)));
                        self.console
                            .debug(&format!("Writing Word file to {}", output.display()))?;
                        self.console.info("Converting...")?;
                        match convert_pdf(&input, &output, &self.config).await {
                            Ok(stats) => display_convert_summary(&mut self.console, &stats)?,
                            Err(err) => self.console.error(&err.to_string())?,
                        }
                    }
                }
            }

            let Some(again) = self.prompt("Do you want to convert another file? (Y/n): ")? else {
                return Ok(ControlFlow::Break(()));
            };
            if is_no(&again) {
                return Ok(ControlFlow::Continue(()));
            }
        }
    }
}

fn entered_path(line: &str) -> Option<PathBuf> {
    let trimmed = normalize_input(line);
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn is_no(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "n" | "no")
}
