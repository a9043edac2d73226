//! Message formatting and display.
//!
//! [`OutputFormatter`] writes leveled messages to any [`Write`] sink,
//! honouring quiet and verbose modes. The CLI wraps stdout; tests wrap a
//! `Vec<u8>` and inspect what the user would have seen.
//!
//! # Examples
//!
//! ```
//! use pdftools::output::OutputFormatter;
//!
//! let mut formatter = OutputFormatter::new(Vec::new(), false, false);
//! formatter.info("Processing files...").unwrap();
//! formatter.success("Operation completed").unwrap();
//!
//! let text = String::from_utf8(formatter.into_inner()).unwrap();
//! assert!(text.contains("✓ Operation completed"));
//! ```

use crate::config::Config;
use std::io::{self, Stdout, Write};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn decoration(self) -> (&'static str, &'static str) {
        match self {
            Self::Info => ("", ""),
            Self::Success => ("✓ ", "\x1b[32m"),
            Self::Warning => ("⚠ ", "\x1b[33m"),
            Self::Error => ("✗ ", "\x1b[31m"),
            Self::Debug => ("→ ", "\x1b[36m"),
        }
    }
}

/// Output formatter with configurable verbosity.
pub struct OutputFormatter<W: Write = Stdout> {
    out: W,
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter<Stdout> {
    /// Formatter writing to stdout, colored when stdout is a terminal.
    pub fn stdout(quiet: bool, verbose: bool) -> Self {
        let mut formatter = Self::new(io::stdout(), quiet, verbose);
        formatter.colored = Self::should_use_color();
        formatter
    }

    /// Stdout formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::stdout(config.quiet, config.verbose)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }
}

impl<W: Write> OutputFormatter<W> {
    /// Create an uncolored formatter over `out`.
    pub fn new(out: W, quiet: bool, verbose: bool) -> Self {
        Self {
            out,
            quiet,
            verbose,
            colored: false,
        }
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.print_message(MessageLevel::Info, message)
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&mut self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.print_message(MessageLevel::Success, message)
    }

    /// Print the final result of an operation with the success mark.
    ///
    /// Always displayed, so a quiet session still learns where its output
    /// went.
    pub fn outcome(&mut self, message: &str) -> io::Result<()> {
        self.print_message(MessageLevel::Success, message)
    }

    /// Print a warning message. Always displayed.
    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.print_message(MessageLevel::Warning, message)
    }

    /// Print an error message. Always displayed.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.print_message(MessageLevel::Error, message)
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&mut self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.print_message(MessageLevel::Debug, message)
    }

    fn print_message(&mut self, level: MessageLevel, message: &str) -> io::Result<()> {
        let (prefix, color_code) = level.decoration();

        if self.colored && !color_code.is_empty() {
            writeln!(self.out, "{color_code}{prefix}{message}\x1b[0m")
        } else {
            writeln!(self.out, "{prefix}{message}")
        }
    }

    /// Print a question without a trailing newline and flush.
    ///
    /// Prompts are shown in every mode: a quiet session still needs to know
    /// what it is being asked.
    pub fn prompt(&mut self, question: &str) -> io::Result<()> {
        write!(self.out, "{question}")?;
        self.out.flush()
    }

    /// Print a plain line in every mode. Used for menus and listings the
    /// user must see to answer the next prompt.
    pub fn line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.out, "\n{title}")
    }

    /// Print a labelled value. Only shown in verbose mode.
    pub fn detail(&mut self, label: &str, value: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        writeln!(self.out, "  {label}: {value}")
    }

    /// Print a blank line. Suppressed in quiet mode.
    pub fn blank_line(&mut self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.out)
    }

    /// Consume the formatter and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
