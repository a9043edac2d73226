//! pdftools - merge, split and convert PDF files.
//!
//! An interactive command-line front end over the `pdftools` library.

mod cli;
mod session;

use clap::Parser;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::session::Session;
use pdftools::config::Config;
use pdftools::output::OutputFormatter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(2);
        }
    };

    if let Err(err) = run(config).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Run the menu on the terminal.
async fn run(config: Config) -> io::Result<()> {
    let console = OutputFormatter::from_config(&config);
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), console, config);
    session.run().await
}
