//! docpage CLI - documentation page renderer.
//!
//! Provides commands for:
//! - `render`: Render a local markdown file (or stdin) to an HTML fragment
//! - `fetch`: Fetch a remote README and render it, with fallback fragments

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FetchArgs, RenderArgs};
use output::Output;

/// docpage - Documentation page renderer.
#[derive(Parser)]
#[command(name = "docpage", version, about)]
struct Cli {
    /// Enable verbose output (INFO level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to an HTML fragment.
    Render(RenderArgs),
    /// Fetch a remote markdown document and render it.
    Fetch(FetchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Fetch(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
