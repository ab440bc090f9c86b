//! `docpage render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use docpage_config::{CliSettings, Config};

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: read standard input).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docpage.toml).
    #[arg(short, long, env = "DOCPAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Render `#` headings as `<h1>` instead of `<h2>`.
    #[arg(long)]
    keep_h1: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            demote_h1: self.keep_h1.then_some(false),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };
        tracing::info!(bytes = markdown.len(), "Rendering markdown");

        let html = renderer_from_config(&config).render(&markdown);
        output.fragment(&html)?;
        Ok(())
    }
}
