//! `docpage fetch` command implementation.

use std::path::PathBuf;

use clap::Args;
use docpage_config::{CliSettings, Config};
use docpage_fetch::ReadmeClient;

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the fetch command.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Document name from `[documents]` or a raw markdown URL.
    document: String,

    /// Path to configuration file (default: auto-discover docpage.toml).
    #[arg(short, long, env = "DOCPAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides config).
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Render `#` headings as `<h1>` instead of `<h2>`.
    #[arg(long)]
    keep_h1: bool,

    /// Exit with an error instead of printing the fallback fragment.
    #[arg(long)]
    strict: bool,
}

impl FetchArgs {
    /// Execute the fetch command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the document is unknown, or
    /// (with `--strict`) the fetch fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            timeout_secs: self.timeout,
            demote_h1: self.keep_h1.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let url = config.resolve_document(&self.document)?;

        let renderer = renderer_from_config(&config);
        let mut client = ReadmeClient::new(config.fetch.timeout()).with_renderer(renderer);
        if let Some(ref user_agent) = config.fetch.user_agent {
            client = client.with_user_agent(user_agent.as_str());
        }

        output.info(&format!("Fetching {url}..."));
        let html = if self.strict {
            renderer.render(&client.fetch(url)?)
        } else {
            client.documentation(url)
        };

        output.fragment(&html)?;
        Ok(())
    }
}
