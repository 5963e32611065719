//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Command line configuration for Glosa.
#[derive(Debug, Clone, Parser)]
#[command(name = "glosa", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to annotate
    pub input: PathBuf,

    /// Output directory for the review page
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Read session commands from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Do not open the review page in the browser at exit
    #[arg(long)]
    pub no_open: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input or script file does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        if let Some(script) = &self.script
            && !script.is_file()
        {
            bail!("Script file does not exist: {}", script.display());
        }

        Ok(())
    }

    /// Returns the page title: the input file name.
    pub fn title(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}
