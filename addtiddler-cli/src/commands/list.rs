//! List command implementation

use crate::error::CliError;
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use addtiddler_core::ChunkScanner;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Input TiddlyWiki file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ListFormat,

    /// Include non-tiddler chunks
    #[arg(short, long)]
    pub all: bool,
}

/// Supported listing formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ListFormat {
    /// One chunk per line
    Text,
    /// JSON array of chunk metadata
    Json,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(CliError::FileNotFound(self.input.display().to_string()).into());
        }
        let file = File::open(&self.input)
            .with_context(|| format!("Failed to read file: {}", self.input.display()))?;

        let stdout = io::stdout();
        let mut formatter = self.formatter(stdout.lock());
        let count = list_chunks(BufReader::new(file), self.all, formatter.as_mut())
            .with_context(|| format!("Failed to scan {}", self.input.display()))?;
        log::info!("listed {count} chunks from {}", self.input.display());
        Ok(())
    }

    fn formatter<'a, W: Write + 'a>(&self, writer: W) -> Box<dyn OutputFormatter + 'a> {
        match self.format {
            ListFormat::Text => Box::new(TextFormatter::new(writer)),
            ListFormat::Json => Box::new(JsonFormatter::new(writer)),
        }
    }
}

/// Feed every chunk (or only tiddlers) from `reader` to `formatter`; returns how many were listed
pub fn list_chunks<R: io::BufRead>(
    reader: R,
    all: bool,
    formatter: &mut dyn OutputFormatter,
) -> Result<usize> {
    let mut listed = 0;
    for (index, chunk) in ChunkScanner::new(reader).enumerate() {
        let chunk = chunk?;
        if all || chunk.is_tiddler() {
            formatter.format_chunk(index, &chunk)?;
            listed += 1;
        }
    }
    formatter.finish()?;
    Ok(listed)
}
