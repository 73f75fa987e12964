//! Generate-config command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Commented configuration with every setting at its default value
pub const CONFIG_TEMPLATE: &str = r#"# addtiddler configuration
#
# Pass this file with `addtiddler add --config FILE`.
# Command-line flags override these values.

[tiddler]
# Written as the modifier of new tiddlers
author = "author"

# Space-delimited tags, e.g. "images temperature depth"
tags = ""

# Hours added to the local clock for the modified/created stamps
utc_offset_hours = 0

[behavior]
# Replace existing tiddlers with the same title without asking
replace = false

# Embed 500px thumbnails instead of the original images
resize = false
"#;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Where to write the configuration file
    #[arg(short, long, value_name = "FILE", default_value = "addtiddler.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }
        std::fs::write(&self.output, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;
        println!("Wrote configuration to {}", self.output.display());
        Ok(())
    }
}
