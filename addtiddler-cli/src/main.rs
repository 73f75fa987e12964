//! addtiddler command-line entry point

use addtiddler_cli::commands::Commands;
use clap::Parser;

/// Add tiddlers, optionally with embedded images, to TiddlyWiki files
#[derive(Debug, Parser)]
#[command(name = "addtiddler", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
