//! Add command implementation

use crate::commands::init_logging;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::thumbnail::{create_thumbnail, Capabilities, THUMBNAIL_MAX_PX};
use addtiddler_core::paths::{resolve_image_path, thumbnail_reference};
use addtiddler_core::{
    paths, ConflictResolver, ConsolePrompt, DocumentEdit, DocumentRebuilder, KeepExisting,
    NewTiddler,
};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the add command
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Input TiddlyWiki file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Output file (default: edit the input file in place)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Title of the new tiddler (default: the first image path, or "New Tiddler")
    #[arg(long)]
    pub title: Option<String>,

    /// Text of the tiddler, placed below any images. Any TiddlyWiki syntax is allowed
    #[arg(long, default_value = "")]
    pub description: String,

    /// Image to embed, relative to the output file (repeatable)
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<String>,

    /// Space-delimited tags, e.g. --tags "images temperature depth"
    #[arg(long)]
    pub tags: Option<String>,

    /// Author written as the tiddler modifier
    #[arg(long, env = "ADDTIDDLER_AUTHOR")]
    pub author: Option<String>,

    /// Hours added to the local clock for the timestamps, e.g. -5
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub utc_offset: Option<i64>,

    /// Embed 500px thumbnails (saved next to each image as NAME.thumb.png)
    #[arg(long)]
    pub resize: bool,

    /// Replace existing tiddlers with the same title without asking
    #[arg(long)]
    pub replace: bool,

    /// Keep existing tiddlers with the same title without asking
    #[arg(long, conflicts_with = "replace")]
    pub keep_existing: bool,

    /// Configuration file with defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Effective settings after merging flags over the configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSettings {
    /// Tiddler modifier
    pub author: String,
    /// Space-delimited tags
    pub tags: String,
    /// Clock offset in hours
    pub utc_offset_hours: i64,
    /// Drop duplicates silently
    pub replace: bool,
    /// Embed thumbnails
    pub resize: bool,
}

impl AddArgs {
    /// Execute the add command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_optional(self.config.as_deref())?;
        let settings = self.settings(&config);

        if !self.input.is_file() {
            return Err(CliError::FileNotFound(self.input.display().to_string()).into());
        }

        let edit = DocumentEdit::new(&self.input, self.output.clone());
        let document_dir = paths::document_dir(edit.destination())?;
        let images = prepare_images(
            &self.images,
            &document_dir,
            settings.resize,
            Capabilities::detect(),
        )?;

        let tiddler = NewTiddler::builder()
            .maybe_title(self.title.clone().or_else(|| self.images.first().cloned()))
            .author(settings.author)
            .tags(settings.tags)
            .description(self.description.as_str())
            .images(images)
            .utc_offset_hours(settings.utc_offset_hours)
            .build()?;

        let resolver = self.resolver(settings.replace);
        let mut rebuilder = DocumentRebuilder::for_tiddler(&tiddler, resolver);
        let report = edit.apply(&mut rebuilder).with_context(|| {
            format!("Failed to add tiddler to {}", self.input.display())
        })?;

        if !report.inserted {
            eprintln!(
                "Warning: no store area found in {}; \"{}\" was not added",
                self.input.display(),
                tiddler.title
            );
        } else if !self.quiet {
            println!(
                "Added \"{}\" to {}",
                tiddler.title,
                edit.destination().display()
            );
            if report.duplicates_dropped > 0 {
                println!(
                    "Removed {} existing tiddler(s) named \"{}\"",
                    report.duplicates_dropped, tiddler.title
                );
            }
        }

        Ok(())
    }

    /// Merge command-line flags over configuration values
    pub fn settings(&self, config: &CliConfig) -> AddSettings {
        AddSettings {
            author: self
                .author
                .clone()
                .unwrap_or_else(|| config.tiddler.author.clone()),
            tags: self
                .tags
                .clone()
                .unwrap_or_else(|| config.tiddler.tags.clone()),
            utc_offset_hours: self.utc_offset.unwrap_or(config.tiddler.utc_offset_hours),
            replace: self.replace || (config.behavior.replace && !self.keep_existing),
            resize: self.resize || config.behavior.resize,
        }
    }

    fn resolver(&self, replace: bool) -> ConflictResolver {
        if replace {
            ConflictResolver::replacing()
        } else if self.keep_existing {
            ConflictResolver::asking(KeepExisting)
        } else {
            ConflictResolver::asking(ConsolePrompt::stdio())
        }
    }
}

/// Image references to embed, generating thumbnails when asked and possible
///
/// References stay relative to the output document; files are looked up
/// under `document_dir`.
pub fn prepare_images(
    images: &[String],
    document_dir: &Path,
    resize: bool,
    capabilities: Capabilities,
) -> Result<Vec<String>> {
    if resize && !capabilities.thumbnails && !images.is_empty() {
        log::warn!("image resizing is not available in this build; embedding original images");
    }

    let mut prepared = Vec::with_capacity(images.len());
    for image in images {
        let location = resolve_image_path(document_dir, image);
        if !location.exists() {
            log::warn!("image {} does not exist", location.display());
        }

        if resize && capabilities.thumbnails {
            let thumb = thumbnail_reference(image);
            create_thumbnail(
                &location,
                &resolve_image_path(document_dir, &thumb),
                THUMBNAIL_MAX_PX,
            )?;
            prepared.push(thumb);
        } else {
            prepared.push(image.clone());
        }
    }
    Ok(prepared)
}
