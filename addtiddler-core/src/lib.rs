//! Insert tiddlers into TiddlyWiki single-file wikis without disturbing the rest of the file
//!
//! A wiki is never parsed as HTML. Instead a line-oriented scanner splits it
//! into chunks (tiddler records and opaque filler) whose concatenation is the
//! original document, byte for byte. The rebuild pass copies those chunks to
//! a new document, splices the new tiddler in right after the store-area
//! marker, and asks a [`ConflictResolver`] what to do with existing tiddlers
//! that share the new title.
//!
//! # Example
//!
//! ```rust
//! use addtiddler_core::{
//!     rebuild_str, ConflictResolver, DocumentRebuilder, NewTiddler, TiddlerTimestamp,
//! };
//!
//! let wiki = "<html>\n<div id=\"storeArea\">\n</div>\n<div title=\"Old\">\n</div>\n";
//!
//! let tiddler = NewTiddler::builder()
//!     .title("Hello")
//!     .description("First entry")
//!     .timestamp(TiddlerTimestamp::from_ymd_hm(2024, 1, 2, 3, 4).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut rebuilder = DocumentRebuilder::for_tiddler(&tiddler, ConflictResolver::replacing());
//! let (out, report) = rebuild_str(wiki, &mut rebuilder).unwrap();
//!
//! assert!(report.inserted);
//! assert!(out.contains("<div title=\"Hello\""));
//! assert!(out.ends_with("<div title=\"Old\">\n</div>\n"));
//! ```

#![warn(missing_docs)]

pub mod chunk;
pub mod edit;
pub mod error;
pub mod paths;
pub mod rebuild;
pub mod resolver;
pub mod scanner;
pub mod template;

pub use chunk::{extract_tags, extract_title, ChunkSummary, TiddlerChunk};
pub use edit::{DocumentEdit, EditTarget, StagedEdit};
pub use error::{Result, TiddlerError};
pub use rebuild::{rebuild_str, DocumentRebuilder, RebuildReport};
pub use resolver::{
    ConflictResolver, ConsolePrompt, DuplicatePrompt, KeepExisting, Resolution, ScriptedPrompt,
};
pub use scanner::{scan_str, ChunkScanner};
pub use template::{NewTiddler, NewTiddlerBuilder, TiddlerBody, TiddlerTimestamp};

use std::path::PathBuf;

/// Marker whose chunk is followed by the new tiddler
pub const STORE_AREA_SENTINEL: &str = "<div id=\"storeArea\">";

/// Add `tiddler` to the wiki at `input`
///
/// Writes to `output` when given, otherwise replaces `input` atomically.
pub fn add_tiddler(
    input: impl Into<PathBuf>,
    output: Option<PathBuf>,
    tiddler: &NewTiddler,
    resolver: ConflictResolver,
) -> Result<RebuildReport> {
    let edit = DocumentEdit::new(input, output);
    let mut rebuilder = DocumentRebuilder::for_tiddler(tiddler, resolver);
    edit.apply(&mut rebuilder)
}
