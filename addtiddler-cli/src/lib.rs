//! addtiddler CLI library
//!
//! This library provides the command-line interface for adding tiddlers
//! to TiddlyWiki files.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod thumbnail;

pub use error::{CliError, CliResult};
