//! Output formatting module for chunk listings

use addtiddler_core::TiddlerChunk;
use anyhow::Result;

/// Trait for listing formatters
pub trait OutputFormatter {
    /// Format one chunk at its position in the document
    fn format_chunk(&mut self, index: usize, chunk: &TiddlerChunk) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
