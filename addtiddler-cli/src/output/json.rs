//! JSON output formatter

use super::OutputFormatter;
use addtiddler_core::{ChunkSummary, TiddlerChunk};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs chunks as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    chunks: Vec<ChunkData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct ChunkData {
    /// Position of the chunk in the document
    pub index: usize,
    /// Chunk metadata
    #[serde(flatten)]
    pub summary: ChunkSummary,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunks: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_chunk(&mut self, index: usize, chunk: &TiddlerChunk) -> Result<()> {
        self.chunks.push(ChunkData {
            index,
            summary: chunk.summary(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.chunks)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
