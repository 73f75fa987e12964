//! Plain text output formatter

use super::OutputFormatter;
use addtiddler_core::TiddlerChunk;
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one chunk per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_chunk(&mut self, index: usize, chunk: &TiddlerChunk) -> Result<()> {
        match (chunk.title(), chunk.tags()) {
            (Some(title), Some(tags)) if !tags.is_empty() => {
                writeln!(self.writer, "{index}\t{title}\t[{tags}]")?
            }
            (Some(title), _) => writeln!(self.writer, "{index}\t{title}")?,
            (None, _) => writeln!(self.writer, "{index}\t({chunk}, {} bytes)", chunk.len())?,
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(chunks: &[&str]) -> String {
        let mut out = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut out);
            for (i, source) in chunks.iter().enumerate() {
                let chunk = TiddlerChunk::from_source(source.to_string());
                formatter.format_chunk(i, &chunk).unwrap();
            }
            formatter.finish().unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tiddler_lines() {
        let out = render(&[
            "<div title=\"Tagged\" tags=\"a b\">\n</div>\n",
            "<div title=\"Plain\" tags=\"\">\n</div>\n",
        ]);
        assert_eq!(out, "0\tTagged\t[a b]\n1\tPlain\n");
    }

    #[test]
    fn test_filler_line() {
        let out = render(&["<html>\n"]);
        assert_eq!(out, "0\t(source \"<html>...\", 7 bytes)\n");
    }
}
