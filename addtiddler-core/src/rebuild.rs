//! Document rebuild: copy chunks, splice in the new tiddler, resolve duplicates

use crate::chunk::TiddlerChunk;
use crate::error::{Result, TiddlerError};
use crate::resolver::{ConflictResolver, Resolution};
use crate::scanner::ChunkScanner;
use crate::template::NewTiddler;
use std::io::{BufRead, Write};

/// Outcome of one rebuild pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Whether the new tiddler was written (false when no sentinel was found)
    pub inserted: bool,
    /// Chunks pulled from the input
    pub chunks_read: usize,
    /// Input chunks copied to the output
    pub chunks_written: usize,
    /// Existing tiddlers with the new title that were dropped
    pub duplicates_dropped: usize,
    /// Existing tiddlers with the new title that were kept
    pub duplicates_kept: usize,
}

/// Rewrites a wiki document with one new tiddler inserted after the store-area sentinel
pub struct DocumentRebuilder {
    title: String,
    rendered: String,
    resolver: ConflictResolver,
}

impl DocumentRebuilder {
    /// Create a rebuilder for already-rendered tiddler text
    pub fn new(
        title: impl Into<String>,
        rendered: impl Into<String>,
        resolver: ConflictResolver,
    ) -> Self {
        Self {
            title: title.into(),
            rendered: rendered.into(),
            resolver,
        }
    }

    /// Create a rebuilder that renders `tiddler` with the standard template
    pub fn for_tiddler(tiddler: &NewTiddler, resolver: ConflictResolver) -> Self {
        Self::new(tiddler.title.clone(), tiddler.render(), resolver)
    }

    /// Rendered text that will be spliced in
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Stream `input` to `output`, inserting the new tiddler once
    ///
    /// The tiddler goes directly after the first chunk containing the
    /// store-area sentinel. Every other chunk is written verbatim unless it
    /// is a duplicate the resolver drops. Without a sentinel the input is
    /// copied through and the report says `inserted: false`.
    pub fn rebuild<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<RebuildReport> {
        let mut report = RebuildReport::default();
        let (dropped_before, kept_before) = (self.resolver.dropped(), self.resolver.kept());
        let mut scanner = ChunkScanner::new(input);

        // Up to and including the sentinel chunk
        for chunk in scanner.by_ref() {
            let chunk = chunk?;
            report.chunks_read += 1;
            let is_sentinel = self.copy_chunk(&chunk, &mut output, &mut report)?;
            if is_sentinel {
                output
                    .write_all(self.rendered.as_bytes())
                    .map_err(TiddlerError::Write)?;
                report.inserted = true;
                log::info!(
                    "inserted \"{}\" after chunk {}",
                    self.title,
                    report.chunks_read
                );
                break;
            }
        }

        // Everything after the insertion point
        for chunk in scanner.by_ref() {
            let chunk = chunk?;
            report.chunks_read += 1;
            self.copy_chunk(&chunk, &mut output, &mut report)?;
        }

        output.flush().map_err(TiddlerError::Write)?;

        if !report.inserted {
            log::warn!(
                "no store area found in {} lines; \"{}\" was not inserted",
                scanner.lines_read(),
                self.title
            );
        }
        report.duplicates_dropped = self.resolver.dropped() - dropped_before;
        report.duplicates_kept = self.resolver.kept() - kept_before;
        Ok(report)
    }

    /// Write `chunk` unless it is a dropped duplicate.
    /// Returns whether a written chunk holds the sentinel.
    fn copy_chunk<W: Write>(
        &mut self,
        chunk: &TiddlerChunk,
        output: &mut W,
        report: &mut RebuildReport,
    ) -> Result<bool> {
        if chunk.is_tiddler()
            && chunk.has_title(&self.title)
            && self.resolver.resolve(chunk)? == Resolution::Drop
        {
            return Ok(false);
        }
        output
            .write_all(chunk.raw_text().as_bytes())
            .map_err(TiddlerError::Write)?;
        report.chunks_written += 1;
        Ok(chunk.contains_sentinel())
    }
}

/// Rebuild an in-memory document, returning the new text
pub fn rebuild_str(
    text: &str,
    rebuilder: &mut DocumentRebuilder,
) -> Result<(String, RebuildReport)> {
    let mut out = Vec::with_capacity(text.len() + rebuilder.rendered().len());
    let report = rebuilder.rebuild(text.as_bytes(), &mut out)?;
    let out = String::from_utf8(out).map_err(|e| {
        TiddlerError::Write(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    Ok((out, report))
}
