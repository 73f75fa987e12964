//! Line-oriented chunk scanner
//!
//! Partitions a wiki document into chunks without parsing markup. A line
//! starting with [`TIDDLER_START`] opens a new chunk; a later line containing
//! [`TIDDLER_END`] closes the current one. Content that never closes is
//! emitted as-is when the next chunk starts or the stream ends.

use crate::chunk::TiddlerChunk;
use crate::error::{Result, TiddlerError};
use std::io::BufRead;

/// Prefix of a line that opens a tiddler record
pub const TIDDLER_START: &str = "<div title";

/// Substring of a line that closes the current chunk
pub const TIDDLER_END: &str = "</div>";

/// Lazy, single-pass iterator of [`TiddlerChunk`]s over a text stream
pub struct ChunkScanner<R> {
    reader: R,
    deferred: Option<String>,
    lines_read: usize,
    finished: bool,
}

impl<R: BufRead> ChunkScanner<R> {
    /// Create a scanner over a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            deferred: None,
            lines_read: 0,
            finished: false,
        }
    }

    /// Number of lines consumed from the stream so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read one line including its terminator; `None` at end of stream
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .map_err(TiddlerError::Read)?;
        if n == 0 {
            return Ok(None);
        }
        self.lines_read += 1;
        Ok(Some(line))
    }

    fn next_chunk(&mut self) -> Result<Option<TiddlerChunk>> {
        let first = match self.deferred.take() {
            Some(line) => line,
            None => match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            },
        };

        let mut buffer = first;
        while let Some(line) = self.read_line()? {
            if line.starts_with(TIDDLER_START) {
                self.deferred = Some(line);
                break;
            }
            buffer.push_str(&line);
            if line.contains(TIDDLER_END) {
                break;
            }
        }

        Ok(Some(TiddlerChunk::from_source(buffer)))
    }
}

impl<R: BufRead> Iterator for ChunkScanner<R> {
    type Item = Result<TiddlerChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Scan an in-memory document into chunks
pub fn scan_str(text: &str) -> Result<Vec<TiddlerChunk>> {
    ChunkScanner::new(text.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};

    fn raw(chunks: &[TiddlerChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.raw_text()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(scan_str("").unwrap().is_empty());
    }

    #[test]
    fn test_tiddlers_split_on_start_and_end() {
        let text = "<html>\n<div title=\"A\">\n<pre>a</pre>\n</div>\n<div title=\"B\">\n</div>\n";
        let chunks = scan_str(text).unwrap();
        assert_eq!(
            raw(&chunks),
            vec![
                "<html>\n",
                "<div title=\"A\">\n<pre>a</pre>\n</div>\n",
                "<div title=\"B\">\n</div>\n",
            ]
        );
        assert!(!chunks[0].is_tiddler());
        assert_eq!(chunks[1].title(), Some("A"));
        assert_eq!(chunks[2].title(), Some("B"));
    }

    #[test]
    fn test_filler_lines_accumulate_until_close() {
        let text = "<!DOCTYPE html>\n<html>\n<body>\n<div id=\"storeArea\">\n</div>\ntail\n";
        let chunks = scan_str(text).unwrap();
        assert_eq!(
            raw(&chunks),
            vec![
                "<!DOCTYPE html>\n<html>\n<body>\n<div id=\"storeArea\">\n</div>\n",
                "tail\n",
            ]
        );
    }

    #[test]
    fn test_close_on_first_line_does_not_end_chunk() {
        let text = "<div title=\"One\"></div>\nmore\n</div>\nafter\n";
        let chunks = scan_str(text).unwrap();
        assert_eq!(
            raw(&chunks),
            vec!["<div title=\"One\"></div>\nmore\n</div>\n", "after\n"]
        );
    }

    #[test]
    fn test_unclosed_tiddler_ends_at_next_start() {
        let text = "<div title=\"Open\">\nno close\n<div title=\"Next\">\n</div>\n";
        let chunks = scan_str(text).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].raw_text(), "<div title=\"Open\">\nno close\n");
        assert_eq!(chunks[1].title(), Some("Next"));
    }

    #[test]
    fn test_unclosed_tiddler_ends_at_eof() {
        let text = "<div title=\"Open\">\nbody without newline";
        let chunks = scan_str(text).unwrap();
        assert_eq!(raw(&chunks), vec![text]);
    }

    #[test]
    fn test_indented_start_is_not_a_boundary() {
        let text = "<div id=\"storeArea\">\n  <div title=\"Nested\">\n</div>\n";
        let chunks = scan_str(text).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title(), Some("Nested"));
    }

    #[test]
    fn test_crlf_terminators_preserved() {
        let text = "<html>\r\n<div title=\"W\">\r\n</div>\r\n";
        let chunks = scan_str(text).unwrap();
        assert_eq!(raw(&chunks), vec!["<html>\r\n", "<div title=\"W\">\r\n</div>\r\n"]);
    }

    #[test]
    fn test_lines_read_counter() {
        let mut scanner = ChunkScanner::new("a\nb\n</div>\nc\n".as_bytes());
        let first = scanner.next().unwrap().unwrap();
        assert_eq!(first.raw_text(), "a\nb\n</div>\n");
        assert_eq!(scanner.lines_read(), 3);
        scanner.next().unwrap().unwrap();
        assert!(scanner.next().is_none());
        assert_eq!(scanner.lines_read(), 4);
    }

    #[test]
    fn test_invalid_utf8_is_an_error_and_fuses() {
        let bytes: &[u8] = b"ok\n\xff\xfe\n";
        let mut scanner = ChunkScanner::new(bytes);
        let result = scanner.next().unwrap();
        assert!(matches!(result, Err(TiddlerError::Read(_))));
        assert!(scanner.next().is_none());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_read_failure_propagates() {
        let mut scanner = ChunkScanner::new(io::BufReader::new(FailingReader));
        match scanner.next() {
            Some(Err(TiddlerError::Read(e))) => assert_eq!(e.to_string(), "disk gone"),
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
