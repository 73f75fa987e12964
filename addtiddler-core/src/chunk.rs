//! Chunk values produced by the scanner

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

static TITLE_PATTERN: OnceLock<Regex> = OnceLock::new();
static TAGS_PATTERN: OnceLock<Regex> = OnceLock::new();

fn title_pattern() -> &'static Regex {
    TITLE_PATTERN.get_or_init(|| Regex::new(r#"title="(.*?)""#).expect("valid title pattern"))
}

fn tags_pattern() -> &'static Regex {
    TAGS_PATTERN.get_or_init(|| Regex::new(r#"tags="(.*?)""#).expect("valid tags pattern"))
}

/// Extract the first `title="..."` attribute value anywhere in `source`
pub fn extract_title(source: &str) -> Option<String> {
    first_capture(title_pattern(), source)
}

/// Extract the first `tags="..."` attribute value anywhere in `source`
pub fn extract_tags(source: &str) -> Option<String> {
    first_capture(tags_pattern(), source)
}

fn first_capture(pattern: &Regex, source: &str) -> Option<String> {
    pattern
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// A contiguous span of a wiki document
///
/// Concatenating the `raw_text` of every chunk from one scan reproduces the
/// scanned document exactly. A chunk counts as a tiddler only when a title
/// attribute was found in it; everything else is opaque filler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiddlerChunk {
    raw_text: String,
    title: Option<String>,
    tags: Option<String>,
}

impl TiddlerChunk {
    /// Build a chunk from its verbatim source, extracting title and tags
    pub fn from_source(raw_text: String) -> Self {
        let title = extract_title(&raw_text);
        let tags = extract_tags(&raw_text);
        Self {
            raw_text,
            title,
            tags,
        }
    }

    /// The verbatim text covered by this chunk, line terminators included
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Title attribute, if any
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Tags attribute, if any
    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    /// Whether this chunk is a titled tiddler record
    pub fn is_tiddler(&self) -> bool {
        self.title.is_some()
    }

    /// Whether this chunk carries exactly the given title
    pub fn has_title(&self, title: &str) -> bool {
        self.title.as_deref() == Some(title)
    }

    /// Whether the insertion sentinel occurs in this chunk
    pub fn contains_sentinel(&self) -> bool {
        self.raw_text.contains(crate::STORE_AREA_SENTINEL)
    }

    /// Byte length of the verbatim text
    pub fn len(&self) -> usize {
        self.raw_text.len()
    }

    /// Whether the chunk is empty
    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// Lightweight, serializable description of the chunk
    pub fn summary(&self) -> ChunkSummary {
        ChunkSummary {
            title: self.title.clone(),
            tags: self.tags.clone(),
            is_tiddler: self.is_tiddler(),
            length: self.raw_text.len(),
        }
    }
}

impl fmt::Display for TiddlerChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "tiddler \"{title}\""),
            None => {
                let head: String = self.raw_text.chars().take(6).collect();
                write!(f, "source \"{}...\"", head.escape_debug())
            }
        }
    }
}

/// Metadata view of a chunk for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    /// Title attribute, if any
    pub title: Option<String>,
    /// Tags attribute, if any
    pub tags: Option<String>,
    /// Whether the chunk is a tiddler
    pub is_tiddler: bool,
    /// Byte length of the chunk
    pub length: usize,
}
