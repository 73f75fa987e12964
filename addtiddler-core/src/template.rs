//! Rendering of the new tiddler record

use crate::error::{Result, TiddlerError};
use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use std::fmt;

/// Title used when neither a title nor an image is given
pub const DEFAULT_TITLE: &str = "New Tiddler";

/// Author used when none is given
pub const DEFAULT_AUTHOR: &str = "author";

/// Width applied to every embedded image
pub const IMAGE_WIDTH_PX: u32 = 640;

const HTML_OPEN: &str = "&lt;html&gt;";
const HTML_CLOSE: &str = "&lt;/html&gt; \n";

/// Creation/modification instant of a tiddler, minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiddlerTimestamp(NaiveDateTime);

impl TiddlerTimestamp {
    /// Local wall-clock time shifted by `offset_hours`
    pub fn now_with_offset(offset_hours: i64) -> Result<Self> {
        Self::from_datetime(Local::now().naive_local()).shifted(offset_hours)
    }

    /// This instant moved by `hours`; fails when the result is not representable
    pub fn shifted(self, hours: i64) -> Result<Self> {
        TimeDelta::try_hours(hours)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .ok_or(TiddlerError::InvalidOffset { hours })
    }

    /// Wrap an explicit instant
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Build from calendar fields; `None` if they do not form a valid instant
    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
    }

    /// Fixed-width `YYYYMMDDHHMM` form used in tiddler attributes
    pub fn format(&self) -> String {
        self.0.format("%Y%m%d%H%M").to_string()
    }
}

impl fmt::Display for TiddlerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Body of a new tiddler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TiddlerBody {
    /// Plain description text
    Text(String),
    /// Embedded images followed by a description
    Images {
        /// Image references as they should appear in the `src` attribute
        images: Vec<String>,
        /// Text placed after the images
        description: String,
    },
}

impl TiddlerBody {
    /// Choose the body form from a description and optional images
    pub fn new(description: impl Into<String>, images: Vec<String>) -> Self {
        let description = description.into();
        if images.is_empty() {
            TiddlerBody::Text(description)
        } else {
            TiddlerBody::Images {
                images,
                description,
            }
        }
    }

    /// Render the body as it appears inside `<pre>`
    pub fn render(&self) -> String {
        match self {
            TiddlerBody::Text(text) => text.clone(),
            TiddlerBody::Images {
                images,
                description,
            } => {
                let tags: Vec<String> = images.iter().map(|src| image_tag(src)).collect();
                format!("{HTML_OPEN}{}{HTML_CLOSE}{description}", tags.join("\n"))
            }
        }
    }
}

/// Escaped `<img>` tag for one image reference
pub fn image_tag(src: &str) -> String {
    format!(
        "&lt;img src=&quot;{src}&quot; style=&quot;width: {IMAGE_WIDTH_PX}px; &quot;/&gt;"
    )
}

/// A tiddler about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTiddler {
    /// Title attribute
    pub title: String,
    /// Author, written as the `modifier` attribute
    pub author: String,
    /// Space-delimited tags
    pub tags: String,
    /// Used for both `created` and `modified`
    pub timestamp: TiddlerTimestamp,
    /// Record body
    pub body: TiddlerBody,
}

impl NewTiddler {
    /// Start building a tiddler
    pub fn builder() -> NewTiddlerBuilder {
        NewTiddlerBuilder::new()
    }

    /// Change counter written for a freshly added tiddler
    pub const CHANGECOUNT: u32 = 1;

    /// Render the complete record, terminated by a newline
    pub fn render(&self) -> String {
        let stamp = self.timestamp.format();
        format!(
            "<div title=\"{title}\" modifier=\"{author}\" modified=\"{stamp}\" created=\"{stamp}\" tags=\"{tags}\" changecount=\"{count}\">\n<pre>{body}</pre>\n</div>\n",
            title = self.title,
            author = self.author,
            tags = self.tags,
            count = Self::CHANGECOUNT,
            body = self.body.render(),
        )
    }
}

/// Builder for [`NewTiddler`]
#[derive(Debug, Default)]
pub struct NewTiddlerBuilder {
    title: Option<String>,
    author: Option<String>,
    tags: String,
    description: String,
    images: Vec<String>,
    timestamp: Option<TiddlerTimestamp>,
    utc_offset_hours: i64,
}

impl NewTiddlerBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set an optional title
    pub fn maybe_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the space-delimited tag string
    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Set the description text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add one image reference
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    /// Add several image references
    pub fn images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images.extend(images.into_iter().map(Into::into));
        self
    }

    /// Hours to add to the local clock when stamping
    pub fn utc_offset_hours(mut self, hours: i64) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Pin the timestamp instead of reading the clock
    pub fn timestamp(mut self, timestamp: TiddlerTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the tiddler
    ///
    /// Without an explicit title the first image reference is used, and
    /// without images the title falls back to [`DEFAULT_TITLE`]. Reading the
    /// clock fails with [`TiddlerError::InvalidOffset`] when the offset
    /// cannot be applied.
    pub fn build(self) -> Result<NewTiddler> {
        let title = self
            .title
            .or_else(|| self.images.first().cloned())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let timestamp = match self.timestamp {
            Some(timestamp) => timestamp,
            None => TiddlerTimestamp::now_with_offset(self.utc_offset_hours)?,
        };

        Ok(NewTiddler {
            title,
            author: self.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            tags: self.tags,
            timestamp,
            body: TiddlerBody::new(self.description, self.images),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_str;

    fn fixed() -> TiddlerTimestamp {
        TiddlerTimestamp::from_ymd_hm(2008, 10, 8, 9, 5).unwrap()
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        assert_eq!(fixed().format(), "200810080905");
        assert_eq!(fixed().to_string().len(), 12);
    }

    #[test]
    fn test_invalid_timestamp_fields() {
        assert!(TiddlerTimestamp::from_ymd_hm(2008, 13, 1, 0, 0).is_none());
        assert!(TiddlerTimestamp::from_ymd_hm(2008, 1, 1, 24, 0).is_none());
    }

    #[test]
    fn test_offset_shifts_clock() {
        let base = TiddlerTimestamp::now_with_offset(0).unwrap();
        let ahead = TiddlerTimestamp::now_with_offset(5).unwrap();
        assert!(ahead.0 > base.0 + TimeDelta::hours(4));
    }

    #[test]
    fn test_shifted_by_negative_hours() {
        let earlier = fixed().shifted(-10).unwrap();
        assert_eq!(earlier.format(), "200810072305");
    }

    #[test]
    fn test_out_of_range_offset_is_an_error() {
        for hours in [3_000_000_000, -3_000_000_000, i64::MAX, i64::MIN] {
            let err = TiddlerTimestamp::now_with_offset(hours).unwrap_err();
            assert!(matches!(err, TiddlerError::InvalidOffset { hours: h } if h == hours));
        }
    }

    #[test]
    fn test_build_reports_out_of_range_offset() {
        let err = NewTiddler::builder()
            .title("Late")
            .utc_offset_hours(3_000_000_000)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("3000000000"));
    }

    #[test]
    fn test_pinned_timestamp_ignores_offset() {
        let tiddler = NewTiddler::builder()
            .utc_offset_hours(i64::MAX)
            .timestamp(fixed())
            .build()
            .unwrap();
        assert_eq!(tiddler.timestamp, fixed());
    }

    #[test]
    fn test_render_text_tiddler() {
        let tiddler = NewTiddler::builder()
            .title("Log")
            .author("Ryan")
            .tags("notes daily")
            .description("hello")
            .timestamp(fixed())
            .build()
            .unwrap();

        assert_eq!(
            tiddler.render(),
            "<div title=\"Log\" modifier=\"Ryan\" modified=\"200810080905\" created=\"200810080905\" tags=\"notes daily\" changecount=\"1\">\n<pre>hello</pre>\n</div>\n"
        );
    }

    #[test]
    fn test_render_single_image() {
        let body = TiddlerBody::new("A plot", vec!["figures/plot1.png".to_string()]);
        assert_eq!(
            body.render(),
            "&lt;html&gt;&lt;img src=&quot;figures/plot1.png&quot; style=&quot;width: 640px; &quot;/&gt;&lt;/html&gt; \nA plot"
        );
    }

    #[test]
    fn test_render_multiple_images_joined_by_newline() {
        let body = TiddlerBody::new("", vec!["a.png".to_string(), "b.png".to_string()]);
        let rendered = body.render();
        assert!(rendered.starts_with("&lt;html&gt;&lt;img src=&quot;a.png"));
        assert!(rendered.contains("&quot;/&gt;\n&lt;img src=&quot;b.png"));
        assert!(rendered.ends_with("&lt;/html&gt; \n"));
    }

    #[test]
    fn test_title_defaults() {
        let plain = NewTiddler::builder().timestamp(fixed()).build().unwrap();
        assert_eq!(plain.title, DEFAULT_TITLE);
        assert_eq!(plain.author, DEFAULT_AUTHOR);
        assert_eq!(plain.body, TiddlerBody::Text(String::new()));

        let with_image = NewTiddler::builder()
            .images(["first.png", "second.png"])
            .timestamp(fixed())
            .build()
            .unwrap();
        assert_eq!(with_image.title, "first.png");

        let explicit = NewTiddler::builder()
            .maybe_title(Some("Chosen".into()))
            .image("first.png")
            .timestamp(fixed())
            .build()
            .unwrap();
        assert_eq!(explicit.title, "Chosen");
    }

    #[test]
    fn test_rendered_record_scans_as_one_tiddler() {
        let tiddler = NewTiddler::builder()
            .title("Round")
            .tags("t")
            .image("x.png")
            .description("line one\nline two")
            .timestamp(fixed())
            .build()
            .unwrap();
        let rendered = tiddler.render();
        let chunks = scan_str(&rendered).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title(), Some("Round"));
        assert_eq!(chunks[0].tags(), Some("t"));
        assert_eq!(chunks[0].raw_text(), rendered);
    }
}
