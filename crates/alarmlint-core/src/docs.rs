//! Troubleshooting document extraction
//!
//! Walks the markdown heading tree and collects the documented subcode
//! ranges. Only level-3 headings whose rendered text starts with
//! `"Alarm: "` participate; everything else in the document is prose as
//! far as reconciliation is concerned.
//!
//! Headings that look like alarm documentation but do not parse against
//! the range grammar are collected as failures rather than aborting the
//! run: a typo in one heading must not hide gaps elsewhere.

use crate::ranges::SubcodeRange;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Rendered-text prefix that marks an alarm documentation heading.
pub const ALARM_HEADING_PREFIX: &str = "Alarm: ";

/// Raw-source prefix of an alarm documentation heading line.
const HEADING_LINE_PREFIX: &str = "### Alarm: ";

/// Substring that marks a catch-all heading before parsing.
const CATCH_ALL_MARKER: &str = "[xx]";

/// An alarm heading that failed to parse against the range grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingFailure {
    /// 0-based index of the first raw source line that starts with
    /// `### Alarm: ` and contains the heading text; `None` when no such
    /// line exists (the rendered text can differ from the source line).
    pub line: Option<usize>,
    /// The rendered heading text
    pub heading: String,
}

/// Everything extracted from one troubleshooting document.
#[derive(Debug, Clone, Default)]
pub struct DocRanges {
    /// Successfully parsed ranges, in document order
    pub ranges: Vec<SubcodeRange>,
    /// Alarm headings that did not parse, in document order
    pub failures: Vec<HeadingFailure>,
}

impl DocRanges {
    /// Extract documented ranges from markdown source.
    ///
    /// With `ignore_catch_all` set, headings containing the catch-all
    /// marker are dropped before parsing, as if the documentation
    /// sections did not exist.
    pub fn extract(source: &str, ignore_catch_all: bool) -> Self {
        let mut out = DocRanges::default();

        let mut heading_buf: Option<String> = None;
        for event in Parser::new(source) {
            match event {
                Event::Start(Tag::Heading { level, .. }) if level == HeadingLevel::H3 => {
                    heading_buf = Some(String::new());
                }
                // Unresolved reference links split "8010[1]" into several
                // text events; concatenation restores the original text.
                Event::Text(text) => {
                    if let Some(buf) = heading_buf.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::Code(code) => {
                    if let Some(buf) = heading_buf.as_mut() {
                        buf.push_str(&code);
                    }
                }
                Event::End(TagEnd::Heading(HeadingLevel::H3)) => {
                    if let Some(buf) = heading_buf.take() {
                        out.record_heading(source, buf.trim_end(), ignore_catch_all);
                    }
                }
                _ => {}
            }
        }

        out
    }

    fn record_heading(&mut self, source: &str, text: &str, ignore_catch_all: bool) {
        if !text.starts_with(ALARM_HEADING_PREFIX) {
            return;
        }
        if ignore_catch_all && text.contains(CATCH_ALL_MARKER) {
            return;
        }
        match SubcodeRange::parse(text) {
            Some(range) => self.ranges.push(range),
            None => self.failures.push(HeadingFailure {
                line: find_heading_line(source, text),
                heading: text.to_string(),
            }),
        }
    }

    /// Number of parsed ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether no ranges were parsed
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Locate the raw source line of a heading by substring re-scan.
///
/// TODO: track line numbers from the markdown parser's byte offsets
/// instead of re-deriving them; the re-scan cannot find headings whose
/// rendered text differs from the source line (inline markup).
fn find_heading_line(source: &str, heading: &str) -> Option<usize> {
    source
        .lines()
        .position(|line| line.starts_with(HEADING_LINE_PREFIX) && line.contains(heading))
}
