//! Documented subcode range grammar
//!
//! Troubleshooting headings carry a tiny range grammar at the end of the
//! heading text:
//!
//! ```text
//! Alarm: 8010[1]        a single subcode
//! Alarm: 8010[1 - 2]    a closed range of subcodes
//! Alarm: 8010[xx]       catch-all: any subcode of this alarm
//! ```
//!
//! The bracketed part must close the string; arbitrary prose may precede
//! it. Anything else (multiple bracket groups, non-numeric content, no
//! bracket) is a parse failure, never a partial match.

use once_cell::sync::Lazy;
use regex::Regex;

/// Smallest subcode value a catch-all covers.
pub const SUBCODE_MIN: i64 = 0;
/// Largest subcode value a catch-all covers.
pub const SUBCODE_MAX: i64 = 65535;

static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})\[(xx|\d+ - \d+|\d+)\]$").unwrap());

/// A documented subcode range for one alarm code: the closed interval
/// `[start, end]`.
///
/// A reversed range (`start > end`) is representable and simply contains
/// nothing; the parser does not reorder it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcodeRange {
    /// The 4-digit alarm code
    pub code: i64,
    /// First subcode covered
    pub start: i64,
    /// Last subcode covered
    pub end: i64,
}

impl SubcodeRange {
    /// Parse a heading text against the range grammar.
    ///
    /// Returns `None` for anything the grammar does not cover exactly.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = RANGE_RE.captures(text.trim_end())?;
        let code: i64 = caps[1].parse().ok()?;

        let subcodes = &caps[2];
        let (start, end) = if subcodes == "xx" {
            (SUBCODE_MIN, SUBCODE_MAX)
        } else if let Some((a, b)) = subcodes.split_once(" - ") {
            (a.parse().ok()?, b.parse().ok()?)
        } else {
            let n: i64 = subcodes.parse().ok()?;
            (n, n)
        };

        Some(SubcodeRange { code, start, end })
    }

    /// Whether this is the catch-all range documenting any subcode.
    pub fn is_catch_all(&self) -> bool {
        self.start == SUBCODE_MIN && self.end == SUBCODE_MAX
    }

    /// Whether `subcode` falls inside the closed interval.
    pub fn contains(&self, subcode: i64) -> bool {
        self.start <= subcode && subcode <= self.end
    }
}

impl std::fmt::Display for SubcodeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_catch_all() {
            write!(f, "{}[xx]", self.code)
        } else if self.start == self.end {
            write!(f, "{}[{}]", self.code, self.start)
        } else {
            write!(f, "{}[{}-{}]", self.code, self.start, self.end)
        }
    }
}
