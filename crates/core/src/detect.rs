//! Per-line heading classification.
//!
//! Recognises two heading syntaxes:
//!
//! - underline headings, where the line after the title is a rule of three or
//!   more `=` (level 1) or `-` (level 2);
//! - hash headings, `#` through `######` followed by whitespace (levels 1-6).
//!
//! Lines opening or closing a code fence are reported separately so the
//! caller can suppress heading detection inside fenced blocks. A fence only
//! closes on a marker made of the same glyph that opened it. The detector
//! holds no state of its own; fence state is passed in on every call.

use regex::Regex;
use std::sync::LazyLock;

use crate::tree::TitlePart;

/// Deepest level a hash heading can have.
pub const MAX_HASH_LEVEL: u8 = 6;

/// Fence marker: optional indentation, then three or more backticks or tildes.
/// Anything after the marker (an info string such as `rust`) is allowed.
static FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(`{3,}|~{3,})").unwrap());

/// Level 1 underline rule.
static EQUALS_RULE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s?={3,}\s*$").unwrap());

/// Level 2 underline rule.
static DASH_RULE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s?-{3,}\s*$").unwrap());

/// Hash heading: optional single leading whitespace, 1-6 hashes, whitespace, remainder.
static HASH_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(\s?(#{{1,{}}})\s+)(.*)$", MAX_HASH_LEVEL)).unwrap()
});

/// Which markup produced a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// Title line followed by a `===` or `---` rule.
    Underline,
    /// `#`-prefixed line.
    Hash,
}

/// A line (or line pair) recognised as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
    /// Heading depth, 1-6.
    pub level: u8,

    /// Markup that produced the heading.
    pub style: HeadingStyle,

    /// Title text together with the markup around it.
    pub part: TitlePart,
}

impl HeadingLine {
    /// Title text with markup stripped.
    pub fn title(&self) -> &str {
        self.part.text()
    }

    /// Original heading text including markup.
    pub fn source(&self) -> String {
        self.part.source()
    }

    /// Number of input lines the heading occupies.
    pub fn line_count(&self) -> usize {
        match self.style {
            HeadingStyle::Underline => 2,
            HeadingStyle::Hash => 1,
        }
    }
}

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Opens or closes a code fence made of the given glyph (`` ` `` or `~`).
    /// Still ordinary text content.
    Fence(char),
    /// A heading starting at this line.
    Heading(HeadingLine),
    /// Anything else.
    Text,
}

/// Stateless line classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingDetector;

impl HeadingDetector {
    /// Create a new detector.
    pub fn new() -> Self {
        Self
    }

    /// Classify `line`, looking ahead at `next` for an underline rule.
    ///
    /// `fence` is the glyph of the currently open code fence, if any. Inside
    /// a fence every line other than a closing marker of the same glyph is
    /// text. Underline headings are tried before hash headings.
    pub fn classify(&self, line: &str, next: Option<&str>, fence: Option<char>) -> LineClass {
        let marker = fence_glyph(line);
        match (fence, marker) {
            (None, Some(glyph)) => return LineClass::Fence(glyph),
            (Some(open), Some(glyph)) if open == glyph => return LineClass::Fence(glyph),
            (Some(_), _) => return LineClass::Text,
            (None, None) => {}
        }

        if let Some(heading) = underline_heading(line, next) {
            return LineClass::Heading(heading);
        }
        if let Some(heading) = hash_heading(line) {
            return LineClass::Heading(heading);
        }

        LineClass::Text
    }
}

/// Glyph of the code fence marker on this line, if it is one.
pub fn fence_glyph(line: &str) -> Option<char> {
    FENCE_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
}

/// Level of the underline rule in `line`, if it is one.
fn rule_level(line: &str) -> Option<u8> {
    if EQUALS_RULE_REGEX.is_match(line) {
        Some(1)
    } else if DASH_RULE_REGEX.is_match(line) {
        Some(2)
    } else {
        None
    }
}

fn underline_heading(line: &str, next: Option<&str>) -> Option<HeadingLine> {
    let next = next?;
    if line.trim().is_empty() {
        return None;
    }
    let level = rule_level(next)?;

    let (open, text, close) = split_padding(line);
    Some(HeadingLine {
        level,
        style: HeadingStyle::Underline,
        part: TitlePart::new(open, text, format!("{}\n{}", close, next)),
    })
}

fn hash_heading(line: &str) -> Option<HeadingLine> {
    let caps = HASH_HEADING_REGEX.captures(line)?;
    let prefix = caps.get(1)?.as_str();
    let level = caps.get(2)?.as_str().len() as u8;
    let remainder = caps.get(3)?.as_str();

    // The prefix already swallowed leading whitespace of the remainder.
    let text = remainder.trim_end();
    let close = &remainder[text.len()..];
    Some(HeadingLine {
        level,
        style: HeadingStyle::Hash,
        part: TitlePart::new(prefix, text, close),
    })
}

/// Split a line into (leading whitespace, trimmed text, trailing whitespace).
fn split_padding(line: &str) -> (&str, &str, &str) {
    let start = line.len() - line.trim_start().len();
    let end = line.trim_end().len();
    (&line[..start], &line[start..end], &line[end..])
}
