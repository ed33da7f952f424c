//! Folds classified lines into a [`SectionTree`].
//!
//! The builder is a small state machine driven one line at a time. Nesting is
//! decided by comparing heading levels: a deeper heading opens a child of the
//! current section, anything else walks up the parent chain until it finds a
//! node with a smaller level.

use std::path::Path;

use crate::detect::{HeadingDetector, HeadingLine, LineClass};
use crate::error::{Error, Result};
use crate::tree::{ParentRef, Section, SectionId, SectionTree};

/// Single-pass outline parser.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    detector: HeadingDetector,
    tree: SectionTree,
    /// Section receiving body text.
    current: Option<SectionId>,
    /// Last line belonging to the most recent heading.
    last_heading_index: Option<usize>,
    /// Glyph of the open code fence.
    fence: Option<char>,
}

impl TreeBuilder {
    /// Create a builder with an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole document.
    ///
    /// Never fails: text without headings ends up in the preamble.
    pub fn build(mut self, text: &str) -> SectionTree {
        let text = text.replace("\r\n", "\n");
        let lines: Vec<&str> = text.split('\n').collect();

        let mut index = 0;
        while index < lines.len() {
            index += self.feed(&lines, index);
        }

        if self.fence.is_some() {
            log::warn!("Input ended inside a code fence; remaining lines kept as text");
        }
        log::debug!(
            "Built outline tree: {} sections from {} lines",
            self.tree.len(),
            lines.len()
        );

        self.tree
    }

    /// Process the line at `index` and return how many lines it consumed.
    fn feed(&mut self, lines: &[&str], index: usize) -> usize {
        let line = lines[index];
        let next = lines.get(index + 1).copied();

        match self.detector.classify(line, next, self.fence) {
            LineClass::Fence(glyph) => {
                self.fence = match self.fence {
                    Some(_) => None,
                    None => Some(glyph),
                };
                log::trace!("line {}: fence, open={:?}", index, self.fence);
                self.push_text(line);
                1
            }
            LineClass::Text => {
                log::trace!("line {}: text", index);
                self.push_text(line);
                1
            }
            LineClass::Heading(heading) => {
                let consumed = heading.line_count();
                log::trace!("line {}: level {} heading", index, heading.level);
                self.push_heading(heading, lines, index);
                self.last_heading_index = Some(index + consumed - 1);
                consumed
            }
        }
    }

    fn push_text(&mut self, line: &str) {
        match self.current {
            Some(id) => self.tree.section_mut(id).push_body(line),
            None => self.tree.push_preamble(line),
        }
    }

    fn push_heading(&mut self, heading: HeadingLine, lines: &[&str], index: usize) {
        let Some(current) = self.current else {
            self.open_section(heading, ParentRef::Root);
            return;
        };

        let current_level = self.tree.level_of(ParentRef::Section(current));
        if heading.level > current_level && self.is_contiguous(lines, index) {
            log::debug!(
                "Merging level {} heading {:?} into section {}",
                heading.level,
                heading.title(),
                current
            );
            self.tree.section_mut(current).merge_title(heading.part);
            return;
        }

        let parent = if heading.level > current_level {
            ParentRef::Section(current)
        } else {
            self.find_parent(current, heading.level)
        };
        self.open_section(heading, parent);
    }

    /// Whether only blank lines separate the previous heading from `index`.
    fn is_contiguous(&self, lines: &[&str], index: usize) -> bool {
        let Some(last) = self.last_heading_index else {
            return false;
        };
        lines[last + 1..index].iter().all(|l| l.trim().is_empty())
    }

    /// Walk up from `from` to the nearest node shallower than `level`.
    fn find_parent(&self, from: SectionId, level: u8) -> ParentRef {
        let mut node = ParentRef::Section(from);
        while let ParentRef::Section(id) = node {
            if self.tree.level_of(node) < level {
                break;
            }
            node = self.tree.parent_of(id);
        }
        node
    }

    fn open_section(&mut self, heading: HeadingLine, parent: ParentRef) {
        let as_main = heading.level == 1 && self.tree.main_id().is_none();
        let level = heading.level;
        let id = self
            .tree
            .insert(Section::new(level, heading.part, parent), as_main);

        log::debug!(
            "Opened level {} section {}{} under {:?}",
            level,
            id,
            if as_main { " (main)" } else { "" },
            parent
        );
        self.current = Some(id);
    }
}

/// Parse an outline string into a section tree.
pub fn parse_str(text: &str) -> SectionTree {
    TreeBuilder::new().build(text)
}

/// Read a UTF-8 outline file and parse it.
///
/// Fails before parsing if the file cannot be read or is not UTF-8.
pub fn parse_file(path: impl AsRef<Path>) -> Result<SectionTree> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|source| Error::InvalidEncoding {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Parsing {} ({} bytes)", path.display(), text.len());
    Ok(parse_str(&text))
}
