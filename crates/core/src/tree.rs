//! Section tree produced by the outline parser.
//!
//! Sections live in a flat arena owned by [`SectionTree`] and refer to each
//! other by [`SectionId`]. Child lists own document order; the parent link is
//! a plain index used for lookups only.

use std::fmt;

use crate::error::{Error, Result};

/// Handle to a section inside a [`SectionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(usize);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a section hangs in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef {
    /// The document root (level 0).
    Root,
    /// Another section.
    Section(SectionId),
}

/// One heading's title text and the markup around it.
///
/// `open + text + close` is exactly the source the heading was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePart {
    open: String,
    text: String,
    close: String,
}

impl TitlePart {
    /// Create a title part from its markup pieces.
    pub fn new(open: impl Into<String>, text: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            text: text.into(),
            close: close.into(),
        }
    }

    /// Title text without markup.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Title text wrapped in its original markup.
    pub fn source(&self) -> String {
        format!("{}{}{}", self.open, self.text, self.close)
    }

    fn with_text(&self, text: &str) -> Self {
        Self::new(self.open.clone(), text, self.close.clone())
    }
}

/// A heading and the text that directly follows it.
#[derive(Debug, Clone)]
pub struct Section {
    level: u8,
    parts: Vec<TitlePart>,
    title: String,
    title_source: String,
    body: Option<String>,
    children: Vec<SectionId>,
    parent: ParentRef,
}

impl Section {
    pub(crate) fn new(level: u8, part: TitlePart, parent: ParentRef) -> Self {
        let mut section = Self {
            level,
            parts: vec![part],
            title: String::new(),
            title_source: String::new(),
            body: None,
            children: Vec::new(),
            parent,
        };
        section.refresh_title();
        section
    }

    /// Heading depth (1-6).
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Heading text with markup stripped. Merged headings are newline-joined.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Heading text as written, including markup.
    pub fn title_source(&self) -> &str {
        &self.title_source
    }

    /// Markup templates making up the title, one per merged heading.
    pub fn title_parts(&self) -> &[TitlePart] {
        &self.parts
    }

    /// Text lines between this heading and the next one, newline-joined.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Direct subsections in document order.
    pub fn children(&self) -> &[SectionId] {
        &self.children
    }

    /// Enclosing node.
    pub fn parent(&self) -> ParentRef {
        self.parent
    }

    /// Replace the title, regenerating `title_source` from the stored markup.
    ///
    /// A title with one line per merged heading keeps every heading's markup.
    /// Any other shape collapses the title into the first heading's markup.
    pub(crate) fn rename(&mut self, new_title: &str) {
        let lines: Vec<&str> = new_title.split('\n').collect();
        if lines.len() == self.parts.len() {
            self.parts = self
                .parts
                .iter()
                .zip(lines)
                .map(|(part, line)| part.with_text(line))
                .collect();
        } else {
            self.parts = vec![self.parts[0].with_text(new_title)];
        }
        self.refresh_title();
    }

    /// Fold a contiguous deeper heading into this one.
    pub(crate) fn merge_title(&mut self, part: TitlePart) {
        self.parts.push(part);
        self.refresh_title();
    }

    pub(crate) fn push_body(&mut self, line: &str) {
        append_line(&mut self.body, line);
    }

    fn refresh_title(&mut self) {
        self.title = self
            .parts
            .iter()
            .map(TitlePart::text)
            .collect::<Vec<_>>()
            .join("\n");
        self.title_source = self
            .parts
            .iter()
            .map(TitlePart::source)
            .collect::<Vec<_>>()
            .join("\n");
    }
}

fn append_line(target: &mut Option<String>, line: &str) {
    match target {
        Some(text) => {
            text.push('\n');
            text.push_str(line);
        }
        None => *target = Some(line.to_string()),
    }
}

/// A parsed outline: the root node plus every section in an arena.
#[derive(Debug, Clone, Default)]
pub struct SectionTree {
    sections: Vec<Section>,
    preamble: Option<String>,
    main: Option<SectionId>,
    children: Vec<SectionId>,
}

impl SectionTree {
    /// Text before the first heading.
    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    /// The document's first level-1 section, if it has one.
    pub fn main(&self) -> Option<&Section> {
        self.main.map(|id| &self.sections[id.0])
    }

    /// Handle of the main section.
    pub fn main_id(&self) -> Option<SectionId> {
        self.main
    }

    /// Document title: the main section's title.
    pub fn title(&self) -> Option<&str> {
        self.main().map(Section::title)
    }

    /// Top-level sections other than `main`, in document order.
    pub fn root_children(&self) -> &[SectionId] {
        &self.children
    }

    /// Total number of sections, `main` included.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no headings at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section.
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    /// Look up a section, failing for handles from another tree.
    pub fn section(&self, id: SectionId) -> Result<&Section> {
        self.sections.get(id.0).ok_or(Error::UnknownSection(id))
    }

    /// Direct subsections of `id`.
    pub fn children(&self, id: SectionId) -> Result<&[SectionId]> {
        self.section(id).map(Section::children)
    }

    /// Enclosing node of `id`.
    pub fn parent(&self, id: SectionId) -> Result<ParentRef> {
        self.section(id).map(Section::parent)
    }

    /// Rename a section, regenerating its `title_source` from the stored markup.
    ///
    /// A title with one line per merged heading keeps every heading's markup.
    /// Any other shape collapses the title into the first heading's markup.
    pub fn rename(&mut self, id: SectionId, new_title: &str) -> Result<()> {
        let section = self
            .sections
            .get_mut(id.0)
            .ok_or(Error::UnknownSection(id))?;
        section.rename(new_title);
        Ok(())
    }

    /// Depth-first, pre-order walk: `main` subtree first, then root children.
    pub fn iter(&self) -> Iter<'_> {
        let mut stack: Vec<SectionId> = self.children.iter().rev().copied().collect();
        stack.extend(self.main);
        Iter { tree: self, stack }
    }

    /// Rebuild the document text from the tree.
    ///
    /// Sections are emitted in document order, which differs from [`iter`]
    /// when `main` follows a deeper top-level section. Without merged headings
    /// this reproduces the parsed input exactly.
    ///
    /// [`iter`]: SectionTree::iter
    pub fn to_source(&self) -> String {
        let mut pieces: Vec<&str> = Vec::new();
        pieces.extend(self.preamble());
        for section in &self.sections {
            pieces.push(section.title_source());
            pieces.extend(section.body());
        }
        pieces.join("\n")
    }

    /// Level of a node; the root is level 0.
    pub(crate) fn level_of(&self, node: ParentRef) -> u8 {
        match node {
            ParentRef::Root => 0,
            ParentRef::Section(id) => self.sections[id.0].level,
        }
    }

    pub(crate) fn parent_of(&self, id: SectionId) -> ParentRef {
        self.sections[id.0].parent
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.0]
    }

    pub(crate) fn push_preamble(&mut self, line: &str) {
        append_line(&mut self.preamble, line);
    }

    /// Store a section and attach it under its parent, or as `main`.
    pub(crate) fn insert(&mut self, section: Section, as_main: bool) -> SectionId {
        let id = SectionId(self.sections.len());
        let parent = section.parent;
        self.sections.push(section);

        if as_main {
            self.main = Some(id);
        } else {
            match parent {
                ParentRef::Root => self.children.push(id),
                ParentRef::Section(parent_id) => self.sections[parent_id.0].children.push(id),
            }
        }
        id
    }
}

/// Pre-order iterator over a [`SectionTree`].
pub struct Iter<'a> {
    tree: &'a SectionTree,
    stack: Vec<SectionId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (SectionId, &'a Section);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let section = &self.tree.sections[id.0];
        self.stack.extend(section.children.iter().rev().copied());
        Some((id, section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_part(level: usize, text: &str) -> TitlePart {
        TitlePart::new(format!("{} ", "#".repeat(level)), text, "")
    }

    #[test]
    fn test_title_part_source() {
        let part = TitlePart::new("  ", "Intro", " \n===");
        assert_eq!(part.text(), "Intro");
        assert_eq!(part.source(), "  Intro \n===");
    }

    #[test]
    fn test_body_accumulates() {
        let mut section = Section::new(1, hash_part(1, "A"), ParentRef::Root);
        assert_eq!(section.body(), None);

        section.push_body("first");
        section.push_body("");
        section.push_body("third");
        assert_eq!(section.body(), Some("first\n\nthird"));
    }

    #[test]
    fn test_rename_single_part() {
        let mut section = Section::new(2, TitlePart::new("", "Old", "\n---"), ParentRef::Root);
        section.rename("New name");
        assert_eq!(section.title(), "New name");
        assert_eq!(section.title_source(), "New name\n---");
    }

    #[test]
    fn test_rename_title_that_occurs_in_markup() {
        let mut section = Section::new(1, hash_part(1, "#"), ParentRef::Root);
        section.rename("Hash");
        assert_eq!(section.title_source(), "# Hash");
    }

    #[test]
    fn test_rename_merged_keeps_each_markup() {
        let mut section = Section::new(1, TitlePart::new("", "Intro", "\n==="), ParentRef::Root);
        section.merge_title(hash_part(3, "Sub"));
        assert_eq!(section.title(), "Intro\nSub");
        assert_eq!(section.title_source(), "Intro\n===\n### Sub");

        section.rename("Welcome\nOverview");
        assert_eq!(section.title(), "Welcome\nOverview");
        assert_eq!(section.title_source(), "Welcome\n===\n### Overview");
    }

    #[test]
    fn test_rename_merged_collapses_on_shape_change() {
        let mut section = Section::new(1, hash_part(1, "A"), ParentRef::Root);
        section.merge_title(hash_part(2, "B"));

        section.rename("Only one");
        assert_eq!(section.title(), "Only one");
        assert_eq!(section.title_source(), "# Only one");
        assert_eq!(section.title_parts().len(), 1);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut tree = SectionTree::default();
        let main = tree.insert(Section::new(1, hash_part(1, "Main"), ParentRef::Root), true);
        let child = tree.insert(
            Section::new(2, hash_part(2, "Child"), ParentRef::Section(main)),
            false,
        );
        let top = tree.insert(Section::new(2, hash_part(2, "Top"), ParentRef::Root), false);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.main_id(), Some(main));
        assert_eq!(tree.title(), Some("Main"));
        assert_eq!(tree.root_children(), &[top]);
        assert_eq!(tree.children(main).unwrap(), &[child]);
        assert_eq!(tree.parent(child).unwrap(), ParentRef::Section(main));
        assert_eq!(tree.level_of(ParentRef::Root), 0);
        assert_eq!(tree.level_of(ParentRef::Section(child)), 2);
    }

    #[test]
    fn test_unknown_section() {
        let tree = SectionTree::default();
        let foreign = SectionId(4);
        assert!(matches!(tree.section(foreign), Err(Error::UnknownSection(id)) if id == foreign));
        assert!(tree.get(foreign).is_none());

        let mut tree = tree;
        assert!(tree.rename(foreign, "x").is_err());
    }

    #[test]
    fn test_iter_is_preorder_main_first() {
        let mut tree = SectionTree::default();
        let other = tree.insert(Section::new(2, hash_part(2, "Other"), ParentRef::Root), false);
        let main = tree.insert(Section::new(1, hash_part(1, "Main"), ParentRef::Root), true);
        let deep = tree.insert(
            Section::new(3, hash_part(3, "Deep"), ParentRef::Section(other)),
            false,
        );
        let under_main = tree.insert(
            Section::new(2, hash_part(2, "Under"), ParentRef::Section(main)),
            false,
        );

        let order: Vec<SectionId> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![main, under_main, other, deep]);
    }

    #[test]
    fn test_to_source_joins_pieces() {
        let mut tree = SectionTree::default();
        tree.push_preamble("intro text");
        let main = tree.insert(Section::new(1, hash_part(1, "A"), ParentRef::Root), true);
        tree.section_mut(main).push_body("body");
        assert_eq!(tree.to_source(), "intro text\n# A\nbody");
    }

    #[test]
    fn test_to_source_keeps_document_order_when_main_is_late() {
        let mut tree = SectionTree::default();
        let first = tree.insert(Section::new(2, hash_part(2, "First"), ParentRef::Root), false);
        tree.section_mut(first).push_body("x");
        tree.insert(Section::new(1, hash_part(1, "Main"), ParentRef::Root), true);

        assert_eq!(tree.to_source(), "## First\nx\n# Main");
    }
}
