//! Plain-text slide listing.
//!
//! Writes each slide as its title followed by its content, indented by depth,
//! with slides separated by a blank line. Meant for reading a compiled deck in
//! a terminal, not as a presentation format.

use crate::types::{SlideDeck, SlideDescriptor};

/// Formatter for plain-text slide listings.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Spaces of indentation per depth level below 1.
    indent: usize,

    /// Leave out slides without content.
    skip_empty: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            indent: 2,
            skip_empty: false,
        }
    }
}

impl TextFormatter {
    /// Create a formatter with 2-space indentation that keeps every slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width per depth level.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set whether slides without content are left out.
    pub fn with_skip_empty(mut self, skip: bool) -> Self {
        self.skip_empty = skip;
        self
    }

    /// Format a deck.
    ///
    /// # Example output
    /// ```text
    /// Deck
    /// opening words
    ///
    ///   First topic
    ///   one
    /// ```
    pub fn format(&self, deck: &SlideDeck) -> String {
        let blocks: Vec<String> = deck
            .slides
            .iter()
            .filter(|s| !self.skip_empty || s.has_content())
            .map(|s| self.format_slide(s))
            .collect();

        blocks.join("\n\n")
    }

    /// Format a deck, adding a trailing newline when there is any output.
    pub fn format_with_newline(&self, deck: &SlideDeck) -> String {
        let formatted = self.format(deck);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }

    fn format_slide(&self, slide: &SlideDescriptor) -> String {
        let pad = " ".repeat(self.indent * usize::from(slide.depth.saturating_sub(1)));
        let content = slide.content.trim_end();

        slide
            .title
            .lines()
            .chain(content.lines())
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("{}{}", pad, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
