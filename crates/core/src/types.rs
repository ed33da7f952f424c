//! Slide descriptors handed to an external renderer.

use serde::{Deserialize, Serialize};

/// Compiled slides for one document, in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDeck {
    /// Title of the document's main section, if it has one.
    pub title: Option<String>,

    /// One slide per section.
    pub slides: Vec<SlideDescriptor>,
}

impl SlideDeck {
    /// Create an empty deck.
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            slides: Vec::new(),
        }
    }

    /// Add a slide to the end of the deck.
    pub fn add_slide(&mut self, slide: SlideDescriptor) {
        self.slides.push(slide);
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slides that carry some content.
    pub fn non_empty(&self) -> Vec<&SlideDescriptor> {
        self.slides.iter().filter(|s| s.has_content()).collect()
    }

    /// Drop slides without content, keeping order.
    pub fn retain_non_empty(&mut self) {
        self.slides.retain(SlideDescriptor::has_content);
    }
}

/// A single slide: a section's title, body, and depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    /// Section title; merged headings are newline-joined.
    pub title: String,

    /// Raw section body. Inline markup is left for the renderer.
    pub content: String,

    /// Heading level of the section (1-6).
    pub depth: u8,
}

impl SlideDescriptor {
    /// Create a slide.
    pub fn new(title: impl Into<String>, content: impl Into<String>, depth: u8) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            depth,
        }
    }

    /// Whether the content has any non-whitespace text.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_content() {
        assert!(SlideDescriptor::new("A", "text", 1).has_content());
        assert!(!SlideDescriptor::new("A", "", 1).has_content());
        assert!(!SlideDescriptor::new("A", "\n  \n", 2).has_content());
    }

    #[test]
    fn test_non_empty_filter() {
        let mut deck = SlideDeck::new(Some("Deck".to_string()));
        deck.add_slide(SlideDescriptor::new("A", "", 1));
        deck.add_slide(SlideDescriptor::new("B", "body", 2));
        deck.add_slide(SlideDescriptor::new("C", " ", 2));

        let titles: Vec<&str> = deck.non_empty().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["B"]);
        assert_eq!(deck.len(), 3);

        deck.retain_non_empty();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.slides[0].title, "B");
    }

    #[test]
    fn test_serialize_json_shape() {
        let mut deck = SlideDeck::new(None);
        deck.add_slide(SlideDescriptor::new("Intro", "<p>Hi</p>", 1));

        let json = serde_json::to_value(&deck).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": null,
                "slides": [{ "title": "Intro", "content": "<p>Hi</p>", "depth": 1 }]
            })
        );
    }
}
