//! Linearizes a section tree into slides.

use crate::tree::SectionTree;
use crate::types::{SlideDeck, SlideDescriptor};

/// Turns a [`SectionTree`] into a [`SlideDeck`].
///
/// Sections are visited depth-first, pre-order: the `main` subtree, then each
/// top-level section. Every section yields exactly one slide, including
/// sections without a body. The preamble has no title and is not emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideCompiler;

impl SlideCompiler {
    /// Create a new compiler.
    pub fn new() -> Self {
        Self
    }

    /// Compile the tree. The tree is consumed; it is not needed afterwards.
    pub fn compile(&self, tree: SectionTree) -> SlideDeck {
        let mut deck = SlideDeck::new(tree.title().map(str::to_string));

        for (_, section) in tree.iter() {
            deck.add_slide(SlideDescriptor::new(
                section.title(),
                section.body().unwrap_or_default(),
                section.level(),
            ));
        }

        log::debug!("Compiled {} slides", deck.len());
        deck
    }
}

/// Parse an outline and compile it into slides in one step.
pub fn compile_str(text: &str) -> SlideDeck {
    SlideCompiler::new().compile(crate::builder::parse_str(text))
}
