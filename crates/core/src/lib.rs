//! Outline-to-slides compiler.
//!
//! Parses outline text with underline (`===`/`---`) and hash (`#`) headings
//! into a section tree, then linearizes the tree into slide descriptors for
//! an external renderer.

pub mod builder;
pub mod compile;
pub mod detect;
pub mod error;
pub mod format;
pub mod tree;
pub mod types;

pub use builder::{parse_file, parse_str, TreeBuilder};
pub use compile::{compile_str, SlideCompiler};
pub use detect::{HeadingDetector, HeadingLine, HeadingStyle, LineClass};
pub use error::{Error, Result};
pub use format::TextFormatter;
pub use tree::{ParentRef, Section, SectionId, SectionTree, TitlePart};
pub use types::{SlideDeck, SlideDescriptor};
