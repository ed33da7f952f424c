//! Error types for outline compilation.
//!
//! Parsing itself never fails: every text input yields a tree. Errors only
//! come from reading input that is not text, or from misusing section handles.

use std::path::PathBuf;

use thiserror::Error;

use crate::tree::SectionId;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around outline parsing.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input file is not valid UTF-8 text.
    #[error("Input is not valid UTF-8: {path}")]
    InvalidEncoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A section handle was used with a tree it does not belong to.
    #[error("Unknown section: {0}")]
    UnknownSection(SectionId),
}
