//! Error types for deck loading.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// The source produced no slides at all.
    #[error("Malformed deck: {0}")]
    MalformedDeck(String),

    /// A fenced code block was opened and never closed.
    #[error("Unterminated {fence} block in slide {slide} (opened at line {line})")]
    UnterminatedBlock {
        /// Zero-based index of the slide holding the opening fence.
        slide: usize,
        /// One-based source line of the opening fence.
        line: usize,
        /// The fence marker as written, e.g. "```".
        fence: String,
    },

    /// An HTML page did not contain a slide source textarea.
    #[error("No <textarea> slide source found")]
    MissingSource,

    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}
