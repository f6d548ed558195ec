/// Error types for MathML parsing.
use thiserror::Error;

/// Result type for MathML parsing.
pub type Result<T> = std::result::Result<T, MathmlError>;

/// Errors that can occur while reading MathML markup into a tree.
#[derive(Error, Debug)]
pub enum MathmlError {
    /// XML syntax error reported by the reader
    #[error("XML parsing error at position {position}: {message}")]
    Xml { position: u64, message: String },

    /// The input contained no root element
    #[error("No MathML element found")]
    Empty,

    /// An end tag without a matching start tag, or unclosed elements at EOF
    #[error("Unbalanced element: {0}")]
    UnbalancedElement(String),

    /// Element nesting exceeded the configured limit
    #[error("XML depth limit exceeded: {0}")]
    DepthLimitExceeded(usize),

    /// A second root element followed the first one
    #[error("Unexpected content after root element: {0}")]
    TrailingContent(String),

    /// Element or attribute names that are not valid UTF-8
    #[error("Text encoding error: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}
