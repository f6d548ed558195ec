//! Error types for DOCX writing.
use thiserror::Error;

/// Result type for DOCX writing.
pub type Result<T> = std::result::Result<T, DocxError>;

/// Errors that can occur while building or packaging a document.
#[derive(Error, Debug)]
pub enum DocxError {
    /// Formatting into the XML buffer failed
    #[error("XML error: {0}")]
    Xml(#[from] std::fmt::Error),

    /// Heading level outside 1-9
    #[error("Heading level must be 1-9, got {0}")]
    InvalidHeadingLevel(u8),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
