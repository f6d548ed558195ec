//! Errors raised by a Markdown to DOCX conversion.
use crate::config::ConfigError;
use crate::docx::DocxError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Failure of a whole conversion. Formula failures never surface here; they
/// fall back to literal text and are reported as diagnostics.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Docx(#[from] DocxError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file extension is not in the allow list
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Input is {size} bytes, limit is {limit}")]
    InputTooLarge { size: u64, limit: u64 },

    /// A conversion panicked and was isolated
    #[error("Conversion panicked: {0}")]
    Panicked(String),
}
