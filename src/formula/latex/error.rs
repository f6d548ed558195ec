/// Error types for LaTeX rendering.
use thiserror::Error;

/// Result type for LaTeX rendering.
pub type Result<T> = std::result::Result<T, LatexError>;

/// Errors that can occur while rendering LaTeX source to MathML.
#[derive(Error, Debug)]
pub enum LatexError {
    /// Formula source is blank
    #[error("Empty formula")]
    Empty,

    /// The renderer flagged the source as invalid
    #[error("LaTeX parse error: {0}")]
    Parse(String),

    /// Writing the rendered markup failed
    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),

    /// The renderer panicked on this input
    #[error("Renderer panicked: {0}")]
    Panicked(String),
}
