//! Markdown input model.
//!
//! Markdown source is parsed with comrak (CommonMark plus GFM tables,
//! strikethrough and dollar math) into an owned block/inline model that the
//! converter walks to build the DOCX document.

mod model;
mod parser;

pub use model::{Block, Inline, TableCell, inline_text};
pub use parser::parse;
