//! DOCX document model and writer.
//!
//! Content is built in memory through [`Document`], [`Paragraph`], [`Run`]
//! and [`Table`], then serialized as WordprocessingML parts and zipped into
//! an OPC package by [`package::to_bytes`] or [`package::save`].
//!
//! Formulas are stored as [`OmmlNode`](crate::formula::omml::OmmlNode) trees
//! inside paragraphs and written inline as `m:oMath`.
//!
//! # Example
//!
//! ```rust
//! use mathdocx::docx::{Document, package};
//!
//! let mut doc = Document::new();
//! doc.add_heading("Results", 1)?;
//! doc.add_paragraph_with_text("All tests pass.");
//! let bytes = package::to_bytes(&doc)?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), mathdocx::docx::DocxError>(())
//! ```

mod document;
mod error;
mod numbering;
pub mod package;
mod paragraph;
mod run;
mod style;
mod table;

pub use document::{BodyElement, CoreProperties, Document};
pub use error::{DocxError, Result};
pub use numbering::{FIRST_NUM_ID, LIST_LEVELS, ListDefinition, NumberingRegistry};
pub use paragraph::{Paragraph, ParagraphAlignment, ParagraphElement};
pub use run::Run;
pub use style::{Style, StyleKind, default_styles, generate_styles_xml, heading_style_id};
pub use table::{DEFAULT_TABLE_STYLE, Table, TableCell, TableRow};
