//! mathdocx - Markdown with LaTeX formulas to Word documents
//!
//! This library converts Markdown (CommonMark with GFM tables, strikethrough
//! and `$…$` / `$$…$$` formulas) into `.docx` files in which every formula is
//! native, editable Office Math (OMML) instead of an image or plain text.
//!
//! # Pipeline
//!
//! - **Markdown**: parsed with `comrak` into an owned block model ([`markdown`])
//! - **LaTeX → MathML**: rendered by `pulldown-latex` ([`formula::latex`])
//! - **MathML → OMML**: read into a tree and rewritten structurally
//!   ([`formula::mathml`], [`formula::omml`])
//! - **DOCX**: paragraphs, lists, tables and formulas written as
//!   WordprocessingML and zipped into a package ([`docx`])
//!
//! A formula that cannot be converted is written as its literal source and
//! reported to the caller's [`DiagnosticSink`]; it never fails the document.
//!
//! # Example - Converting Markdown
//!
//! ```no_run
//! use mathdocx::{ConversionOptions, Converter, LogSink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = Converter::new(ConversionOptions::default(), &LogSink);
//! converter.convert_file("notes.md", "notes.docx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - MathML to OMML
//!
//! ```
//! use mathdocx::formula::mathml_to_omml;
//!
//! let omml = mathml_to_omml("<math><msup><mi>x</mi><mn>2</mn></msup></math>")
//!     .unwrap()
//!     .unwrap();
//! assert!(omml.to_xml().starts_with("<m:oMath><m:sSup>"));
//! ```

pub mod common;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod docx;
pub mod formula;
pub mod markdown;

pub use config::ConversionOptions;
pub use convert::{ConvertError, Converter};
pub use diagnostics::{CollectingSink, DiagnosticSink, LogSink, NullSink};
pub use docx::Document;
pub use formula::{FormulaConverter, FormulaMode, OmmlNode, mathml_to_omml};
