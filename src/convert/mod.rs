//! Markdown to DOCX conversion.
//!
//! [`Converter`] parses Markdown, maps every block onto the DOCX model and
//! packages the result. Formulas go through
//! [`FormulaConverter`](crate::formula::FormulaConverter): a formula that
//! cannot be converted is written as literal text and reported to the
//! [`DiagnosticSink`], so the document is still produced.
//!
//! # Example
//!
//! ```rust
//! use mathdocx::config::ConversionOptions;
//! use mathdocx::convert::Converter;
//! use mathdocx::diagnostics::CollectingSink;
//!
//! let sink = CollectingSink::new();
//! let converter = Converter::new(ConversionOptions::default(), &sink);
//! let document = converter.convert_str("# Euler\n\n$$e^{i\\pi} + 1 = 0$$\n")?;
//! assert_eq!(document.math_count(), 1);
//! # Ok::<(), mathdocx::convert::ConvertError>(())
//! ```

mod builder;
mod error;

pub use builder::ConversionStats;
pub use error::{ConvertError, Result};

use crate::config::ConversionOptions;
use crate::diagnostics::DiagnosticSink;
use crate::docx::{Document, package};
use crate::formula::latex::panic_message;
use builder::DocumentBuilder;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Converts Markdown with LaTeX formulas into Word documents.
pub struct Converter<'a> {
    options: ConversionOptions,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Converter<'a> {
    pub fn new(options: ConversionOptions, sink: &'a dyn DiagnosticSink) -> Self {
        Self { options, sink }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert Markdown source into an in-memory document.
    pub fn convert_str(&self, markdown: &str) -> Result<Document> {
        self.convert_with_stats(markdown).map(|(document, _)| document)
    }

    /// Like [`convert_str`](Self::convert_str), also returning counters.
    pub fn convert_with_stats(&self, markdown: &str) -> Result<(Document, ConversionStats)> {
        self.check_size(markdown.len() as u64)?;

        let blocks = crate::markdown::parse(markdown);
        self.sink
            .debug(&format!("Parsed {} top-level blocks", blocks.len()));

        let mut builder = DocumentBuilder::new(&self.options, self.sink);
        builder.write_blocks(&blocks)?;
        let (document, stats) = builder.finish();

        self.sink.info(&format!(
            "Converted {} blocks into {} paragraphs and {} tables ({} formulas, {} fallbacks)",
            stats.blocks,
            document.paragraph_count(),
            document.table_count(),
            stats.formulas,
            stats.fallbacks
        ));
        if stats.fallbacks > 0 {
            self.sink.warn(&format!(
                "{} formula(s) were written as literal source",
                stats.fallbacks
            ));
        }

        Ok((document, stats))
    }

    /// Convert Markdown source into the bytes of a `.docx` file.
    pub fn convert_to_bytes(&self, markdown: &str) -> Result<Vec<u8>> {
        let document = self.convert_str(markdown)?;
        Ok(package::to_bytes(&document)?)
    }

    /// Convert the Markdown file at `input` and write the `.docx` to `output`.
    ///
    /// The extension allow list and the size limit are checked before the
    /// file is read.
    pub fn convert_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !self.options.is_extension_allowed(input) {
            let extension = input
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext))
                .unwrap_or_default();
            return Err(ConvertError::UnsupportedExtension(extension));
        }

        self.check_size(std::fs::metadata(input)?.len())?;
        let markdown = std::fs::read_to_string(input)?;
        self.sink.info(&format!(
            "Converting {} ({} bytes) to {}",
            input.display(),
            markdown.len(),
            output.display()
        ));

        let document = self.convert_str(&markdown)?;
        package::save(&document, output)?;
        self.sink
            .info(&format!("Wrote Word document {}", output.display()));
        Ok(())
    }

    /// Convert independent Markdown sources in parallel.
    ///
    /// Results keep the order of `inputs`. A panic while converting one input
    /// becomes [`ConvertError::Panicked`] for that input only.
    pub fn convert_batch(&self, inputs: &[&str]) -> Vec<Result<Vec<u8>>> {
        inputs
            .par_iter()
            .map(|markdown| {
                panic::catch_unwind(AssertUnwindSafe(|| self.convert_to_bytes(markdown)))
                    .unwrap_or_else(|payload| {
                        let message = panic_message(payload.as_ref());
                        self.sink
                            .error(&format!("Conversion panicked: {}", message));
                        Err(ConvertError::Panicked(message))
                    })
            })
            .collect()
    }

    fn check_size(&self, size: u64) -> Result<()> {
        let limit = self.options.max_input_bytes;
        if size > limit {
            return Err(ConvertError::InputTooLarge { size, limit });
        }
        Ok(())
    }
}
