// Formula Module - LaTeX to Office Math conversion
//
// A formula goes through three stages:
//
// - **LaTeX → MathML**: rendered by `pulldown-latex` (`latex`)
// - **MathML → tree**: streamed with `quick-xml` into `MathNode`s (`mathml`)
// - **tree → OMML**: rewritten into `OmmlNode`s and serialized (`omml`)
//
// `FormulaConverter` runs the whole chain and turns every failure into a
// diagnostic plus "no result", so one bad formula never fails a document.
//
// # Example
//
// ```
// use mathdocx::diagnostics::NullSink;
// use mathdocx::formula::{FormulaConverter, FormulaMode};
//
// let converter = FormulaConverter::new(&NullSink);
// let omml = converter.convert("x^2", FormulaMode::Inline).unwrap();
// assert!(omml.to_xml().contains("<m:sSup>"));
// ```

/// LaTeX to MathML rendering
pub mod latex;
/// MathML reader
///
/// Streams MathML markup into an owned `MathNode` tree, matching elements by
/// local name so that any namespace declaration style is accepted.
pub mod mathml;
/// OMML tree, transducer and serializer
pub mod omml;

pub use latex::{LatexError, latex_to_mathml};
pub use mathml::{MathKind, MathNode, MathmlError};
pub use omml::{OmmlNode, OmmlRun, RadicalDegree, RunStyle, mathml_to_omml, transduce};

use crate::diagnostics::DiagnosticSink;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Whether a formula is set inline with text or as its own block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaMode {
    Inline,
    Block,
}

/// Literal text substituted for a formula that could not be converted.
///
/// Inline formulas keep their `$` delimiters; block formulas are shown as the
/// raw source.
///
/// # Example
/// ```
/// use mathdocx::formula::{FormulaMode, fallback_text};
///
/// assert_eq!(fallback_text("x^2", FormulaMode::Inline), "$x^2$");
/// assert_eq!(fallback_text("x^2", FormulaMode::Block), "x^2");
/// ```
pub fn fallback_text(source: &str, mode: FormulaMode) -> String {
    match mode {
        FormulaMode::Inline => format!("${}$", source),
        FormulaMode::Block => source.to_string(),
    }
}

/// Any failure along the formula chain.
#[derive(Error, Debug)]
pub enum FormulaError {
    #[error(transparent)]
    Latex(#[from] LatexError),

    #[error(transparent)]
    Mathml(#[from] MathmlError),

    /// MathML rendered to nothing
    #[error("Formula produced no math content")]
    NoResult,

    /// Unexpected panic while rewriting the tree
    #[error("Formula conversion panicked: {0}")]
    Panicked(String),
}

/// Converts LaTeX formulas to OMML, reporting failures to a sink.
pub struct FormulaConverter<'a> {
    sink: &'a dyn DiagnosticSink,
}

impl<'a> FormulaConverter<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self { sink }
    }

    /// Convert one formula, or `None` after reporting the failure once.
    pub fn convert(&self, latex: &str, mode: FormulaMode) -> Option<OmmlNode> {
        match self.try_convert(latex, mode) {
            Ok(node) => Some(node),
            Err(err) => {
                self.sink
                    .error(&format!("Failed to convert formula '{}': {}", latex, err));
                None
            },
        }
    }

    /// Convert one formula, returning the failure instead of reporting it.
    pub fn try_convert(&self, latex: &str, mode: FormulaMode) -> Result<OmmlNode, FormulaError> {
        let mathml = latex_to_mathml(latex, mode)?;
        panic::catch_unwind(AssertUnwindSafe(|| mathml_to_omml(&mathml)))
            .map_err(|payload| FormulaError::Panicked(latex::panic_message(payload.as_ref())))??
            .ok_or(FormulaError::NoResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    #[test]
    fn test_fallback_text() {
        assert_eq!(fallback_text("a+b", FormulaMode::Inline), "$a+b$");
        assert_eq!(fallback_text("a+b", FormulaMode::Block), "a+b");
        assert_eq!(fallback_text("", FormulaMode::Inline), "$$");
    }

    #[test]
    fn test_convert_superscript() {
        let sink = CollectingSink::new();
        let omml = FormulaConverter::new(&sink)
            .convert("x^2", FormulaMode::Inline)
            .unwrap();
        match &omml.children()[0] {
            OmmlNode::Superscript { base, superscript } => {
                assert_eq!(base[0], OmmlNode::run("x", RunStyle::Italic));
                assert_eq!(superscript[0], OmmlNode::run("2", RunStyle::Plain));
            },
            other => panic!("expected superscript, got {:?}", other),
        }
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_convert_fraction_and_root() {
        let sink = CollectingSink::new();
        let converter = FormulaConverter::new(&sink);

        let frac = converter.convert("\\frac{1}{2}", FormulaMode::Block).unwrap();
        assert!(matches!(frac.children()[0], OmmlNode::Fraction { .. }));

        let root = converter.convert("\\sqrt[3]{x}", FormulaMode::Inline).unwrap();
        assert_eq!(
            root.children()[0],
            OmmlNode::Radical {
                degree: RadicalDegree::Shown(vec![OmmlNode::run("3", RunStyle::Plain)]),
                radicand: vec![OmmlNode::run("x", RunStyle::Italic)],
            }
        );
    }

    #[test]
    fn test_convert_xml_special_characters() {
        let sink = CollectingSink::new();
        let converter = FormulaConverter::new(&sink);

        let less = converter.convert("a < b", FormulaMode::Inline).unwrap();
        assert!(less.runs().contains(&&OmmlRun::new("<", RunStyle::Plain)));
        assert!(less.to_xml().contains("<m:t>&lt;</m:t>"));

        let amp = converter.convert("a \\& b", FormulaMode::Inline).unwrap();
        assert!(amp.runs().iter().any(|run| run.text == "&"));
        assert!(amp.to_xml().contains("&amp;"));

        let text = converter
            .convert("\\text{x<y & z}", FormulaMode::Inline)
            .unwrap();
        let plain = text.plain_text();
        assert!(plain.contains('<') && plain.contains('&'), "{}", plain);
        let xml = text.to_xml();
        assert!(xml.contains("&lt;") && xml.contains("&amp;"), "{}", xml);

        assert!(sink.errors().is_empty(), "{:?}", sink.errors());
    }

    #[test]
    fn test_invalid_formula_reports_once() {
        let sink = CollectingSink::new();
        let converter = FormulaConverter::new(&sink);
        assert!(converter.convert("\\frac{1}{", FormulaMode::Inline).is_none());
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.errors()[0].contains("\\frac{1}{"));
    }

    #[test]
    fn test_empty_formula_reports() {
        let sink = CollectingSink::new();
        let converter = FormulaConverter::new(&sink);
        assert!(converter.convert("   ", FormulaMode::Block).is_none());
        assert_eq!(sink.errors().len(), 1);
        assert!(matches!(
            converter.try_convert("", FormulaMode::Inline),
            Err(FormulaError::Latex(LatexError::Empty))
        ));
    }
}
