// OMML (Office Math Markup Language) generation
//
// The transducer rewrites a parsed MathML tree into an owned OMML tree, which
// the writer serializes as the `m:` markup embedded in WordprocessingML.

mod node;
mod transducer;
mod writer;

pub use node::{OmmlNode, OmmlRun, RadicalDegree, RunStyle};
pub use transducer::transduce;
pub use writer::OMML_NAMESPACE;

use crate::formula::mathml::{self, MathmlError};

/// Parse MathML markup and rewrite it into OMML.
///
/// Blank input yields `Ok(None)`, the "no result" value. Markup that cannot be
/// parsed is reported as an error, so callers can tell the two apart.
///
/// # Example
/// ```
/// use mathdocx::formula::omml::mathml_to_omml;
///
/// let omml = mathml_to_omml("<math><msup><mi>x</mi><mn>2</mn></msup></math>")
///     .unwrap()
///     .unwrap();
/// assert_eq!(omml.plain_text(), "x2");
/// assert!(mathml_to_omml("  ").unwrap().is_none());
/// assert!(mathml_to_omml("<math><mi>x</math>").is_err());
/// ```
pub fn mathml_to_omml(xml: &str) -> Result<Option<OmmlNode>, MathmlError> {
    if xml.trim().is_empty() {
        return Ok(None);
    }
    let tree = mathml::parse(xml)?;
    Ok(Some(transduce(&tree)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mathml_to_omml_end_to_end() {
        let xml = r#"<math xmlns="http://www.w3.org/1998/Math/MathML" display="inline">
            <mi>f</mi>
            <mfenced><mi>x</mi></mfenced>
            <mo>=</mo>
            <msup><mi>x</mi><mn>2</mn></msup>
        </math>"#;
        let omml = mathml_to_omml(xml).unwrap().unwrap();
        assert_eq!(
            omml,
            OmmlNode::Math(vec![
                OmmlNode::run("f", RunStyle::Italic),
                OmmlNode::Delimited {
                    open: "(".into(),
                    close: ")".into(),
                    content: vec![OmmlNode::run("x", RunStyle::Italic)],
                },
                OmmlNode::run("=", RunStyle::Plain),
                OmmlNode::Superscript {
                    base: vec![OmmlNode::run("x", RunStyle::Italic)],
                    superscript: vec![OmmlNode::run("2", RunStyle::Plain)],
                },
            ])
        );
    }

    #[test]
    fn test_mathml_to_omml_prefixed_input() {
        let xml = r#"<mml:math xmlns:mml="http://www.w3.org/1998/Math/MathML"><mml:mroot><mml:mi>x</mml:mi><mml:mn>3</mml:mn></mml:mroot></mml:math>"#;
        let omml = mathml_to_omml(xml).unwrap().unwrap();
        assert_eq!(
            omml.children()[0],
            OmmlNode::Radical {
                degree: RadicalDegree::Shown(vec![OmmlNode::run("3", RunStyle::Plain)]),
                radicand: vec![OmmlNode::run("x", RunStyle::Italic)],
            }
        );
    }

    #[test]
    fn test_mathml_to_omml_empty_and_malformed() {
        assert!(mathml_to_omml("").unwrap().is_none());
        assert!(mathml_to_omml("\n\t ").unwrap().is_none());
        assert!(matches!(
            mathml_to_omml("<math><mfrac><mn>1</mn></math>"),
            Err(MathmlError::Xml { .. }) | Err(MathmlError::UnbalancedElement(_))
        ));
    }

    #[test]
    fn test_mtext_leading_space_serialized() {
        let omml = mathml_to_omml("<math><mtext> and </mtext></math>").unwrap().unwrap();
        assert!(omml.to_xml().contains(r#"<m:t xml:space="preserve"> and </m:t>"#));
    }
}
