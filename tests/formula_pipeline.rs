//! LaTeX → MathML → OMML through the public API.

use mathdocx::diagnostics::CollectingSink;
use mathdocx::formula::{
    FormulaConverter, FormulaMode, OmmlNode, RadicalDegree, RunStyle, latex_to_mathml,
    mathml_to_omml,
};

#[test]
fn superscript_from_latex() {
    let sink = CollectingSink::new();
    let omml = FormulaConverter::new(&sink)
        .convert("x^2", FormulaMode::Inline)
        .unwrap();

    let xml = omml.to_xml();
    assert!(xml.starts_with("<m:oMath>"));
    assert!(xml.contains("<m:sSup><m:e>"));
    assert!(xml.contains("<m:sty m:val=\"i\"/></m:rPr><m:t>x</m:t>"));
    assert!(sink.errors().is_empty());
}

#[test]
fn nth_root_puts_index_in_degree() {
    let mathml = latex_to_mathml("\\sqrt[3]{y}", FormulaMode::Block).unwrap();
    let omml = mathml_to_omml(&mathml).unwrap().unwrap();

    match &omml.children()[0] {
        OmmlNode::Radical {
            degree: RadicalDegree::Shown(degree),
            radicand,
        } => {
            assert_eq!(degree, &vec![OmmlNode::run("3", RunStyle::Plain)]);
            assert_eq!(radicand, &vec![OmmlNode::run("y", RunStyle::Italic)]);
        },
        other => panic!("expected radical, got {:?}", other),
    }
}

#[test]
fn prefixed_mathml_matches_unprefixed() {
    let plain = mathml_to_omml("<math><mfrac><mn>1</mn><mi>n</mi></mfrac></math>")
        .unwrap()
        .unwrap();
    let prefixed = mathml_to_omml(
        "<m:math xmlns:m=\"http://www.w3.org/1998/Math/MathML\"><m:mfrac><m:mn>1</m:mn><m:mi>n</m:mi></m:mfrac></m:math>",
    )
    .unwrap()
    .unwrap();
    assert_eq!(plain, prefixed);
}

#[test]
fn standalone_xml_declares_namespace() {
    let omml = mathml_to_omml("<math><mtext> if </mtext></math>")
        .unwrap()
        .unwrap();
    let xml = omml.to_xml_standalone();
    assert!(xml.starts_with(
        "<m:oMath xmlns:m=\"http://schemas.openxmlformats.org/officeDocument/2006/math\">"
    ));
    assert!(xml.contains("<m:t xml:space=\"preserve\"> if </m:t>"));
}

#[test]
fn failures_are_reported_once_each() {
    let sink = CollectingSink::new();
    let converter = FormulaConverter::new(&sink);

    assert!(converter.convert("\\frac{1}{", FormulaMode::Inline).is_none());
    assert!(converter.convert("", FormulaMode::Block).is_none());
    assert!(converter.convert("a+b", FormulaMode::Inline).is_some());

    assert_eq!(sink.errors().len(), 2);
}

#[test]
fn inequalities_become_native_math() {
    let sink = CollectingSink::new();
    let converter = FormulaConverter::new(&sink);

    for source in ["0 < x < 1", "a \\lt b", "\\{ x \\mid x < 0 \\}", "a > b"] {
        let omml = converter
            .convert(source, FormulaMode::Inline)
            .unwrap_or_else(|| panic!("{} was not converted", source));
        let xml = omml.to_xml();
        assert!(!xml.contains("<m:t><</m:t>"), "{}", xml);
        assert!(omml.runs().iter().any(|run| run.text == "<" || run.text == ">"));
    }
    assert!(sink.errors().is_empty(), "{:?}", sink.errors());
}

#[test]
fn ampersand_survives_the_pipeline() {
    let mathml = latex_to_mathml("\\text{x<y & z}", FormulaMode::Block).unwrap();
    let omml = mathml_to_omml(&mathml).unwrap().unwrap();
    let xml = omml.to_xml();
    assert!(xml.contains("&lt;"), "{}", xml);
    assert!(xml.contains("&amp;"), "{}", xml);
}

#[test]
fn malformed_and_empty_mathml() {
    assert!(mathml_to_omml("<math><mi>x</math>").is_err());
    assert!(mathml_to_omml("").unwrap().is_none());
    assert!(mathml_to_omml("  \n ").unwrap().is_none());
}
