//! Paragraphs for DOCX documents.
use super::error::Result;
use super::run::Run;
use crate::common::xml::escape_xml;
use crate::formula::omml::OmmlNode;
use std::fmt::Write as FmtWrite;

/// Paragraph alignment (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphAlignment {
    Left,
    Center,
    Right,
    Justify,
}

impl ParagraphAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphAlignment::Left => "left",
            ParagraphAlignment::Center => "center",
            ParagraphAlignment::Right => "right",
            ParagraphAlignment::Justify => "both",
        }
    }
}

/// Elements that can appear in a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphElement {
    Run(Run),
    /// Office Math, written inline as `m:oMath`
    Math(OmmlNode),
}

/// A paragraph in a document body or table cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub(crate) elements: Vec<ParagraphElement>,
    /// Paragraph style ID
    pub(crate) style: Option<String>,
    pub(crate) properties: ParagraphProperties,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given style ID.
    pub fn with_style(style_id: &str) -> Self {
        let mut paragraph = Self::new();
        paragraph.set_style(style_id);
        paragraph
    }

    /// Add a run with text.
    pub fn add_run(&mut self, text: &str) -> &mut Run {
        self.elements.push(ParagraphElement::Run(Run::new(text)));
        match self.elements.last_mut() {
            Some(ParagraphElement::Run(run)) => run,
            _ => unreachable!("a run was just pushed"),
        }
    }

    /// Append an Office Math formula.
    pub fn add_math(&mut self, math: OmmlNode) {
        self.elements.push(ParagraphElement::Math(math));
    }

    /// Set the paragraph style.
    pub fn set_style(&mut self, style_id: &str) {
        self.style = Some(style_id.to_string());
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Set paragraph alignment.
    pub fn set_alignment(&mut self, alignment: ParagraphAlignment) {
        self.properties.alignment = Some(alignment);
    }

    pub fn alignment(&self) -> Option<ParagraphAlignment> {
        self.properties.alignment
    }

    /// Set spacing before and after this paragraph (in twips).
    pub fn set_spacing(&mut self, before: u32, after: u32) {
        self.properties.space_before = Some(before);
        self.properties.space_after = Some(after);
    }

    /// Set left indentation (in twips).
    pub fn set_indent_left(&mut self, twips: u32) {
        self.properties.indent_left = Some(twips);
    }

    /// Attach this paragraph to a numbering instance.
    pub fn set_numbering(&mut self, num_id: u32, level: u32) {
        self.properties.numbering = Some(NumberingProperties {
            num_id,
            ilvl: level,
        });
    }

    /// Numbering instance and level, if this is a list item.
    pub fn numbering(&self) -> Option<(u32, u32)> {
        self.properties
            .numbering
            .as_ref()
            .map(|n| (n.num_id, n.ilvl))
    }

    pub fn elements(&self) -> &[ParagraphElement] {
        &self.elements
    }

    /// Get the number of elements (runs and formulas).
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the runs of this paragraph.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.elements.iter().filter_map(|element| match element {
            ParagraphElement::Run(run) => Some(run),
            ParagraphElement::Math(_) => None,
        })
    }

    /// Number of formulas in this paragraph.
    pub fn math_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, ParagraphElement::Math(_)))
            .count()
    }

    /// Text of all runs and formulas.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for element in &self.elements {
            match element {
                ParagraphElement::Run(run) => {
                    text.push_str(run.text());
                    if run.has_break() {
                        text.push('\n');
                    }
                },
                ParagraphElement::Math(math) => text.push_str(&math.plain_text()),
            }
        }
        text
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");

        if self.style.is_some() || self.properties.has_properties() {
            xml.push_str("<w:pPr>");

            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml(style))?;
            }

            if let Some(ref numbering) = self.properties.numbering {
                write!(
                    xml,
                    "<w:numPr><w:ilvl w:val=\"{}\"/><w:numId w:val=\"{}\"/></w:numPr>",
                    numbering.ilvl, numbering.num_id
                )?;
            }

            if self.properties.space_before.is_some() || self.properties.space_after.is_some() {
                xml.push_str("<w:spacing");
                if let Some(before) = self.properties.space_before {
                    write!(xml, " w:before=\"{}\"", before)?;
                }
                if let Some(after) = self.properties.space_after {
                    write!(xml, " w:after=\"{}\"", after)?;
                }
                xml.push_str("/>");
            }

            if let Some(left) = self.properties.indent_left {
                write!(xml, "<w:ind w:left=\"{}\"/>", left)?;
            }

            if let Some(alignment) = self.properties.alignment {
                write!(xml, "<w:jc w:val=\"{}\"/>", alignment.as_str())?;
            }

            xml.push_str("</w:pPr>");
        }

        for element in &self.elements {
            match element {
                ParagraphElement::Run(run) => run.to_xml(xml)?,
                ParagraphElement::Math(math) => math.write_xml(xml),
            }
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

/// Paragraph properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ParagraphProperties {
    pub(crate) alignment: Option<ParagraphAlignment>,
    pub(crate) numbering: Option<NumberingProperties>,
    pub(crate) space_before: Option<u32>,
    pub(crate) space_after: Option<u32>,
    pub(crate) indent_left: Option<u32>,
}

impl ParagraphProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.alignment.is_some()
            || self.numbering.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.indent_left.is_some()
    }
}

/// Numbering properties for lists.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumberingProperties {
    pub(crate) num_id: u32,
    pub(crate) ilvl: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::omml::RunStyle;

    fn xml_of(paragraph: &Paragraph) -> String {
        let mut xml = String::new();
        paragraph.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_empty_paragraph() {
        assert_eq!(xml_of(&Paragraph::new()), "<w:p></w:p>");
    }

    #[test]
    fn test_properties_order() {
        let mut paragraph = Paragraph::with_style("ListNumber");
        paragraph.set_numbering(101, 2);
        paragraph.set_alignment(ParagraphAlignment::Center);
        paragraph.add_run("item");

        let xml = xml_of(&paragraph);
        let style = xml.find("w:pStyle").unwrap();
        let num = xml.find("w:numPr").unwrap();
        let jc = xml.find("w:jc").unwrap();
        assert!(style < num && num < jc);
        assert!(xml.contains("<w:ilvl w:val=\"2\"/><w:numId w:val=\"101\"/>"));
        assert_eq!(paragraph.numbering(), Some((101, 2)));
    }

    #[test]
    fn test_math_written_inline() {
        let mut paragraph = Paragraph::new();
        paragraph.add_run("Let ");
        paragraph.add_math(OmmlNode::Math(vec![OmmlNode::run("x", RunStyle::Italic)]));
        paragraph.add_run(" be real.");

        let xml = xml_of(&paragraph);
        assert!(xml.contains("</w:r><m:oMath><m:r>"));
        assert_eq!(paragraph.math_count(), 1);
        assert_eq!(paragraph.runs().count(), 2);
        assert_eq!(paragraph.text(), "Let x be real.");
    }
}
