//! The in-memory document: body content, list numbering and properties.
use super::error::{DocxError, Result};
use super::numbering::NumberingRegistry;
use super::paragraph::Paragraph;
use super::style::heading_style_id;
use super::table::Table;
use crate::formula::omml::OMML_NAMESPACE;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

const WORD_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Document metadata written to `docProps/core.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub created: DateTime<Utc>,
}

impl Default for CoreProperties {
    fn default() -> Self {
        Self {
            title: None,
            creator: None,
            created: Utc::now(),
        }
    }
}

impl CoreProperties {
    /// Creation time in W3CDTF form, e.g. `2024-01-02T03:04:05Z`.
    pub fn created_w3cdtf(&self) -> String {
        self.created.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Block-level content of the body, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    Paragraph(Paragraph),
    Table(Table),
}

/// A Word document being built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    body: Vec<BodyElement>,
    numbering: NumberingRegistry,
    properties: CoreProperties,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty paragraph.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.body.push(BodyElement::Paragraph(Paragraph::new()));
        match self.body.last_mut() {
            Some(BodyElement::Paragraph(paragraph)) => paragraph,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append a paragraph with one plain run.
    pub fn add_paragraph_with_text(&mut self, text: &str) -> &mut Paragraph {
        let paragraph = self.add_paragraph();
        paragraph.add_run(text);
        paragraph
    }

    /// Append an empty heading paragraph for `level` (1-9).
    pub fn add_heading_paragraph(&mut self, level: u8) -> Result<&mut Paragraph> {
        if !(1..=9).contains(&level) {
            return Err(DocxError::InvalidHeadingLevel(level));
        }
        let paragraph = self.add_paragraph();
        paragraph.set_style(&heading_style_id(level));
        Ok(paragraph)
    }

    /// Append a heading with plain text.
    pub fn add_heading(&mut self, text: &str, level: u8) -> Result<&mut Paragraph> {
        let paragraph = self.add_heading_paragraph(level)?;
        paragraph.add_run(text);
        Ok(paragraph)
    }

    /// Append an empty table.
    pub fn add_table(&mut self) -> &mut Table {
        self.body.push(BodyElement::Table(Table::new()));
        match self.body.last_mut() {
            Some(BodyElement::Table(table)) => table,
            _ => unreachable!("a table was just pushed"),
        }
    }

    pub fn body(&self) -> &[BodyElement] {
        &self.body
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|element| match element {
            BodyElement::Paragraph(paragraph) => Some(paragraph),
            BodyElement::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|element| match element {
            BodyElement::Table(table) => Some(table),
            BodyElement::Paragraph(_) => None,
        })
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Formulas in body paragraphs and table cells.
    pub fn math_count(&self) -> usize {
        self.body
            .iter()
            .map(|element| match element {
                BodyElement::Paragraph(paragraph) => paragraph.math_count(),
                BodyElement::Table(table) => table
                    .rows()
                    .iter()
                    .flat_map(|row| row.cells())
                    .flat_map(|cell| cell.paragraphs())
                    .map(Paragraph::math_count)
                    .sum(),
            })
            .sum()
    }

    pub fn numbering(&self) -> &NumberingRegistry {
        &self.numbering
    }

    pub fn numbering_mut(&mut self) -> &mut NumberingRegistry {
        &mut self.numbering
    }

    pub fn properties(&self) -> &CoreProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut CoreProperties {
        &mut self.properties
    }

    /// Generate `word/document.xml`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
        write!(
            xml,
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\" xmlns:m=\"{}\"><w:body>",
            WORD_NAMESPACE, RELATIONSHIPS_NAMESPACE, OMML_NAMESPACE
        )?;

        for element in &self.body {
            match element {
                BodyElement::Paragraph(paragraph) => paragraph.to_xml(&mut xml)?,
                BodyElement::Table(table) => table.to_xml(&mut xml)?,
            }
        }

        // Letter size with one-inch margins
        xml.push_str("<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>");
        xml.push_str("<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>");
        xml.push_str("</w:sectPr></w:body></w:document>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::omml::{OmmlNode, RunStyle};
    use chrono::TimeZone;

    #[test]
    fn test_create_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.table_count(), 0);

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains(&format!("xmlns:m=\"{}\"", OMML_NAMESPACE)));
        assert!(xml.contains("<w:body><w:sectPr>"));
    }

    #[test]
    fn test_headings() {
        let mut doc = Document::new();
        doc.add_heading("Intro", 1).unwrap();
        doc.add_heading("Deep", 9).unwrap();
        assert!(matches!(
            doc.add_heading("Bad", 0),
            Err(DocxError::InvalidHeadingLevel(0))
        ));
        assert!(doc.add_heading("Bad", 10).is_err());

        let styles: Vec<_> = doc.paragraphs().filter_map(Paragraph::style).collect();
        assert_eq!(styles, vec!["Heading1", "Heading9"]);
    }

    #[test]
    fn test_body_order_and_counts() {
        let mut doc = Document::new();
        doc.add_paragraph_with_text("first");
        let table = doc.add_table();
        table
            .add_row(1)
            .cell(0)
            .unwrap()
            .add_paragraph()
            .add_math(OmmlNode::Math(vec![OmmlNode::run("y", RunStyle::Italic)]));
        doc.add_paragraph()
            .add_math(OmmlNode::Math(vec![OmmlNode::run("x", RunStyle::Italic)]));

        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.math_count(), 2);

        let xml = doc.to_xml().unwrap();
        let first = xml.find("first").unwrap();
        let table = xml.find("<w:tbl>").unwrap();
        assert!(first < table);
        assert_eq!(xml.matches("<m:oMath>").count(), 2);
    }

    #[test]
    fn test_core_properties_timestamp() {
        let mut doc = Document::new();
        doc.properties_mut().created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(doc.properties().created_w3cdtf(), "2024-01-02T03:04:05Z");
    }
}
