//! Tables for DOCX documents.
use super::error::Result;
use super::paragraph::Paragraph;
use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Style applied to tables created by the converter.
pub const DEFAULT_TABLE_STYLE: &str = "TableGrid";

const BORDER_SIDES: [&str; 6] = ["top", "left", "bottom", "right", "insideH", "insideV"];

/// A table made of rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(crate) rows: Vec<TableRow>,
    pub(crate) style: Option<String>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create an empty table with the grid style.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            style: Some(DEFAULT_TABLE_STYLE.to_string()),
        }
    }

    /// Append a row with `cols` empty cells.
    pub fn add_row(&mut self, cols: usize) -> &mut TableRow {
        self.rows.push(TableRow::new(cols));
        let index = self.rows.len() - 1;
        &mut self.rows[index]
    }

    /// Append a header row, repeated at the top of each page.
    pub fn add_header_row(&mut self, cols: usize) -> &mut TableRow {
        let row = self.add_row(cols);
        row.header = true;
        row
    }

    pub fn set_style(&mut self, style_id: Option<&str>) {
        self.style = style_id.map(str::to_string);
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid columns: the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }

    /// Get a cell by row and column index.
    pub fn cell(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row)?.cells.get_mut(col)
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tbl><w:tblPr>");

        if let Some(ref style) = self.style {
            write!(xml, "<w:tblStyle w:val=\"{}\"/>", escape_xml(style))?;
        }
        xml.push_str("<w:tblW w:w=\"5000\" w:type=\"pct\"/>");

        xml.push_str("<w:tblBorders>");
        for side in BORDER_SIDES {
            write!(
                xml,
                "<w:{} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                side
            )?;
        }
        xml.push_str("</w:tblBorders>");
        xml.push_str("<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" w:firstColumn=\"1\" w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/>");
        xml.push_str("</w:tblPr>");

        xml.push_str("<w:tblGrid>");
        for _ in 0..self.column_count() {
            xml.push_str("<w:gridCol/>");
        }
        xml.push_str("</w:tblGrid>");

        for row in &self.rows {
            row.to_xml(xml)?;
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub(crate) cells: Vec<TableCell>,
    pub(crate) header: bool,
}

impl TableRow {
    pub(crate) fn new(cols: usize) -> Self {
        Self {
            cells: (0..cols).map(|_| TableCell::new()).collect(),
            header: false,
        }
    }

    /// Get a cell by column index.
    pub fn cell(&mut self, index: usize) -> Option<&mut TableCell> {
        self.cells.get_mut(index)
    }

    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    pub fn is_header(&self) -> bool {
        self.header
    }

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tr>");
        if self.header {
            xml.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        for cell in &self.cells {
            cell.to_xml(xml)?;
        }
        xml.push_str("</w:tr>");
        Ok(())
    }
}

/// A table cell holding paragraphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    pub(crate) paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph and return it for filling.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new());
        let index = self.paragraphs.len() - 1;
        &mut self.paragraphs[index]
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Text of the cell, paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tc>");
        // A cell must end with a paragraph
        if self.paragraphs.is_empty() {
            xml.push_str("<w:p/>");
        }
        for paragraph in &self.paragraphs {
            paragraph.to_xml(xml)?;
        }
        xml.push_str("</w:tc>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_of(table: &Table) -> String {
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_table_structure() {
        let mut table = Table::new();
        let header = table.add_header_row(2);
        header.cell(0).unwrap().add_paragraph().add_run("a").bold(true);
        header.cell(1).unwrap().add_paragraph().add_run("b").bold(true);
        table.add_row(3);
        table.cell(1, 2).unwrap().add_paragraph().add_run("c");

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
        assert!(table.rows()[0].is_header());

        let xml = xml_of(&table);
        assert!(xml.starts_with("<w:tbl><w:tblPr><w:tblStyle w:val=\"TableGrid\"/>"));
        assert_eq!(xml.matches("<w:gridCol/>").count(), 3);
        assert_eq!(xml.matches("<w:tblHeader/>").count(), 1);
        assert_eq!(xml.matches("<w:tc>").count(), 5);
        // Empty cells still carry a paragraph
        assert_eq!(xml.matches("<w:tc><w:p/></w:tc>").count(), 2);
    }

    #[test]
    fn test_cell_text() {
        let mut table = Table::new();
        let cell = table.add_row(1).cell(0).unwrap();
        cell.add_paragraph().add_run("one");
        cell.add_paragraph().add_run("two");
        assert_eq!(table.rows()[0].cells()[0].text(), "one\ntwo");
    }

    #[test]
    fn test_empty_table() {
        let mut table = Table::new();
        table.set_style(None);
        let xml = xml_of(&table);
        assert!(!xml.contains("tblStyle"));
        assert!(xml.contains("<w:tblGrid></w:tblGrid>"));
    }
}
