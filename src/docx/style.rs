//! Style definitions (`word/styles.xml`).
//!
//! The converter references styles by ID only; this module supplies the
//! definitions for every ID it uses so that Word renders headings, lists,
//! code and tables the same way without a template document.
use super::error::Result;
use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Kind of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Paragraph => "paragraph",
            StyleKind::Character => "character",
            StyleKind::Table => "table",
        }
    }
}

/// A style definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub id: String,
    pub name: String,
    pub kind: StyleKind,
    pub is_default: bool,
    pub based_on: Option<String>,
    pub next: Option<String>,
    pub priority: Option<u32>,
    pub quick_format: bool,
    pub font_name: Option<String>,
    /// Font size in half-points
    pub font_size: Option<u32>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<String>,
    pub alignment: Option<&'static str>,
    /// Spacing before and after, in twips
    pub spacing: Option<(u32, u32)>,
    pub indent_left: Option<u32>,
    /// Heading outline level (0-based)
    pub outline_level: Option<u8>,
    /// Draw single borders around table cells
    pub table_borders: bool,
}

impl Style {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            is_default: false,
            based_on: None,
            next: None,
            priority: None,
            quick_format: false,
            font_name: None,
            font_size: None,
            bold: false,
            italic: false,
            color: None,
            alignment: None,
            spacing: None,
            indent_left: None,
            outline_level: None,
            table_borders: false,
        }
    }

    /// A paragraph style derived from `Normal`.
    fn derived(id: &str, name: &str, priority: u32) -> Self {
        let mut style = Self::new(id, name, StyleKind::Paragraph);
        style.based_on = Some("Normal".to_string());
        style.priority = Some(priority);
        style
    }

    pub fn normal() -> Self {
        let mut style = Self::new("Normal", "Normal", StyleKind::Paragraph);
        style.is_default = true;
        style.quick_format = true;
        style.spacing = Some((0, 160));
        style
    }

    pub fn title() -> Self {
        let mut style = Self::derived("Title", "Title", 10);
        style.next = Some("Normal".to_string());
        style.quick_format = true;
        style.font_name = Some("Calibri Light".to_string());
        style.font_size = Some(56);
        style.spacing = Some((0, 0));
        style
    }

    /// Heading style for `level` (1-9).
    pub fn heading(level: u8) -> Self {
        let level = level.clamp(1, 9);
        let size = match level {
            1 => 32,
            2 => 26,
            3 => 24,
            _ => 22,
        };

        let mut style = Self::derived(&heading_style_id(level), &format!("heading {}", level), 9);
        style.next = Some("Normal".to_string());
        style.quick_format = true;
        style.font_name = Some("Calibri Light".to_string());
        style.font_size = Some(size);
        style.color = Some(if level <= 2 { "2F5496" } else { "1F3763" }.to_string());
        style.italic = level >= 4;
        style.spacing = Some((if level == 1 { 240 } else { 40 }, 0));
        style.outline_level = Some(level - 1);
        style
    }

    pub fn list_number() -> Self {
        Self::derived("ListNumber", "List Number", 99)
    }

    pub fn list_bullet() -> Self {
        Self::derived("ListBullet", "List Bullet", 99)
    }

    pub fn no_spacing() -> Self {
        let mut style = Self::new("NoSpacing", "No Spacing", StyleKind::Paragraph);
        style.priority = Some(1);
        style.quick_format = true;
        style.spacing = Some((0, 0));
        style
    }

    pub fn quote() -> Self {
        let mut style = Self::derived("Quote", "Quote", 29);
        style.next = Some("Normal".to_string());
        style.quick_format = true;
        style.italic = true;
        style.color = Some("404040".to_string());
        style.indent_left = Some(864);
        style.alignment = Some("center");
        style
    }

    pub fn table_grid() -> Self {
        let mut style = Self::new("TableGrid", "Table Grid", StyleKind::Table);
        style.priority = Some(39);
        style.table_borders = true;
        style
    }

    pub fn hyperlink() -> Self {
        let mut style = Self::new("Hyperlink", "Hyperlink", StyleKind::Character);
        style.priority = Some(99);
        style.color = Some("0563C1".to_string());
        style
    }

    fn has_paragraph_properties(&self) -> bool {
        self.alignment.is_some()
            || self.spacing.is_some()
            || self.indent_left.is_some()
            || self.outline_level.is_some()
    }

    fn has_run_properties(&self) -> bool {
        self.font_name.is_some()
            || self.font_size.is_some()
            || self.bold
            || self.italic
            || self.color.is_some()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            "<w:style w:type=\"{}\" w:styleId=\"{}\"",
            self.kind.as_str(),
            escape_xml(&self.id)
        )?;
        if self.is_default {
            xml.push_str(" w:default=\"1\"");
        }
        write!(xml, "><w:name w:val=\"{}\"/>", escape_xml(&self.name))?;

        if let Some(ref based_on) = self.based_on {
            write!(xml, "<w:basedOn w:val=\"{}\"/>", escape_xml(based_on))?;
        }
        if let Some(ref next) = self.next {
            write!(xml, "<w:next w:val=\"{}\"/>", escape_xml(next))?;
        }
        if let Some(priority) = self.priority {
            write!(xml, "<w:uiPriority w:val=\"{}\"/>", priority)?;
        }
        if self.quick_format {
            xml.push_str("<w:qFormat/>");
        }

        if self.kind == StyleKind::Paragraph && self.has_paragraph_properties() {
            xml.push_str("<w:pPr>");
            if let Some((before, after)) = self.spacing {
                write!(xml, "<w:spacing w:before=\"{}\" w:after=\"{}\"/>", before, after)?;
            }
            if let Some(left) = self.indent_left {
                write!(xml, "<w:ind w:left=\"{}\" w:right=\"{}\"/>", left, left)?;
            }
            if let Some(alignment) = self.alignment {
                write!(xml, "<w:jc w:val=\"{}\"/>", alignment)?;
            }
            if let Some(level) = self.outline_level {
                write!(xml, "<w:outlineLvl w:val=\"{}\"/>", level)?;
            }
            xml.push_str("</w:pPr>");
        }

        if self.has_run_properties() {
            xml.push_str("<w:rPr>");
            if let Some(ref font) = self.font_name {
                let font = escape_xml(font);
                write!(
                    xml,
                    "<w:rFonts w:ascii=\"{}\" w:hAnsi=\"{}\" w:cs=\"{}\"/>",
                    font, font, font
                )?;
            }
            if self.bold {
                xml.push_str("<w:b/>");
            }
            if self.italic {
                xml.push_str("<w:i/>");
            }
            if let Some(ref color) = self.color {
                write!(xml, "<w:color w:val=\"{}\"/>", escape_xml(color))?;
            }
            if let Some(size) = self.font_size {
                write!(xml, "<w:sz w:val=\"{}\"/><w:szCs w:val=\"{}\"/>", size, size)?;
            }
            if self.kind == StyleKind::Character && self.id == "Hyperlink" {
                xml.push_str("<w:u w:val=\"single\"/>");
            }
            xml.push_str("</w:rPr>");
        }

        if self.table_borders {
            xml.push_str("<w:tblPr><w:tblBorders>");
            for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
                write!(
                    xml,
                    "<w:{} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                    side
                )?;
            }
            xml.push_str("</w:tblBorders></w:tblPr>");
        }

        xml.push_str("</w:style>");
        Ok(())
    }
}

/// Style ID of a heading level, e.g. `Heading2`.
pub fn heading_style_id(level: u8) -> String {
    format!("Heading{}", level)
}

/// Every style the converter refers to.
pub fn default_styles() -> Vec<Style> {
    let mut styles = vec![Style::normal(), Style::title()];
    styles.extend((1..=9).map(Style::heading));
    styles.extend([
        Style::list_number(),
        Style::list_bullet(),
        Style::no_spacing(),
        Style::quote(),
        Style::table_grid(),
        Style::hyperlink(),
    ]);
    styles
}

/// Generate `word/styles.xml` from a list of styles.
pub fn generate_styles_xml(styles: &[Style]) -> Result<String> {
    let mut xml = String::with_capacity(1024 + styles.len() * 384);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
    xml.push_str("<w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">");
    xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    xml.push_str("<w:rFonts w:ascii=\"Calibri\" w:eastAsia=\"Calibri\" w:hAnsi=\"Calibri\" w:cs=\"Calibri\"/>");
    xml.push_str("<w:sz w:val=\"22\"/><w:szCs w:val=\"22\"/>");
    xml.push_str("</w:rPr></w:rPrDefault>");
    xml.push_str("<w:pPrDefault><w:pPr><w:spacing w:after=\"160\" w:line=\"259\" w:lineRule=\"auto\"/></w:pPr></w:pPrDefault>");
    xml.push_str("</w:docDefaults>");

    for style in styles {
        style.to_xml(&mut xml)?;
    }

    xml.push_str("</w:styles>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_of(style: &Style) -> String {
        let mut xml = String::new();
        style.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_default_styles_cover_converter_ids() {
        let styles = default_styles();
        for id in [
            "Normal",
            "Title",
            "Heading1",
            "Heading6",
            "Heading9",
            "ListNumber",
            "ListBullet",
            "NoSpacing",
            "Quote",
            "TableGrid",
        ] {
            assert!(styles.iter().any(|s| s.id == id), "missing {}", id);
        }
        assert_eq!(styles.iter().filter(|s| s.is_default).count(), 1);
    }

    #[test]
    fn test_heading_style() {
        let xml = xml_of(&Style::heading(2));
        assert!(xml.starts_with("<w:style w:type=\"paragraph\" w:styleId=\"Heading2\">"));
        assert!(xml.contains("<w:name w:val=\"heading 2\"/><w:basedOn w:val=\"Normal\"/>"));
        assert!(xml.contains("<w:outlineLvl w:val=\"1\"/>"));
        assert!(xml.contains("<w:sz w:val=\"26\"/>"));
        assert!(!xml.contains("<w:i/>"));
        assert!(xml_of(&Style::heading(5)).contains("<w:i/>"));
    }

    #[test]
    fn test_table_and_character_styles() {
        let grid = xml_of(&Style::table_grid());
        assert!(grid.contains("w:type=\"table\""));
        assert!(grid.contains("<w:insideV w:val=\"single\""));
        assert!(!grid.contains("<w:pPr>"));

        let link = xml_of(&Style::hyperlink());
        assert!(link.contains("<w:color w:val=\"0563C1\"/>"));
        assert!(link.contains("<w:u w:val=\"single\"/>"));
    }

    #[test]
    fn test_styles_xml() {
        let xml = generate_styles_xml(&default_styles()).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<w:docDefaults>"));
        assert!(xml.ends_with("</w:styles>"));
        assert_eq!(xml.matches("<w:style ").count(), default_styles().len());
    }
}
