//! Text runs for DOCX paragraphs.
use super::error::Result;
use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// A run of text sharing one set of character properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub(crate) text: String,
    pub(crate) properties: RunProperties,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: RunProperties::default(),
        }
    }

    /// Get the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Make the text bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.properties.bold = bold;
        self
    }

    /// Make the text italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        self.properties.italic = italic;
        self
    }

    /// Strike the text through.
    pub fn strike(&mut self, strike: bool) -> &mut Self {
        self.properties.strike = strike;
        self
    }

    /// Single underline.
    pub fn underline(&mut self, underline: bool) -> &mut Self {
        self.properties.underline = underline;
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn font_size(&mut self, size: u32) -> &mut Self {
        self.properties.font_size = Some(size);
        self
    }

    /// Set font name.
    pub fn font_name(&mut self, name: &str) -> &mut Self {
        self.properties.font_name = Some(name.to_string());
        self
    }

    /// Set text color using hex RGB (e.g., "0563C1").
    pub fn color(&mut self, color: &str) -> &mut Self {
        self.properties.color = Some(color.to_string());
        self
    }

    /// Add a line break after the text.
    pub fn add_break(&mut self) -> &mut Self {
        self.properties.has_break = true;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.properties.bold
    }

    pub fn is_italic(&self) -> bool {
        self.properties.italic
    }

    pub fn is_strike(&self) -> bool {
        self.properties.strike
    }

    pub fn has_break(&self) -> bool {
        self.properties.has_break
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");

        if self.properties.has_properties() {
            xml.push_str("<w:rPr>");

            if let Some(ref font_name) = self.properties.font_name {
                let font_name = escape_xml(font_name);
                write!(
                    xml,
                    "<w:rFonts w:ascii=\"{}\" w:hAnsi=\"{}\" w:cs=\"{}\"/>",
                    font_name, font_name, font_name
                )?;
            }
            if self.properties.bold {
                xml.push_str("<w:b/>");
            }
            if self.properties.italic {
                xml.push_str("<w:i/>");
            }
            if self.properties.strike {
                xml.push_str("<w:strike/>");
            }
            if let Some(ref color) = self.properties.color {
                write!(xml, "<w:color w:val=\"{}\"/>", escape_xml(color))?;
            }
            if let Some(size) = self.properties.font_size {
                write!(xml, "<w:sz w:val=\"{}\"/><w:szCs w:val=\"{}\"/>", size, size)?;
            }
            if self.properties.underline {
                xml.push_str("<w:u w:val=\"single\"/>");
            }

            xml.push_str("</w:rPr>");
        }

        if !self.text.is_empty() {
            write!(
                xml,
                "<w:t xml:space=\"preserve\">{}</w:t>",
                escape_xml(&self.text)
            )?;
        }

        if self.properties.has_break {
            xml.push_str("<w:br/>");
        }

        xml.push_str("</w:r>");
        Ok(())
    }
}

/// Run properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RunProperties {
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) strike: bool,
    pub(crate) underline: bool,
    pub(crate) font_size: Option<u32>,
    pub(crate) font_name: Option<String>,
    pub(crate) color: Option<String>,
    pub(crate) has_break: bool,
}

impl RunProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.bold
            || self.italic
            || self.strike
            || self.underline
            || self.font_size.is_some()
            || self.font_name.is_some()
            || self.color.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_of(run: &Run) -> String {
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_plain_run() {
        assert_eq!(
            xml_of(&Run::new("a < b")),
            "<w:r><w:t xml:space=\"preserve\">a &lt; b</w:t></w:r>"
        );
    }

    #[test]
    fn test_formatted_run() {
        let mut run = Run::new("code");
        run.bold(true).italic(true).strike(true).font_name("Courier New").font_size(20);
        let xml = xml_of(&run);
        assert!(xml.contains("<w:b/><w:i/><w:strike/>"));
        assert!(xml.contains("w:ascii=\"Courier New\""));
        assert!(xml.contains("<w:sz w:val=\"20\"/>"));
    }

    #[test]
    fn test_break_only_run() {
        let mut run = Run::new("");
        run.add_break();
        assert_eq!(xml_of(&run), "<w:r><w:br/></w:r>");
        assert!(run.has_break());
    }
}
