// OMML serialization
//
// Writes the `m:` prefixed markup that is embedded in WordprocessingML
// paragraphs. The namespace is declared by the enclosing document part, except
// for `to_xml_standalone`.

use super::node::{OmmlNode, OmmlRun, RadicalDegree};
use crate::common::xml::escape_xml;

/// OMML namespace URI
pub const OMML_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";

impl OmmlNode {
    /// Serialize to an OMML fragment using the `m:` prefix.
    ///
    /// # Example
    /// ```
    /// use mathdocx::formula::omml::{OmmlNode, RunStyle};
    ///
    /// let node = OmmlNode::Math(vec![OmmlNode::run("x", RunStyle::Italic)]);
    /// assert_eq!(
    ///     node.to_xml(),
    ///     r#"<m:oMath><m:r><m:rPr><m:sty m:val="i"/></m:rPr><m:t>x</m:t></m:r></m:oMath>"#
    /// );
    /// ```
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256);
        self.write_xml(&mut xml);
        xml
    }

    /// Serialize with the `xmlns:m` declaration on the root element.
    pub fn to_xml_standalone(&self) -> String {
        let body = self.to_xml();
        // Every serialized node starts with `<m:name`; splice the declaration after it
        match body.find(['>', '/', ' ']) {
            Some(pos) => {
                let mut xml = String::with_capacity(body.len() + 80);
                xml.push_str(&body[..pos]);
                xml.push_str(" xmlns:m=\"");
                xml.push_str(OMML_NAMESPACE);
                xml.push('"');
                xml.push_str(&body[pos..]);
                xml
            },
            None => body,
        }
    }

    /// Append this node's markup to `xml`.
    pub fn write_xml(&self, xml: &mut String) {
        match self {
            OmmlNode::Math(children) => {
                xml.push_str("<m:oMath>");
                write_all(children, xml);
                xml.push_str("</m:oMath>");
            },
            OmmlNode::Run(run) => write_run(run, xml),
            OmmlNode::Fraction {
                numerator,
                denominator,
            } => {
                xml.push_str("<m:f>");
                write_slot("m:num", numerator, xml);
                write_slot("m:den", denominator, xml);
                xml.push_str("</m:f>");
            },
            OmmlNode::Superscript { base, superscript } => {
                xml.push_str("<m:sSup>");
                write_slot("m:e", base, xml);
                write_slot("m:sup", superscript, xml);
                xml.push_str("</m:sSup>");
            },
            OmmlNode::Subscript { base, subscript } => {
                xml.push_str("<m:sSub>");
                write_slot("m:e", base, xml);
                write_slot("m:sub", subscript, xml);
                xml.push_str("</m:sSub>");
            },
            OmmlNode::SubSup {
                base,
                subscript,
                superscript,
            } => {
                xml.push_str("<m:sSubSup>");
                write_slot("m:e", base, xml);
                write_slot("m:sub", subscript, xml);
                write_slot("m:sup", superscript, xml);
                xml.push_str("</m:sSubSup>");
            },
            OmmlNode::Radical { degree, radicand } => {
                xml.push_str("<m:rad>");
                match degree {
                    RadicalDegree::Hidden => {
                        xml.push_str("<m:radPr><m:degHide m:val=\"1\"/></m:radPr><m:deg/>");
                    },
                    RadicalDegree::Shown(degree) => write_slot("m:deg", degree, xml),
                }
                write_slot("m:e", radicand, xml);
                xml.push_str("</m:rad>");
            },
            OmmlNode::Function { name, base } => {
                xml.push_str("<m:func>");
                write_slot("m:fName", name, xml);
                write_slot("m:e", base, xml);
                xml.push_str("</m:func>");
            },
            OmmlNode::Accent { base, character } => {
                xml.push_str("<m:acc>");
                if let Some(chr) = character {
                    xml.push_str("<m:accPr><m:chr m:val=\"");
                    xml.push_str(&escape_xml(chr));
                    xml.push_str("\"/></m:accPr>");
                }
                write_slot("m:e", base, xml);
                xml.push_str("</m:acc>");
            },
            OmmlNode::StackedLimit { base, lower, upper } => {
                xml.push_str("<m:limUpp><m:e><m:limLow>");
                write_slot("m:e", base, xml);
                write_slot("m:lim", lower, xml);
                xml.push_str("</m:limLow></m:e>");
                write_slot("m:lim", upper, xml);
                xml.push_str("</m:limUpp>");
            },
            OmmlNode::Delimited {
                open,
                close,
                content,
            } => {
                xml.push_str("<m:d><m:dPr><m:begChr m:val=\"");
                xml.push_str(&escape_xml(open));
                xml.push_str("\"/><m:endChr m:val=\"");
                xml.push_str(&escape_xml(close));
                xml.push_str("\"/></m:dPr>");
                write_slot("m:e", content, xml);
                xml.push_str("</m:d>");
            },
            OmmlNode::Matrix { rows } => {
                xml.push_str("<m:m>");
                for row in rows {
                    xml.push_str("<m:mr>");
                    for cell in row {
                        write_slot("m:e", cell, xml);
                    }
                    xml.push_str("</m:mr>");
                }
                xml.push_str("</m:m>");
            },
        }
    }
}

fn write_all(nodes: &[OmmlNode], xml: &mut String) {
    for node in nodes {
        node.write_xml(xml);
    }
}

/// Write a named slot, self-closing when it has no content.
fn write_slot(tag: &str, content: &[OmmlNode], xml: &mut String) {
    xml.push('<');
    xml.push_str(tag);
    if content.is_empty() {
        xml.push_str("/>");
        return;
    }
    xml.push('>');
    write_all(content, xml);
    xml.push_str("</");
    xml.push_str(tag);
    xml.push('>');
}

fn write_run(run: &OmmlRun, xml: &mut String) {
    xml.push_str("<m:r><m:rPr><m:sty m:val=\"");
    xml.push_str(run.style.as_str());
    xml.push_str("\"/></m:rPr>");
    if run.preserve_space {
        xml.push_str("<m:t xml:space=\"preserve\">");
    } else {
        xml.push_str("<m:t>");
    }
    xml.push_str(&escape_xml(&run.text));
    xml.push_str("</m:t></m:r>");
}
