use super::error::{MathmlError, Result};
use super::node::{MathKind, MathNode};
use crate::common::xml::{resolve_entity, unescape_xml};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Default nesting guard, matching what the LaTeX renderer can realistically emit
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Streaming MathML reader that builds an owned [`MathNode`] tree.
///
/// Element names are matched by local name only, so `<math>`, `<m:math>` and
/// `<mml:math xmlns:mml="...">` all produce the same tree.
#[derive(Debug, Clone, Copy)]
pub struct MathmlParser {
    max_depth: usize,
}

impl Default for MathmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MathmlParser {
    /// Create a parser with the default depth limit.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the element nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse MathML markup into a tree.
    ///
    /// # Example
    /// ```
    /// use mathdocx::formula::mathml::{MathKind, MathmlParser};
    ///
    /// let root = MathmlParser::new()
    ///     .parse(r#"<math><mi>x</mi><mo>=</mo><mn>2</mn></math>"#)
    ///     .unwrap();
    /// assert_eq!(root.kind, MathKind::Math);
    /// assert_eq!(root.children.len(), 3);
    /// ```
    pub fn parse(&self, xml: &str) -> Result<MathNode> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::with_capacity(256);

        let mut stack: Vec<MathNode> = Vec::with_capacity(32);
        let mut root: Option<MathNode> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let node = self.open_element(e, &stack, root.is_some())?;
                    stack.push(node);
                },
                Ok(Event::Empty(ref e)) => {
                    let node = self.open_element(e, &stack, root.is_some())?;
                    close_element(node, &mut stack, &mut root);
                },
                Ok(Event::End(ref e)) => {
                    let node = stack.pop().ok_or_else(|| {
                        MathmlError::UnbalancedElement(
                            String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                        )
                    })?;
                    close_element(node, &mut stack, &mut root);
                },
                Ok(Event::Text(ref e)) => {
                    let raw = std::str::from_utf8(e)?;
                    push_text(&mut stack, root.is_some(), &unescape_xml(raw))?;
                },
                Ok(Event::CData(ref e)) => {
                    let raw = std::str::from_utf8(e)?;
                    push_text(&mut stack, root.is_some(), raw)?;
                },
                Ok(Event::GeneralRef(ref e)) => {
                    let name = std::str::from_utf8(e)?;
                    match resolve_entity(name) {
                        Some(ch) => push_text(&mut stack, root.is_some(), ch.encode_utf8(&mut [0u8; 4]))?,
                        None => push_text(&mut stack, root.is_some(), &format!("&{};", name))?,
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(MathmlError::Xml {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    });
                },
                _ => {}, // Declarations, comments, processing instructions
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(MathmlError::UnbalancedElement(format!(
                "<{}> is never closed",
                open.kind.as_str()
            )));
        }

        root.ok_or(MathmlError::Empty)
    }

    fn open_element(
        &self,
        elem: &BytesStart,
        stack: &[MathNode],
        root_closed: bool,
    ) -> Result<MathNode> {
        let local = elem.local_name();
        let name = std::str::from_utf8(local.as_ref())?;

        if root_closed {
            return Err(MathmlError::TrailingContent(format!("<{}>", name)));
        }
        if stack.len() >= self.max_depth {
            return Err(MathmlError::DepthLimitExceeded(self.max_depth));
        }

        let mut node = MathNode::new(MathKind::from_local_name(name));
        for attr in elem.attributes().filter_map(|a| a.ok()) {
            // Namespace declarations are not attributes of the math content
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let value = unescape_xml(std::str::from_utf8(&attr.value)?);
            node.attributes.insert(key, value);
        }
        Ok(node)
    }
}

/// Parse MathML markup with the default parser settings.
pub fn parse(xml: &str) -> Result<MathNode> {
    MathmlParser::new().parse(xml)
}

fn close_element(node: MathNode, stack: &mut [MathNode], root: &mut Option<MathNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn push_text(stack: &mut [MathNode], root_closed: bool, text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(node) if node.kind.is_leaf() => {
            node.text.get_or_insert_with(String::new).push_str(text);
        },
        Some(_) => {}, // Whitespace between structural children
        None => {
            if root_closed && !text.trim().is_empty() {
                return Err(MathmlError::TrailingContent(text.trim().to_string()));
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_row() {
        let root = parse("<math><mi>x</mi><mo>+</mo><mn>1</mn></math>").unwrap();
        assert_eq!(root.kind, MathKind::Math);
        let kinds: Vec<_> = root.children.iter().map(|c| c.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![MathKind::Identifier, MathKind::Operator, MathKind::Number]
        );
        assert_eq!(root.children[0].text.as_deref(), Some("x"));
    }

    #[test]
    fn test_namespace_prefix_ignored() {
        let plain = parse("<math><mfrac><mn>1</mn><mn>2</mn></mfrac></math>").unwrap();
        let prefixed = parse(
            r#"<mml:math xmlns:mml="http://www.w3.org/1998/Math/MathML"><mml:mfrac><mml:mn>1</mml:mn><mml:mn>2</mml:mn></mml:mfrac></mml:math>"#,
        )
        .unwrap();
        let default_ns = parse(
            r#"<math xmlns="http://www.w3.org/1998/Math/MathML"><mfrac><mn>1</mn><mn>2</mn></mfrac></math>"#,
        )
        .unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain, default_ns);
    }

    #[test]
    fn test_structural_whitespace_ignored() {
        let root = parse(
            "<math>\n  <mrow>\n    <mi>a</mi>\n  </mrow>\n</math>",
        )
        .unwrap();
        assert_eq!(root.text, None);
        assert_eq!(root.children[0].text, None);
        assert_eq!(root.children[0].children[0].text.as_deref(), Some("a"));
    }

    #[test]
    fn test_leaf_whitespace_preserved() {
        let root = parse("<math><mtext> x </mtext></math>").unwrap();
        assert_eq!(root.children[0].text.as_deref(), Some(" x "));
    }

    #[test]
    fn test_entities_resolved() {
        let root = parse("<math><mo>&lt;</mo><mtext>&nbsp;a</mtext><mo>&#x2212;</mo></math>").unwrap();
        assert_eq!(root.children[0].text.as_deref(), Some("<"));
        assert_eq!(root.children[1].text.as_deref(), Some("\u{a0}a"));
        assert_eq!(root.children[2].text.as_deref(), Some("−"));
    }

    #[test]
    fn test_attributes_by_local_name() {
        let root = parse(r#"<math display="block"><mfenced open="[" close="]"><mi>x</mi></mfenced></math>"#)
            .unwrap();
        assert_eq!(root.attribute("display"), Some("block"));
        let fenced = &root.children[0];
        assert_eq!(fenced.kind, MathKind::Fenced);
        assert_eq!(fenced.attribute("open"), Some("["));
        assert_eq!(fenced.attribute("close"), Some("]"));
    }

    #[test]
    fn test_namespace_declarations_not_recorded() {
        let root = parse(r#"<math xmlns="http://www.w3.org/1998/Math/MathML"><mi>x</mi></math>"#).unwrap();
        assert!(root.attributes.is_empty());
    }

    #[test]
    fn test_empty_elements() {
        let root = parse(r#"<math><mi>a</mi><mspace width="1em"/><mi>b</mi></math>"#).unwrap();
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[1].kind, MathKind::Space);
        assert_eq!(root.children[1].text, None);
    }

    #[test]
    fn test_unknown_elements_kept() {
        let root = parse("<math><mstyle><mi>x</mi></mstyle></math>").unwrap();
        assert_eq!(root.children[0].kind, MathKind::Unknown("mstyle".into()));
        assert_eq!(root.children[0].children.len(), 1);
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse("<math><mi>x</mo></math>").is_err());
        assert!(parse("<math><mi>x</mi>").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(MathmlError::Empty)));
        assert!(matches!(parse("   \n"), Err(MathmlError::Empty)));
    }

    #[test]
    fn test_trailing_root() {
        assert!(matches!(
            parse("<math><mi>x</mi></math><math/>"),
            Err(MathmlError::TrailingContent(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut xml = String::from("<math>");
        for _ in 0..20 {
            xml.push_str("<mrow>");
        }
        for _ in 0..20 {
            xml.push_str("</mrow>");
        }
        xml.push_str("</math>");

        assert!(MathmlParser::new().parse(&xml).is_ok());
        assert!(matches!(
            MathmlParser::new().with_max_depth(10).parse(&xml),
            Err(MathmlError::DepthLimitExceeded(10))
        ));
    }
}
