// MathML node definitions

use std::collections::BTreeMap;

/// MathML element kinds understood by the OMML transducer.
///
/// The set is closed: every local name that is not listed in the lookup
/// table becomes [`MathKind::Unknown`], which keeps the original name for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MathKind {
    /// `mn`
    Number,
    /// `mi`
    Identifier,
    /// `mo`
    Operator,
    /// `mtext`
    Text,
    /// `mspace`
    Space,
    /// `mfrac`
    Fraction,
    /// `msup`
    Superscript,
    /// `msub`
    Subscript,
    /// `msubsup`
    SubSup,
    /// `msqrt`
    Sqrt,
    /// `mroot`
    Root,
    /// `munder`
    Under,
    /// `mover`
    Over,
    /// `munderover`
    UnderOver,
    /// `mfenced`
    Fenced,
    /// `mtable`
    Table,
    /// `mtr`
    TableRow,
    /// `mtd`
    TableCell,
    /// `mrow`
    Row,
    /// `math`
    Math,
    /// Any other element, by local name
    Unknown(Box<str>),
}

impl MathKind {
    /// Resolve a local element name (no namespace prefix) to a kind.
    pub fn from_local_name(name: &str) -> Self {
        super::lookup::ELEMENT_KINDS
            .get(name)
            .cloned()
            .unwrap_or_else(|| MathKind::Unknown(name.into()))
    }

    /// Token elements carry literal text; everything else is structural.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            MathKind::Number
                | MathKind::Identifier
                | MathKind::Operator
                | MathKind::Text
                | MathKind::Space
        )
    }

    /// The canonical MathML element name for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            MathKind::Number => "mn",
            MathKind::Identifier => "mi",
            MathKind::Operator => "mo",
            MathKind::Text => "mtext",
            MathKind::Space => "mspace",
            MathKind::Fraction => "mfrac",
            MathKind::Superscript => "msup",
            MathKind::Subscript => "msub",
            MathKind::SubSup => "msubsup",
            MathKind::Sqrt => "msqrt",
            MathKind::Root => "mroot",
            MathKind::Under => "munder",
            MathKind::Over => "mover",
            MathKind::UnderOver => "munderover",
            MathKind::Fenced => "mfenced",
            MathKind::Table => "mtable",
            MathKind::TableRow => "mtr",
            MathKind::TableCell => "mtd",
            MathKind::Row => "mrow",
            MathKind::Math => "math",
            MathKind::Unknown(name) => name,
        }
    }
}

/// A node of a parsed MathML tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MathNode {
    pub kind: MathKind,
    /// Attributes by local name
    pub attributes: BTreeMap<String, String>,
    /// Literal content, only recorded for leaf kinds
    pub text: Option<String>,
    pub children: Vec<MathNode>,
}

impl MathNode {
    /// Create an empty node of the given kind.
    pub fn new(kind: MathKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf node with literal text.
    pub fn leaf(kind: MathKind, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(kind)
        }
    }

    /// Create a structural node with the given children.
    pub fn with_children(kind: MathKind, children: Vec<MathNode>) -> Self {
        Self {
            children,
            ..Self::new(kind)
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute by local name.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Literal text, or the empty string when absent.
    #[inline]
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MathNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(MathKind::from_local_name("mi"), MathKind::Identifier);
        assert_eq!(MathKind::from_local_name("munderover"), MathKind::UnderOver);
        assert_eq!(
            MathKind::from_local_name("mpadded"),
            MathKind::Unknown("mpadded".into())
        );
        assert_eq!(MathKind::from_local_name("mpadded").as_str(), "mpadded");
    }

    #[test]
    fn test_leaf_kinds() {
        assert!(MathKind::Number.is_leaf());
        assert!(MathKind::Space.is_leaf());
        assert!(!MathKind::Row.is_leaf());
        assert!(!MathKind::Unknown("ms".into()).is_leaf());
    }

    #[test]
    fn test_node_builders() {
        let node = MathNode::with_children(
            MathKind::Fenced,
            vec![MathNode::leaf(MathKind::Identifier, "x")],
        )
        .with_attribute("open", "[");
        assert_eq!(node.attribute("open"), Some("["));
        assert_eq!(node.attribute("close"), None);
        assert_eq!(node.node_count(), 2);
        assert_eq!(MathNode::new(MathKind::Number).text_or_empty(), "");
    }
}
