// MathML to OMML tree rewrite
//
// A single post-order visitor walks the MathML tree and appends the produced
// OMML nodes to the slot of the enclosing structure. Missing children leave an
// empty slot behind, unknown elements are walked through transparently.

use super::node::{OmmlNode, OmmlRun, RadicalDegree, RunStyle};
use crate::formula::mathml::{MathKind, MathNode};

/// Default delimiters for `mfenced` without `open`/`close` attributes
const DEFAULT_OPEN: &str = "(";
const DEFAULT_CLOSE: &str = ")";

/// Rewrite a MathML tree into an OMML tree.
///
/// The result is always an [`OmmlNode::Math`]. The rewrite never fails:
/// structurally incomplete elements produce empty slots and unrecognized
/// elements are replaced by their converted children.
///
/// # Example
/// ```
/// use mathdocx::formula::mathml::parse;
/// use mathdocx::formula::omml::{OmmlNode, transduce};
///
/// let tree = parse("<math><mfrac><mn>1</mn><mn>2</mn></mfrac></math>").unwrap();
/// let omml = transduce(&tree);
/// assert!(matches!(omml.children()[0], OmmlNode::Fraction { .. }));
/// ```
pub fn transduce(root: &MathNode) -> OmmlNode {
    let mut content = Vec::new();
    visit(root, &mut content);
    OmmlNode::Math(content)
}

fn visit(node: &MathNode, out: &mut Vec<OmmlNode>) {
    match &node.kind {
        MathKind::Number | MathKind::Operator | MathKind::Text => {
            out.push(leaf_run(node.text_or_empty(), RunStyle::Plain));
        },
        MathKind::Identifier => {
            out.push(leaf_run(node.text_or_empty(), RunStyle::Italic));
        },
        MathKind::Space => {
            out.push(leaf_run(" ", RunStyle::Plain));
        },
        MathKind::Fraction => {
            out.push(OmmlNode::Fraction {
                numerator: slot(node, 0),
                denominator: slot(node, 1),
            });
        },
        MathKind::Superscript => {
            out.push(OmmlNode::Superscript {
                base: slot(node, 0),
                superscript: slot(node, 1),
            });
        },
        MathKind::Subscript => {
            out.push(OmmlNode::Subscript {
                base: slot(node, 0),
                subscript: slot(node, 1),
            });
        },
        MathKind::SubSup => {
            out.push(OmmlNode::SubSup {
                base: slot(node, 0),
                subscript: slot(node, 1),
                superscript: slot(node, 2),
            });
        },
        MathKind::Sqrt => {
            out.push(OmmlNode::Radical {
                degree: RadicalDegree::Hidden,
                radicand: all_children(node),
            });
        },
        MathKind::Root => {
            // MathML order is (radicand, index)
            out.push(OmmlNode::Radical {
                degree: RadicalDegree::Shown(slot(node, 1)),
                radicand: slot(node, 0),
            });
        },
        MathKind::Under => {
            // Mapped onto a limit function whatever the base actually is
            out.push(OmmlNode::Function {
                name: slot(node, 0),
                base: slot(node, 1),
            });
        },
        MathKind::Over => {
            let character = node
                .children
                .get(1)
                .and_then(|accent| accent.text.as_deref())
                .filter(|text| !text.is_empty())
                .map(str::to_string);
            out.push(OmmlNode::Accent {
                base: slot(node, 0),
                character,
            });
        },
        MathKind::UnderOver if node.children.len() >= 3 => {
            out.push(OmmlNode::StackedLimit {
                base: slot(node, 0),
                lower: slot(node, 1),
                upper: slot(node, 2),
            });
        },
        MathKind::UnderOver => {
            // Too few children: flatten into the parent slot
            for child in &node.children {
                visit(child, out);
            }
        },
        MathKind::Fenced => {
            out.push(OmmlNode::Delimited {
                open: node.attribute("open").unwrap_or(DEFAULT_OPEN).to_string(),
                close: node.attribute("close").unwrap_or(DEFAULT_CLOSE).to_string(),
                content: all_children(node),
            });
        },
        MathKind::Table => {
            out.push(matrix(node));
        },
        MathKind::Row | MathKind::Math | MathKind::TableRow | MathKind::TableCell => {
            for child in &node.children {
                visit(child, out);
            }
        },
        MathKind::Unknown(_) => {
            for child in &node.children {
                visit(child, out);
            }
        },
    }
}

#[inline]
fn leaf_run(text: &str, style: RunStyle) -> OmmlNode {
    OmmlNode::Run(OmmlRun::new(text, style))
}

/// Convert the child at `index` into its own slot, empty when absent.
fn slot(node: &MathNode, index: usize) -> Vec<OmmlNode> {
    let mut content = Vec::new();
    if let Some(child) = node.children.get(index) {
        visit(child, &mut content);
    }
    content
}

/// Convert every child into one shared slot.
fn all_children(node: &MathNode) -> Vec<OmmlNode> {
    let mut content = Vec::with_capacity(node.children.len());
    for child in &node.children {
        visit(child, &mut content);
    }
    content
}

fn matrix(table: &MathNode) -> OmmlNode {
    let rows = table
        .children
        .iter()
        .filter(|row| row.kind == MathKind::TableRow)
        .map(|row| {
            row.children
                .iter()
                .filter(|cell| cell.kind == MathKind::TableCell)
                .map(all_children)
                .collect()
        })
        .collect();
    OmmlNode::Matrix { rows }
}
