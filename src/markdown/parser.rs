//! Markdown parsing with comrak.
//!
//! Pipeline: Markdown string → comrak AST → owned `Block`/`Inline` model.
//! GFM tables and strikethrough are enabled, and `$…$` / `$$…$$` are read as
//! formulas.

use super::model::{Block, Inline, TableCell};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, ComrakOptions, parse_document};

/// Parse Markdown source into blocks.
///
/// # Example
/// ```
/// use mathdocx::markdown::{Block, Inline, parse};
///
/// let blocks = parse("Euler: $e^{i\\pi}+1=0$");
/// assert!(matches!(
///     &blocks[0],
///     Block::Paragraph(inlines) if matches!(inlines[1], Inline::Math { display: false, .. })
/// ));
/// ```
pub fn parse(source: &str) -> Vec<Block> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);
    collect_blocks(root)
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.math_dollars = true;
    options
}

fn collect_blocks<'a>(parent: &'a AstNode<'a>) -> Vec<Block> {
    let mut blocks = Vec::new();
    for child in parent.children() {
        push_block(child, &mut blocks);
    }
    blocks
}

fn push_block<'a>(node: &'a AstNode<'a>, blocks: &mut Vec<Block>) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Heading(heading) => {
            blocks.push(Block::Heading {
                level: heading.level,
                inlines: collect_inlines(node),
            });
        },

        NodeValue::Paragraph => {
            let inlines = collect_inlines(node);
            match display_math_only(&inlines) {
                Some(formulas) => blocks.extend(formulas.into_iter().map(Block::MathBlock)),
                None => blocks.push(Block::Paragraph(inlines)),
            }
        },

        NodeValue::List(list) => {
            let items = node.children().map(collect_blocks).collect();
            blocks.push(Block::List {
                ordered: matches!(list.list_type, ListType::Ordered),
                start: list.start,
                items,
            });
        },

        NodeValue::CodeBlock(code_block) => {
            blocks.push(Block::CodeBlock {
                info: code_block.info.clone(),
                literal: code_block.literal.clone(),
            });
        },

        NodeValue::ThematicBreak => blocks.push(Block::ThematicBreak),

        NodeValue::Table(_) => blocks.push(collect_table(node)),

        NodeValue::BlockQuote => blocks.push(Block::BlockQuote(collect_blocks(node))),

        NodeValue::HtmlBlock(html) => blocks.push(Block::Html(html.literal.clone())),

        NodeValue::FrontMatter(_) => {},

        _ => {
            // Containers without a dedicated block: keep their content
            for child in node.children() {
                push_block(child, blocks);
            }
        },
    }
}

/// Sources of the display formulas when a paragraph holds nothing else.
fn display_math_only(inlines: &[Inline]) -> Option<Vec<String>> {
    let mut formulas = Vec::new();
    for inline in inlines {
        match inline {
            Inline::Math {
                source,
                display: true,
            } => formulas.push(source.trim().to_string()),
            other if other.is_blank() => {},
            _ => return None,
        }
    }
    if formulas.is_empty() {
        None
    } else {
        Some(formulas)
    }
}

fn collect_table<'a>(table: &'a AstNode<'a>) -> Block {
    let mut header = Vec::new();
    let mut rows = Vec::new();

    for row in table.children() {
        let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cells: Vec<TableCell> = row.children().map(collect_inlines).collect();
        if is_header && header.is_empty() {
            header = cells;
        } else {
            rows.push(cells);
        }
    }

    Block::Table { header, rows }
}

fn collect_inlines<'a>(parent: &'a AstNode<'a>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in parent.children() {
        push_inline(child, &mut inlines);
    }
    inlines
}

fn push_inline<'a>(node: &'a AstNode<'a>, inlines: &mut Vec<Inline>) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Text(text) => push_text(inlines, text),
        NodeValue::Strong => inlines.push(Inline::Strong(collect_inlines(node))),
        NodeValue::Emph => inlines.push(Inline::Emphasis(collect_inlines(node))),
        NodeValue::Strikethrough => inlines.push(Inline::Strikethrough(collect_inlines(node))),
        NodeValue::Code(code) => inlines.push(Inline::Code(code.literal.clone())),
        NodeValue::Math(math) => inlines.push(Inline::Math {
            source: math.literal.clone(),
            display: math.display_math,
        }),
        NodeValue::Link(link) | NodeValue::Image(link) => inlines.push(Inline::Link {
            url: link.url.clone(),
            content: collect_inlines(node),
        }),
        NodeValue::SoftBreak => inlines.push(Inline::SoftBreak),
        NodeValue::LineBreak => inlines.push(Inline::LineBreak),
        NodeValue::HtmlInline(html) => inlines.push(Inline::Html(html.clone())),
        _ => {
            for child in node.children() {
                push_inline(child, inlines);
            }
        },
    }
}

/// Append text, merging with a preceding text node.
fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Text(previous)) = inlines.last_mut() {
        previous.push_str(text);
    } else {
        inlines.push(Inline::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_heading_and_paragraph() {
        let blocks = parse("# Title\n\nSome **bold** and *italic* ~~gone~~.\n");
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 1,
                inlines: vec![text("Title")],
            }
        );
        assert_eq!(
            blocks[1],
            Block::Paragraph(vec![
                text("Some "),
                Inline::Strong(vec![text("bold")]),
                text(" and "),
                Inline::Emphasis(vec![text("italic")]),
                text(" "),
                Inline::Strikethrough(vec![text("gone")]),
                text("."),
            ])
        );
    }

    #[test]
    fn test_inline_math() {
        let blocks = parse("Area is $\\pi r^2$ here.");
        assert_eq!(
            blocks[0],
            Block::Paragraph(vec![
                text("Area is "),
                Inline::Math {
                    source: "\\pi r^2".into(),
                    display: false,
                },
                text(" here."),
            ])
        );
    }

    #[test]
    fn test_display_math_paragraph_becomes_block() {
        let blocks = parse("Before\n\n$$\\int_0^1 x\\,dx$$\n\nAfter\n");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], Block::MathBlock("\\int_0^1 x\\,dx".into()));
    }

    #[test]
    fn test_display_math_with_text_stays_inline() {
        let blocks = parse("See $$x$$ inline");
        assert!(matches!(&blocks[0], Block::Paragraph(inlines) if inlines.len() == 3));
    }

    #[test]
    fn test_lists() {
        let blocks = parse("3. three\n4. four\n   - nested\n\n* bullet\n");
        match &blocks[0] {
            Block::List {
                ordered,
                start,
                items,
            } => {
                assert!(*ordered);
                assert_eq!(*start, 3);
                assert_eq!(items.len(), 2);
                assert!(matches!(
                    &items[1][1],
                    Block::List { ordered: false, .. }
                ));
            },
            other => panic!("expected list, got {:?}", other),
        }
        assert!(matches!(&blocks[1], Block::List { ordered: false, .. }));
    }

    #[test]
    fn test_code_block_and_rule() {
        let blocks = parse("```rust\nfn main() {}\n```\n\n---\n");
        assert_eq!(
            blocks[0],
            Block::CodeBlock {
                info: "rust".into(),
                literal: "fn main() {}\n".into(),
            }
        );
        assert_eq!(blocks[1], Block::ThematicBreak);
    }

    #[test]
    fn test_table() {
        let blocks = parse("| a | b |\n|---|---|\n| 1 | $x$ |\n| 2 | 3 |\n");
        match &blocks[0] {
            Block::Table { header, rows } => {
                assert_eq!(header, &vec![vec![text("a")], vec![text("b")]]);
                assert_eq!(rows.len(), 2);
                assert!(matches!(rows[0][1][0], Inline::Math { .. }));
            },
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_blockquote_and_link() {
        let blocks = parse("> quoted [link](http://example.com)\n");
        match &blocks[0] {
            Block::BlockQuote(inner) => match &inner[0] {
                Block::Paragraph(inlines) => {
                    assert_eq!(inlines[0], text("quoted "));
                    assert_eq!(
                        inlines[1],
                        Inline::Link {
                            url: "http://example.com".into(),
                            content: vec![text("link")],
                        }
                    );
                },
                other => panic!("expected paragraph, got {:?}", other),
            },
            other => panic!("expected quote, got {:?}", other),
        }
    }

    #[test]
    fn test_breaks() {
        let blocks = parse("line one\nline two  \nline three");
        match &blocks[0] {
            Block::Paragraph(inlines) => {
                assert!(inlines.contains(&Inline::SoftBreak));
                assert!(inlines.contains(&Inline::LineBreak));
            },
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }
}
