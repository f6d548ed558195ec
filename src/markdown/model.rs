//! Block and inline model of a parsed Markdown document.
//!
//! The model keeps only what the DOCX writer needs: formatting spans, formula
//! sources and the block structure.

/// Inline content of a paragraph, heading or table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    /// Inline code span
    Code(String),
    /// `$…$` or `$$…$$` formula source, without delimiters
    Math { source: String, display: bool },
    Link { url: String, content: Vec<Inline> },
    SoftBreak,
    LineBreak,
    /// Raw inline HTML, kept as literal text
    Html(String),
}

/// Cell of a table: inline content.
pub type TableCell = Vec<Inline>;

/// Block-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, inlines: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// A paragraph made only of one display formula
    MathBlock(String),
    List {
        ordered: bool,
        start: usize,
        items: Vec<Vec<Block>>,
    },
    CodeBlock { info: String, literal: String },
    ThematicBreak,
    Table {
        header: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
    },
    BlockQuote(Vec<Block>),
    Html(String),
}

impl Inline {
    /// Whether this inline renders as nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::SoftBreak | Inline::LineBreak => true,
            _ => false,
        }
    }
}

/// Flatten inline content to text. Formulas keep their `$` delimiters.
pub fn inline_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_inline_text(inlines, &mut out);
    out
}

fn push_inline_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) | Inline::Html(text) => out.push_str(text),
            Inline::Strong(children)
            | Inline::Emphasis(children)
            | Inline::Strikethrough(children)
            | Inline::Link {
                content: children, ..
            } => push_inline_text(children, out),
            Inline::Math { source, display } => {
                let delimiter = if *display { "$$" } else { "$" };
                out.push_str(delimiter);
                out.push_str(source);
                out.push_str(delimiter);
            },
            Inline::SoftBreak => out.push(' '),
            Inline::LineBreak => out.push('\n'),
        }
    }
}

impl Block {
    /// Text content of the block, blocks separated by newlines.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { inlines, .. } | Block::Paragraph(inlines) => inline_text(inlines),
            Block::MathBlock(source) => source.clone(),
            Block::List { items, .. } => items
                .iter()
                .flat_map(|item| item.iter().map(Block::plain_text))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::CodeBlock { literal, .. } => literal.clone(),
            Block::ThematicBreak => String::new(),
            Block::Table { header, rows } => std::iter::once(header)
                .chain(rows.iter())
                .map(|row| row.iter().map(|cell| inline_text(cell)).collect::<Vec<_>>().join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::BlockQuote(blocks) => blocks
                .iter()
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Html(html) => html.clone(),
        }
    }
}
