//! Maps parsed Markdown blocks onto a DOCX [`Document`].
use super::error::Result;
use crate::config::ConversionOptions;
use crate::diagnostics::DiagnosticSink;
use crate::docx::{
    Document, LIST_LEVELS, ListDefinition, Paragraph, ParagraphAlignment, Run, Table,
};
use crate::formula::{FormulaConverter, FormulaMode, fallback_text};
use crate::markdown::{Block, Inline, TableCell};

const LIST_NUMBER_STYLE: &str = "ListNumber";
const LIST_BULLET_STYLE: &str = "ListBullet";
const CODE_STYLE: &str = "NoSpacing";
const QUOTE_STYLE: &str = "Quote";
const LINK_COLOR: &str = "0563C1";
const RULE_CHAR: char = '\u{2500}';

/// Counters collected while building one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub blocks: usize,
    /// Formulas written as Office Math
    pub formulas: usize,
    /// Formulas written as literal source
    pub fallbacks: usize,
    pub lists: usize,
    pub tables: usize,
}

/// Character formatting inherited by nested inlines.
#[derive(Debug, Clone, Copy, Default)]
struct Format {
    bold: bool,
    italic: bool,
    strike: bool,
    link: bool,
}

/// Writes inline content into paragraphs.
struct InlineWriter<'a> {
    options: &'a ConversionOptions,
    formulas: FormulaConverter<'a>,
    stats: ConversionStats,
}

impl<'a> InlineWriter<'a> {
    fn write(&mut self, paragraph: &mut Paragraph, inlines: &[Inline], format: Format) {
        for inline in inlines {
            match inline {
                Inline::Text(text) | Inline::Html(text) => {
                    styled_run(paragraph, text, format);
                },
                Inline::Strong(children) => {
                    self.write(paragraph, children, Format { bold: true, ..format })
                },
                Inline::Emphasis(children) => {
                    self.write(paragraph, children, Format { italic: true, ..format })
                },
                Inline::Strikethrough(children) => {
                    self.write(paragraph, children, Format { strike: true, ..format })
                },
                Inline::Link { content, .. } => {
                    self.write(paragraph, content, Format { link: true, ..format })
                },
                Inline::Code(code) => {
                    styled_run(paragraph, code, format)
                        .font_name(&self.options.code_font)
                        .font_size(self.options.code_font_size);
                },
                Inline::Math { source, .. } => self.write_math(paragraph, source, FormulaMode::Inline),
                Inline::SoftBreak | Inline::LineBreak => {
                    paragraph.add_run("").add_break();
                },
            }
        }
    }

    /// Append a formula, or its literal source when conversion fails.
    fn write_math(&mut self, paragraph: &mut Paragraph, source: &str, mode: FormulaMode) {
        match self.formulas.convert(source, mode) {
            Some(math) => {
                self.stats.formulas += 1;
                paragraph.add_math(math);
            },
            None => {
                self.stats.fallbacks += 1;
                paragraph.add_run(&fallback_text(source, mode));
            },
        }
    }
}

fn styled_run<'p>(paragraph: &'p mut Paragraph, text: &str, format: Format) -> &'p mut Run {
    let run = paragraph.add_run(text);
    run.bold(format.bold).italic(format.italic).strike(format.strike);
    if format.link {
        run.underline(true).color(LINK_COLOR);
    }
    run
}

/// Builds one document from a sequence of blocks.
pub(crate) struct DocumentBuilder<'a> {
    document: Document,
    inlines: InlineWriter<'a>,
}

impl<'a> DocumentBuilder<'a> {
    pub(crate) fn new(options: &'a ConversionOptions, sink: &'a dyn DiagnosticSink) -> Self {
        let mut document = Document::new();
        document.properties_mut().title = options.document_title.clone();
        document.properties_mut().creator = options.author.clone();

        Self {
            document,
            inlines: InlineWriter {
                options,
                formulas: FormulaConverter::new(sink),
                stats: ConversionStats::default(),
            },
        }
    }

    pub(crate) fn finish(self) -> (Document, ConversionStats) {
        (self.document, self.inlines.stats)
    }

    pub(crate) fn write_blocks(&mut self, blocks: &[Block]) -> Result<()> {
        for block in blocks {
            self.write_block(block)?;
        }
        Ok(())
    }

    fn write_block(&mut self, block: &Block) -> Result<()> {
        self.inlines.stats.blocks += 1;

        match block {
            Block::Heading { level, inlines } => {
                let paragraph = self.document.add_heading_paragraph((*level).clamp(1, 9))?;
                self.inlines.write(paragraph, inlines, Format::default());
            },

            Block::Paragraph(inlines) => {
                let paragraph = self.document.add_paragraph();
                self.inlines.write(paragraph, inlines, Format::default());
            },

            Block::MathBlock(source) => {
                let paragraph = self.document.add_paragraph();
                if self.inlines.options.center_block_math {
                    paragraph.set_alignment(ParagraphAlignment::Center);
                }
                self.inlines.write_math(paragraph, source, FormulaMode::Block);
            },

            Block::List {
                ordered,
                start,
                items,
            } => self.write_list(*ordered, *start, items, 0)?,

            Block::CodeBlock { literal, .. } => self.write_code(literal),

            Block::ThematicBreak => {
                let rule: String = std::iter::repeat_n(RULE_CHAR, self.inlines.options.rule_width)
                    .collect();
                let paragraph = self.document.add_paragraph_with_text(&rule);
                paragraph.set_alignment(ParagraphAlignment::Center);
            },

            Block::Table { header, rows } => self.write_table(header, rows),

            Block::BlockQuote(blocks) => self.write_quote(blocks)?,

            Block::Html(html) => {
                let text = html.trim_end_matches('\n');
                if !text.is_empty() {
                    self.document.add_paragraph_with_text(text);
                }
            },
        }

        Ok(())
    }

    /// Each list gets its own numbering instance; nested lists sit one level
    /// deeper.
    fn write_list(
        &mut self,
        ordered: bool,
        start: usize,
        items: &[Vec<Block>],
        level: u32,
    ) -> Result<()> {
        let start = u32::try_from(start).unwrap_or(u32::MAX);
        let num_id = self.document.numbering_mut().register(ordered, start);
        let style = if ordered {
            LIST_NUMBER_STYLE
        } else {
            LIST_BULLET_STYLE
        };
        let level = level.min(LIST_LEVELS - 1);
        self.inlines.stats.lists += 1;

        for item in items {
            let mut numbered = false;

            for block in item {
                match block {
                    Block::Paragraph(inlines) | Block::Heading { inlines, .. } => {
                        let paragraph = self.document.add_paragraph();
                        if numbered {
                            // Continuation paragraph of the same item
                            paragraph.set_indent_left(ListDefinition::indent(level));
                        } else {
                            paragraph.set_style(style);
                            paragraph.set_numbering(num_id, level);
                            numbered = true;
                        }
                        self.inlines.write(paragraph, inlines, Format::default());
                    },
                    Block::List {
                        ordered,
                        start,
                        items,
                    } => self.write_list(*ordered, *start, items, level + 1)?,
                    other => self.write_block(other)?,
                }
            }

            if !numbered && item.is_empty() {
                let paragraph = self.document.add_paragraph();
                paragraph.set_style(style);
                paragraph.set_numbering(num_id, level);
            }
        }

        Ok(())
    }

    fn write_code(&mut self, literal: &str) {
        let options = self.inlines.options;
        let paragraph = self.document.add_paragraph();
        paragraph.set_style(CODE_STYLE);

        let code = literal.strip_suffix('\n').unwrap_or(literal);
        let mut lines = code.split('\n').peekable();
        while let Some(line) = lines.next() {
            let run = paragraph.add_run(line);
            run.font_name(&options.code_font).font_size(options.code_font_size);
            if lines.peek().is_some() {
                run.add_break();
            }
        }
    }

    fn write_table(&mut self, header: &[TableCell], rows: &[Vec<TableCell>]) {
        self.inlines.stats.tables += 1;
        let table = self.document.add_table();

        if !header.is_empty() {
            fill_row(
                &mut self.inlines,
                table,
                header,
                true,
                Format {
                    bold: true,
                    ..Format::default()
                },
            );
        }
        for row in rows {
            fill_row(&mut self.inlines, table, row, false, Format::default());
        }
    }

    fn write_quote(&mut self, blocks: &[Block]) -> Result<()> {
        for block in blocks {
            match block {
                Block::Paragraph(inlines) => {
                    self.inlines.stats.blocks += 1;
                    let paragraph = self.document.add_paragraph();
                    paragraph.set_style(QUOTE_STYLE);
                    self.inlines.write(paragraph, inlines, Format::default());
                },
                Block::BlockQuote(inner) => self.write_quote(inner)?,
                other => self.write_block(other)?,
            }
        }
        Ok(())
    }
}

fn fill_row(
    inlines: &mut InlineWriter<'_>,
    table: &mut Table,
    cells: &[TableCell],
    header: bool,
    format: Format,
) {
    let row = if header {
        table.add_header_row(cells.len())
    } else {
        table.add_row(cells.len())
    };
    for (index, content) in cells.iter().enumerate() {
        if let Some(cell) = row.cell(index) {
            inlines.write(cell.add_paragraph(), content, format);
        }
    }
}
