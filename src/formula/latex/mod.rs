// LaTeX front end
//
// Renders LaTeX formula source to MathML with pulldown-latex. The renderer
// reports invalid input inline as `<merror>` markup rather than through its
// return value, so the output is inspected before it is handed on. It also
// writes token text verbatim (`<mo><</mo>` for `a < b`), so that text is
// escaped before the markup reaches an XML reader.

mod error;

pub use error::{LatexError, Result};

use super::FormulaMode;
use crate::common::xml::{resolve_entity, unescape_xml};
use pulldown_latex::config::DisplayMode;
use pulldown_latex::mathml::push_mathml;
use pulldown_latex::{Parser, RenderConfig, Storage};
use std::panic::{self, AssertUnwindSafe};

const ERROR_OPEN: &str = "<merror";
const ERROR_TEXT_OPEN: &str = "<mtext>";
const ERROR_TEXT_CLOSE: &str = "</mtext>";

/// Elements whose content is character data only
const TOKEN_ELEMENTS: [&str; 5] = ["mi", "mn", "mo", "ms", "mtext"];

/// Longest entity body accepted as an existing reference
const MAX_REFERENCE_LEN: usize = 32;

impl FormulaMode {
    fn display_mode(self) -> DisplayMode {
        match self {
            FormulaMode::Inline => DisplayMode::Inline,
            FormulaMode::Block => DisplayMode::Block,
        }
    }
}

/// Render LaTeX source to a MathML document with the MathML namespace declared.
///
/// # Example
/// ```
/// use mathdocx::formula::FormulaMode;
/// use mathdocx::formula::latex::latex_to_mathml;
///
/// let mathml = latex_to_mathml("x^2", FormulaMode::Inline).unwrap();
/// assert!(mathml.contains("<msup>"));
/// ```
pub fn latex_to_mathml(latex: &str, mode: FormulaMode) -> Result<String> {
    let source = latex.trim();
    if source.is_empty() {
        return Err(LatexError::Empty);
    }

    let rendered = panic::catch_unwind(AssertUnwindSafe(|| render(source, mode)))
        .map_err(|payload| LatexError::Panicked(panic_message(payload.as_ref())))?;
    let mathml = escape_token_text(&rendered?);

    if let Some(message) = renderer_error(&mathml) {
        return Err(LatexError::Parse(message));
    }
    Ok(mathml)
}

fn render(source: &str, mode: FormulaMode) -> Result<String> {
    let storage = Storage::new();
    let parser = Parser::new(source, &storage);
    let mut config = RenderConfig::default();
    config.display_mode = mode.display_mode();
    config.xml = true;

    let mut mathml = String::with_capacity(source.len() * 8);
    push_mathml(&mut mathml, parser, config)?;
    Ok(mathml)
}

/// Extract the message of the first `<merror>` element, if any.
fn renderer_error(mathml: &str) -> Option<String> {
    let start = mathml.find(ERROR_OPEN)?;
    let rest = &mathml[start..];
    let message = rest
        .find(ERROR_TEXT_OPEN)
        .map(|pos| &rest[pos + ERROR_TEXT_OPEN.len()..])
        .and_then(|text| text.find(ERROR_TEXT_CLOSE).map(|end| &text[..end]))
        .map(|text| unescape_xml(text.trim()))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "invalid formula".to_string());
    Some(message)
}

/// Escape `<`, `>` and bare `&` inside token elements.
///
/// Markup outside token elements is copied unchanged. A token element whose
/// closing tag is missing is left as is for the XML reader to reject.
fn escape_token_text(mathml: &str) -> String {
    let mut out = String::with_capacity(mathml.len() + 16);
    let mut rest = mathml;

    while let Some(open) = rest.find('<') {
        let (before, tag_start) = rest.split_at(open);
        out.push_str(before);

        let Some(tag_len) = tag_start.find('>').map(|end| end + 1) else {
            rest = tag_start;
            break;
        };
        let (tag, after) = tag_start.split_at(tag_len);
        out.push_str(tag);
        rest = after;

        let Some(name) = token_name(tag) else {
            continue;
        };
        let close = format!("</{}>", name);
        if let Some(end) = rest.find(&close) {
            push_escaped_text(&rest[..end], &mut out);
            out.push_str(&close);
            rest = &rest[end + close.len()..];
        }
    }

    out.push_str(rest);
    out
}

/// Name of a token element opened by `tag`, if it is one.
fn token_name(tag: &str) -> Option<&str> {
    if tag.ends_with("/>") {
        return None;
    }
    let name = tag
        .strip_prefix('<')?
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()?;
    TOKEN_ELEMENTS.contains(&name).then_some(name)
}

fn push_escaped_text(text: &str, out: &mut String) {
    for (i, ch) in text.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if !starts_reference(&text[i + 1..]) => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
}

/// Whether `text` (following an `&`) is the body of a resolvable reference.
fn starts_reference(text: &str) -> bool {
    text.char_indices()
        .take(MAX_REFERENCE_LEN + 1)
        .find(|&(_, ch)| ch == ';')
        .is_some_and(|(end, _)| resolve_entity(&text[..end]).is_some())
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
