use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so that `&amp;lt;` resolves `&amp;` first
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&nbsp;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use mathdocx::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("x^2"), "x^2");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let needs_escape = memchr::memchr3(b'&', b'<', b'>', bytes).is_some()
        || memchr::memchr2(b'"', b'\'', bytes).is_some();
    if !needs_escape {
        return Cow::Borrowed(s);
    }
    Cow::Owned(XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]))
}

/// Unescape XML special characters.
///
/// Replaces the five standard XML entities and `&nbsp;` with their corresponding
/// characters. Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use mathdocx::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'", "\u{a0}"])
}

/// Resolve the body of an entity reference (the part between `&` and `;`).
///
/// Handles the predefined XML entities, `nbsp` and numeric character
/// references. Returns `None` for anything else.
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_borrowed_when_clean() {
        assert!(matches!(escape_xml("plain text"), Cow::Borrowed(_)));
        assert!(matches!(escape_xml("a<b"), Cow::Owned(_)));
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("nbsp"), Some('\u{a0}'));
        assert_eq!(resolve_entity("#8722"), Some('−'));
        assert_eq!(resolve_entity("#x2212"), Some('−'));
        assert_eq!(resolve_entity("#xZZ"), None);
        assert_eq!(resolve_entity("hellip"), None);
    }

    proptest! {
        #[test]
        fn prop_escape_then_unescape_is_identity(s in "[a-z&<>\"' ]{0,40}") {
            prop_assert_eq!(unescape_xml(&escape_xml(&s)), s);
        }

        #[test]
        fn prop_escaped_text_has_no_markup(s in ".{0,40}") {
            let escaped = escape_xml(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
        }
    }
}
