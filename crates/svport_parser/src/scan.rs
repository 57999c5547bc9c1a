//! Bracket-aware scanning primitives.
//!
//! These work on raw text rather than tokens. All delimiters involved are
//! ASCII, so byte offsets returned here are always valid `str` boundaries.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"));
static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[^\n]*").expect("line comment pattern"));

/// One of the three bracket kinds tracked by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// `( ... )`
    Paren,
    /// `[ ... ]`
    Bracket,
    /// `{ ... }`
    Brace,
}

impl Delimiter {
    /// Returns the delimiter opened by `b`, if any.
    pub fn from_open(b: u8) -> Option<Self> {
        match b {
            b'(' => Some(Delimiter::Paren),
            b'[' => Some(Delimiter::Bracket),
            b'{' => Some(Delimiter::Brace),
            _ => None,
        }
    }

    /// The opening byte.
    pub fn open(self) -> u8 {
        match self {
            Delimiter::Paren => b'(',
            Delimiter::Bracket => b'[',
            Delimiter::Brace => b'{',
        }
    }

    /// The closing byte.
    pub fn close(self) -> u8 {
        match self {
            Delimiter::Paren => b')',
            Delimiter::Bracket => b']',
            Delimiter::Brace => b'}',
        }
    }
}

/// The result of scanning one bracketed region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enclosed<'a> {
    /// Text strictly between the opener and its matching closer.
    pub inner: &'a str,
    /// Offset just past the closer, or `text.len()` if the region was never closed.
    pub end: usize,
}

/// Scans the bracketed region whose opener sits at `open`.
///
/// Only brackets of the opener's kind affect the depth count, so
/// `( a[1) ]` closes at the first `)`. Returns `None` if `open` is not an
/// opening bracket. An unbalanced region runs to end of text.
pub fn scan_enclosed(text: &str, open: usize) -> Option<Enclosed<'_>> {
    let bytes = text.as_bytes();
    let delim = Delimiter::from_open(*bytes.get(open)?)?;
    let (opener, closer) = (delim.open(), delim.close());
    let start = open + 1;
    let mut depth = 1usize;
    let mut pos = start;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b == opener {
            depth += 1;
        } else if b == closer {
            depth -= 1;
            if depth == 0 {
                return Some(Enclosed {
                    inner: &text[start..pos],
                    end: pos + 1,
                });
            }
        }
        pos += 1;
    }
    Some(Enclosed {
        inner: &text[start..],
        end: text.len(),
    })
}

/// Splits `text` on `delimiter` wherever no `()`, `[]` or `{}` is open.
///
/// Each bracket kind has its own depth counter; a stray closer is ignored
/// instead of driving its counter negative. Empty pieces between adjacent
/// delimiters are kept, but a trailing empty piece is not.
pub fn split_top_level(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let (mut paren, mut bracket, mut brace) = (0usize, 0usize, 0usize);
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => paren += 1,
            ')' => paren = paren.saturating_sub(1),
            '[' => bracket += 1,
            ']' => bracket = bracket.saturating_sub(1),
            '{' => brace += 1,
            '}' => brace = brace.saturating_sub(1),
            _ => {}
        }
        if ch == delimiter && paren == 0 && bracket == 0 && brace == 0 {
            parts.push(&text[start..i]);
            start = i + ch.len_utf8();
        }
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}

/// Returns the offset of the first `needle` outside all brackets.
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let first = split_top_level(text, needle).first().copied()?;
    (first.len() < text.len()).then_some(first.len())
}

/// Removes `/* ... */` and `// ...` comments.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    match BLOCK_COMMENT.replace_all(text, "") {
        Cow::Borrowed(s) => LINE_COMMENT.replace_all(s, ""),
        Cow::Owned(s) => Cow::Owned(LINE_COMMENT.replace_all(&s, "").into_owned()),
    }
}

/// Returns `true` if `b` can start an identifier.
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Returns `true` if `b` can continue an identifier.
pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Returns the leading identifier of `text`, if it starts with one.
pub(crate) fn leading_identifier(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if !is_ident_start(*bytes.first()?) {
        return None;
    }
    let len = bytes.iter().take_while(|&&b| is_ident_char(b)).count();
    Some(&text[..len])
}

/// Strips `keyword` from the front of `text` when it appears as a whole word.
pub(crate) fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.bytes().next() {
        Some(b) if is_ident_char(b) => None,
        _ => Some(rest),
    }
}

/// Advances `pos` past ASCII whitespace.
pub(crate) fn skip_whitespace(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
