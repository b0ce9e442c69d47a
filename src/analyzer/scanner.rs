//! Lexical helpers for skimming JavaScript/TypeScript source
//!
//! These helpers know just enough about the language to step over
//! whitespace, comments, and string literals, and to find the bracket that
//! closes a block. They never build a syntax tree. Malformed input yields a
//! shorter or empty result, never a panic.
//!
//! All positions are byte offsets. Every offset returned is a char boundary
//! because the helpers only stop on ASCII bytes or at the end of the text.

/// A decoded string literal and the offset just past its closing quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    pub end: usize,
}

/// One top-level `key: value` entry of an object literal body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry<'a> {
    pub key: String,
    /// Value text up to the next top-level comma, trailing whitespace trimmed
    pub value: &'a str,
    /// Offset of `value` within the body it was taken from
    pub value_offset: usize,
}

fn is_quote(b: u8) -> bool {
    matches!(b, b'\'' | b'"' | b'`')
}

fn is_comment_start(bytes: &[u8], pos: usize) -> bool {
    bytes[pos] == b'/' && matches!(bytes.get(pos + 1), Some(b'/' | b'*'))
}

/// Skip whitespace, line comments, and block comments starting at `pos`
pub fn skip_trivia(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
        } else if bytes[pos] == b'/' && bytes.get(pos + 1) == Some(&b'/') {
            pos = text[pos..].find('\n').map_or(bytes.len(), |n| pos + n + 1);
        } else if bytes[pos] == b'/' && bytes.get(pos + 1) == Some(&b'*') {
            pos = text[pos + 2..].find("*/").map_or(bytes.len(), |n| pos + 2 + n + 2);
        } else {
            break;
        }
    }
    pos
}

/// Offset just past the literal opening at `pos`
///
/// An unterminated single- or double-quoted literal ends at the line break;
/// an unterminated template literal runs to the end of the text.
fn literal_end(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Read a single-, double-, or back-quoted string literal at `pos`
///
/// Returns `None` when `pos` is not a quote or the literal is unterminated.
pub fn string_literal(text: &str, pos: usize) -> Option<StringLiteral> {
    let quote = *text.as_bytes().get(pos)?;
    if !is_quote(quote) {
        return None;
    }

    let mut value = String::new();
    let mut chars = text[pos + 1..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, escaped)) => value.push(escaped),
                None => return None,
            },
            '\n' if quote != b'`' => return None,
            c if c == quote as char => {
                return Some(StringLiteral {
                    value,
                    end: pos + 1 + i + 1,
                })
            }
            c => value.push(c),
        }
    }
    None
}

/// Length of the identifier at the start of `text` (0 if none)
pub fn identifier_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.first().is_some_and(|b| b.is_ascii_digit()) {
        return 0;
    }
    bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_' || **b == b'$')
        .count()
}

/// Find the bracket closing the one opened at `open`
///
/// Tracks nesting depth across `{}`, `[]` and `()`, skipping string
/// literals and comments. Returns `None` when `open` is not an opening
/// bracket or the block never closes.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !matches!(bytes.get(open), Some(b'{' | b'[' | b'(')) {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'[' | b'(' => {
                depth += 1;
                i += 1;
            }
            b'}' | b']' | b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
                i += 1;
            }
            b if is_quote(b) => i = literal_end(bytes, i),
            _ if is_comment_start(bytes, i) => i = skip_trivia(text, i),
            _ => i += 1,
        }
    }
    None
}

/// Offset of the next top-level comma at or after `start`, or the end of `body`
fn entry_end(body: &str, start: usize) -> usize {
    let bytes = body.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b',' => return i,
            b'{' | b'[' | b'(' => i = matching_close(body, i).map_or(bytes.len(), |c| c + 1),
            b if is_quote(b) => i = literal_end(bytes, i),
            _ if is_comment_start(bytes, i) => i = skip_trivia(body, i),
            _ => i += 1,
        }
    }
    bytes.len()
}

fn parse_entry(segment: &str, start: usize) -> Option<ObjectEntry<'_>> {
    let (key, after_key) = match string_literal(segment, start) {
        Some(literal) => (literal.value, literal.end),
        None => {
            let len = identifier_len(&segment[start..]);
            if len == 0 {
                return None;
            }
            (segment[start..start + len].to_string(), start + len)
        }
    };

    let colon = skip_trivia(segment, after_key);
    if segment.as_bytes().get(colon) != Some(&b':') {
        return None;
    }

    let value_offset = skip_trivia(segment, colon + 1);
    Some(ObjectEntry {
        key,
        value: segment[value_offset..].trim_end(),
        value_offset,
    })
}

/// Split an object literal body (the text between its braces) into its
/// top-level `key: value` entries
///
/// Shorthand properties, methods, and spreads have no `key:` prefix and are
/// left out. Nested objects stay inside their parent's value.
pub fn object_entries(body: &str) -> Vec<ObjectEntry<'_>> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let start = skip_trivia(body, pos);
        let end = entry_end(body, start);
        if let Some(entry) = parse_entry(&body[..end], start) {
            entries.push(entry);
        }
        pos = end + 1;
    }

    entries
}

/// Byte offset `chars` characters after `start`, clamped to the end of `text`
///
/// `start` must be a char boundary.
pub fn advance_chars(text: &str, start: usize, chars: usize) -> usize {
    text.get(start..)
        .and_then(|rest| rest.char_indices().nth(chars))
        .map_or(text.len(), |(i, _)| start + i)
}
