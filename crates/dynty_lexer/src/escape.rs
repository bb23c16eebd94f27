//! Cooking of string and regexp literal content.

use std::borrow::Cow;

use crate::{LexError, LexErrorKind, Span};

/// Resolve the escapes of a double-quoted string's content.
///
/// `base` is the byte offset of `content` in the source, for error spans.
/// Content without a backslash is returned as is.
#[allow(
    clippy::cast_possible_truncation,
    reason = "offsets within a source bounded by u32::MAX"
)]
pub(crate) fn unescape_string(content: &str, base: u32) -> Result<Cow<'_, str>, LexError> {
    if !content.contains('\\') {
        return Ok(Cow::Borrowed(content));
    }
    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let at = |end: usize| Span::new(base + i as u32, base + end as u32);
        let Some((j, esc)) = chars.next() else {
            return Err(LexError::new(LexErrorKind::InvalidEscape('\\'), at(i + 1)));
        };
        let resolved = match esc {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            '/' => '/',
            'u' => {
                let (ch, end) = unicode_escape(content, j + 1)
                    .ok_or_else(|| LexError::new(LexErrorKind::InvalidUnicodeEscape, at(j + 1)))?;
                while chars.peek().is_some_and(|&(k, _)| k < end) {
                    chars.next();
                }
                ch
            }
            other => {
                return Err(LexError::new(
                    LexErrorKind::InvalidEscape(other),
                    at(j + other.len_utf8()),
                ));
            }
        };
        out.push(resolved);
    }
    Ok(Cow::Owned(out))
}

/// Decode `XXXX` or `{X..}` starting at byte `from` (just after `\u`).
///
/// Returns the character and the byte offset after the escape.
fn unicode_escape(content: &str, from: usize) -> Option<(char, usize)> {
    let rest = content.get(from..)?;
    let (digits, end) = if let Some(braced) = rest.strip_prefix('{') {
        let close = braced.find('}')?;
        let digits = &braced[..close];
        if digits.is_empty() || digits.len() > 6 {
            return None;
        }
        (digits, from + close + 2)
    } else {
        (rest.get(..4)?, from + 4)
    };
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(digits, 16).ok()?;
    char::from_u32(code).map(|c| (c, end))
}

/// Resolve `\/` in regexp content. Other escapes belong to the regexp
/// syntax and are kept.
pub(crate) fn unescape_regexp(content: &str) -> Cow<'_, str> {
    if !content.contains("\\/") {
        return Cow::Borrowed(content);
    }
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests;
