//! Line tokenizer.
//!
//! Splits a line into delimiter-separated tokens. A token may be wrapped in
//! a pair of identical quote characters, in which case delimiters inside it
//! are kept. There are no escapes: a quoted token ends at the first matching
//! quote, which must be followed by a delimiter or the end of the line.

use super::defaults;

/// A quoted token was unterminated or not followed by a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedQuote;

/// Character classes driving the tokenizer.
#[derive(Debug, Clone, Copy)]
pub struct Syntax<'s> {
    /// Characters separating tokens
    pub delimiters: &'s str,
    /// Characters that open and close a quoted token
    pub quotes: &'s str,
    /// Characters starting a comment (only honored before the first token)
    pub comments: &'s str,
}

impl Default for Syntax<'static> {
    fn default() -> Self {
        Self {
            delimiters: defaults::DELIMITERS,
            quotes: defaults::QUOTES,
            comments: defaults::COMMENTS,
        }
    }
}

/// Reads the next token from `cursor` and advances it past the token.
///
/// `comments` is only meaningful for the first token of a line; pass `None`
/// for later positions so that `#` inside values stays literal.
///
/// Returns `Ok(None)` when the line has no more tokens (end of line or a
/// comment), which is not an error.
///
/// # Errors
///
/// Returns [`MalformedQuote`] if a quoted token lacks its closing quote or
/// the closing quote is directly followed by a non-delimiter character.
pub fn next_token<'a>(
    cursor: &mut &'a str,
    delimiters: &str,
    quotes: &str,
    comments: Option<&str>,
) -> Result<Option<&'a str>, MalformedQuote> {
    let is_delimiter = |c: char| delimiters.contains(c);

    let rest = cursor.trim_start_matches(is_delimiter);
    let Some(first) = rest.chars().next() else {
        *cursor = rest;
        return Ok(None);
    };

    if comments.is_some_and(|set| set.contains(first)) {
        *cursor = "";
        return Ok(None);
    }

    if quotes.contains(first) {
        let body = &rest[first.len_utf8()..];
        let end = body.find(first).ok_or(MalformedQuote)?;
        let after = &body[end + first.len_utf8()..];
        if after.chars().next().is_some_and(|c| !is_delimiter(c)) {
            return Err(MalformedQuote);
        }
        *cursor = after;
        return Ok(Some(&body[..end]));
    }

    let end = rest.find(is_delimiter).unwrap_or(rest.len());
    *cursor = &rest[end..];
    Ok(Some(&rest[..end]))
}

/// Tokenizes up to `limit` tokens of `line`; later tokens are not examined.
///
/// # Errors
///
/// Returns [`MalformedQuote`] as soon as any examined token is malformed.
pub fn tokenize<'a>(
    line: &'a str,
    syntax: Syntax<'_>,
    limit: usize,
) -> Result<Vec<&'a str>, MalformedQuote> {
    let mut cursor = line;
    let mut items = Vec::with_capacity(limit);

    while items.len() < limit {
        let comments = items.is_empty().then_some(syntax.comments);
        match next_token(&mut cursor, syntax.delimiters, syntax.quotes, comments)? {
            Some(token) => items.push(token),
            None => break,
        }
    }

    Ok(items)
}
