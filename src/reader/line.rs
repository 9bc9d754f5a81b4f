//! Line classification.
//!
//! Turns the tokens of one line into a [`ConfigLine`]:
//!
//! ```text
//! name value            scalar
//! name = value          scalar
//! name label {          block open
//! }                     block close
//! # anything            comment
//! ```

use std::fmt;

use super::defaults;
use super::error::{Location, ReaderError};
use super::stack::FileStack;
use super::token::{self, Syntax};

/// Syntactic kind of an option line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// `name value` or `name = value`
    Scalar,
    /// `name label {`
    BlockOpen,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::BlockOpen => write!(f, "block"),
        }
    }
}

/// A classified option line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLine {
    /// Option name as written
    pub name: String,
    /// Option value (the label for block-open lines), never empty
    pub value: String,
    /// Which syntax the line used
    pub kind: LineKind,
    /// Where the line was read
    pub location: Location,
}

/// Outcome of reading one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// An option or block-open line
    Option(ConfigLine),
    /// A `}` closing the current block
    BlockEnd,
    /// Every file on the stack is exhausted
    Eof,
}

/// Reads and classifies the next non-blank, non-comment line.
///
/// `block` is the label of the enclosing block, or `None` at top level. A
/// line whose first token starts with `}` ends the block; at top level it is
/// an error.
///
/// # Errors
///
/// - [`ReaderError::Read`] if reading fails
/// - [`ReaderError::Encoding`] if a line is not valid UTF-8
/// - [`ReaderError::MalformedQuoting`] for a bad quoted token
/// - [`ReaderError::UnexpectedBlockClose`] for `}` at top level
/// - [`ReaderError::Syntax`] if the tokens fit no line shape
/// - [`ReaderError::EmptyValue`] if the value is an empty string
pub fn next_line(stack: &mut FileStack, block: Option<&str>) -> Result<Line, ReaderError> {
    let syntax = Syntax::default();

    loop {
        let Some(text) = stack.next_line()? else {
            return Ok(Line::Eof);
        };

        let tokens = token::tokenize(&text, syntax, defaults::MAX_TOKENS).map_err(|_| {
            ReaderError::MalformedQuoting {
                location: stack.location(),
                line: text.clone(),
            }
        })?;

        let Some(first) = tokens.first() else {
            continue;
        };
        if syntax.comments.chars().any(|c| first.starts_with(c)) {
            continue;
        }
        if first.starts_with(defaults::BLOCK_CLOSE) {
            if block.is_some() {
                return Ok(Line::BlockEnd);
            }
            return Err(ReaderError::UnexpectedBlockClose {
                location: stack.location(),
            });
        }

        return classify(&tokens, stack.location(), block).map(Line::Option);
    }
}

/// Classifies the tokens of a line already known not to be a comment or `}`.
fn classify(
    tokens: &[&str],
    location: Location,
    block: Option<&str>,
) -> Result<ConfigLine, ReaderError> {
    let (name, value, kind) = match *tokens {
        [name, value] => (name, value, LineKind::Scalar),
        [name, assign, value] if assign == defaults::ASSIGN => (name, value, LineKind::Scalar),
        [name, label, open] if open == defaults::BLOCK_OPEN => (name, label, LineKind::BlockOpen),
        _ => {
            return Err(ReaderError::Syntax {
                location,
                block: block.map(str::to_string),
                token: tokens.first().copied().unwrap_or_default().to_string(),
            });
        }
    };

    if value.is_empty() {
        return Err(ReaderError::EmptyValue {
            location,
            option: name.to_string(),
        });
    }

    Ok(ConfigLine {
        name: name.to_string(),
        value: value.to_string(),
        kind,
        location,
    })
}
