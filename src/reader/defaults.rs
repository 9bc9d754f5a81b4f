//! Lexical defaults for the configuration syntax.
//!
//! Centralized constants to avoid magic characters scattered across the reader.

/// Characters separating tokens on a line.
pub const DELIMITERS: &str = " \t\r\n";

/// Characters that open (and must close) a quoted token.
pub const QUOTES: &str = "\"'";

/// Characters that start a comment when found before the first token.
pub const COMMENTS: &str = "#";

/// Number of tokens considered per line. Anything after the third is ignored.
pub const MAX_TOKENS: usize = 3;

/// Option name that is expanded as an include directive.
pub const INCLUDE: &str = "include";

/// Token that separates a name from its value in `name = value`.
pub const ASSIGN: &str = "=";

/// Token that terminates a block-open line.
pub const BLOCK_OPEN: &str = "{";

/// First character of a block-close line.
pub const BLOCK_CLOSE: char = '}';

/// Boolean literal for `true`.
pub const ON: &str = "on";

/// Boolean literal for `false`.
pub const OFF: &str = "off";
