//! Error types for reading configuration trees.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A position in a configuration file, used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path of the file as it was opened
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
}

impl Location {
    /// Creates a location for `line` in `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Renders the optional block context of a diagnostic.
#[allow(clippy::ref_option)] // called from thiserror with a field reference
fn in_block(block: &Option<String>) -> String {
    block
        .as_ref()
        .map_or_else(String::new, |b| format!(" in block {b}"))
}

/// Error type for configuration reading.
///
/// `FileOpen` and `GlobNoMatch` are soft: the reader reports them, and
/// the caller decides whether a missing file matters. Every other
/// variant aborts the parse that produced it.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Failed to open a configuration file.
    #[error("Could not read config file '{}': {source}", path.display())]
    FileOpen {
        /// Path that could not be opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed while reading a line from an open file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        /// Path of the file being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line is not valid UTF-8.
    #[error("Configuration error at {location}, line is not valid UTF-8")]
    Encoding {
        /// Where the line was read
        location: Location,
    },

    /// An include pattern is not a valid glob.
    #[error("Invalid include pattern '{pattern}': {source}")]
    GlobPattern {
        /// The resolved pattern
        pattern: String,
        /// Underlying pattern error
        #[source]
        source: glob::PatternError,
    },

    /// An include pattern matched no files.
    #[error("Could not glob '{pattern}': no matching files")]
    GlobNoMatch {
        /// The resolved pattern
        pattern: String,
    },

    /// An `include` directive could not be expanded.
    #[error("Failed to include config file '{pattern}': {source}")]
    Include {
        /// The pattern as written in the config file
        pattern: String,
        /// Why the expansion failed
        #[source]
        source: Box<ReaderError>,
    },

    /// A quoted token is unterminated or followed by a non-delimiter.
    #[error("Syntax error at {location} in line starting with: {line}")]
    MalformedQuoting {
        /// Where the line was read
        location: Location,
        /// The offending line
        line: String,
    },

    /// A `}` appeared outside any block.
    #[error("Configuration error at {location}, found }} with no matching {{")]
    UnexpectedBlockClose {
        /// Where the `}` was read
        location: Location,
    },

    /// A line does not have the shape of any known line kind.
    #[error(
        "Configuration error{} at {location}, syntax error in line starting with {token}",
        in_block(.block)
    )]
    Syntax {
        /// Where the line was read
        location: Location,
        /// Enclosing block label, if any
        block: Option<String>,
        /// First token of the line
        token: String,
    },

    /// An option was given an empty value.
    #[error("Configuration error at {location}, option {option} needs a non-empty value")]
    EmptyValue {
        /// Where the option was read
        location: Location,
        /// The option name
        option: String,
    },

    /// An option name is not in the binding table.
    #[error(
        "Configuration error{} at {location}, unknown option {option}",
        in_block(.block)
    )]
    UnknownOption {
        /// Where the option was read
        location: Location,
        /// Enclosing block label, if any
        block: Option<String>,
        /// The option name
        option: String,
    },

    /// Scalar syntax used for a block option, or the other way round.
    #[error(
        "Configuration error{} at {location}, wrong syntax for option {option}",
        in_block(.block)
    )]
    WrongSyntax {
        /// Where the option was read
        location: Location,
        /// Enclosing block label, if any
        block: Option<String>,
        /// The option name
        option: String,
    },

    /// A single-valued option was set twice.
    #[error("Configuration error at {location}, option {option} already set to {previous}")]
    DuplicateOption {
        /// Where the second assignment was read
        location: Location,
        /// The option name
        option: String,
        /// The value already bound
        previous: String,
    },

    /// A boolean option got something other than `on` or `off`.
    #[error(
        "Configuration error{} at {location}, value for option {option} must be on or off, not {value}",
        in_block(.block)
    )]
    InvalidBoolean {
        /// Where the option was read
        location: Location,
        /// Enclosing block label, if any
        block: Option<String>,
        /// The option name
        option: String,
        /// The rejected value
        value: String,
    },

    /// Input ended before the closing `}` of a block.
    #[error("Configuration error, block {block} is missing its closing }}")]
    UnterminatedBlock {
        /// Label of the open block
        block: String,
    },
}

impl ReaderError {
    /// Returns `true` for failures a caller may choose to tolerate
    /// (a file that could not be opened, a pattern that matched nothing).
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::FileOpen { .. } | Self::GlobNoMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod location {
        use super::*;

        #[test]
        fn displays_path_and_line() {
            let location = Location::new("/etc/app/app.conf", 12);
            assert_eq!(location.to_string(), "/etc/app/app.conf:12");
        }
    }

    mod reader_error {
        use super::*;
        use std::error::Error;

        #[test]
        fn unknown_option_mentions_block_when_nested() {
            let error = ReaderError::UnknownOption {
                location: Location::new("a.conf", 3),
                block: Some("server main".to_string()),
                option: "bogus".to_string(),
            };

            assert_eq!(
                error.to_string(),
                "Configuration error in block server main at a.conf:3, unknown option bogus"
            );
        }

        #[test]
        fn unknown_option_omits_block_at_top_level() {
            let error = ReaderError::UnknownOption {
                location: Location::new("a.conf", 3),
                block: None,
                option: "bogus".to_string(),
            };

            assert_eq!(
                error.to_string(),
                "Configuration error at a.conf:3, unknown option bogus"
            );
        }

        #[test]
        fn unexpected_block_close_renders_braces() {
            let error = ReaderError::UnexpectedBlockClose {
                location: Location::new("a.conf", 1),
            };

            assert!(error.to_string().contains("found } with no matching {"));
        }

        #[test]
        fn include_preserves_source_chain() {
            let error = ReaderError::Include {
                pattern: "sub/*.conf".to_string(),
                source: Box::new(ReaderError::GlobNoMatch {
                    pattern: "/etc/sub/*.conf".to_string(),
                }),
            };

            let source = error.source().unwrap();
            assert!(source.to_string().contains("/etc/sub/*.conf"));
        }

        #[test]
        fn encoding_error_is_located() {
            let error = ReaderError::Encoding {
                location: Location::new("latin1.conf", 7),
            };

            assert_eq!(
                error.to_string(),
                "Configuration error at latin1.conf:7, line is not valid UTF-8"
            );
            assert!(!error.is_soft());
        }

        #[test]
        fn soft_errors_are_file_open_and_glob_no_match() {
            let open = ReaderError::FileOpen {
                path: PathBuf::from("missing.conf"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            };
            let glob = ReaderError::GlobNoMatch {
                pattern: "*.conf".to_string(),
            };
            let block = ReaderError::UnterminatedBlock {
                block: "server main".to_string(),
            };

            assert!(open.is_soft());
            assert!(glob.is_soft());
            assert!(!block.is_soft());
        }
    }
}
