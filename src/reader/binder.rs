//! Generic option binding.
//!
//! A caller describes the options it accepts as a [`Bindings`] table and
//! lets [`Bindings::read`] pull lines from a [`FileStack`] until the end of
//! the input or of the current block. Each option is checked against its
//! binding kind and stored directly into the caller's destination.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use gconf::reader::{Bindings, Block, FileStack, ReaderError};
//!
//! let text = "name demo\nport = 1812\nlisten a\nlisten b\ndebug on\n\
//!             server main {\n  secret s3cr3t\n}\n";
//! let mut stack = FileStack::new();
//! stack.push_reader("demo.conf", Cursor::new(text));
//!
//! let (mut name, mut port, mut listen, mut debug) = (None, None, Vec::new(), None);
//! let mut servers = Vec::new();
//! let mut server = |stack: &mut FileStack, block: &Block| -> Result<(), ReaderError> {
//!     let mut secret = None;
//!     Bindings::new()
//!         .string("secret", &mut secret)
//!         .read(stack, Some(block.label()))?;
//!     servers.push((block.value().to_string(), secret));
//!     Ok(())
//! };
//!
//! Bindings::new()
//!     .string("name", &mut name)
//!     .string("port", &mut port)
//!     .multi_string("listen", &mut listen)
//!     .boolean("debug", &mut debug)
//!     .block("server", &mut server)
//!     .read(&mut stack, None)
//!     .unwrap();
//!
//! assert_eq!(name.as_deref(), Some("demo"));
//! assert_eq!(port.as_deref(), Some("1812"));
//! assert_eq!(listen, ["a", "b"]);
//! assert_eq!(debug, Some(true));
//! assert_eq!(servers, [("main".to_string(), Some("s3cr3t".to_string()))]);
//! ```

use std::fmt;

use super::defaults;
use super::error::ReaderError;
use super::line::{self, ConfigLine, Line, LineKind};
use super::stack::FileStack;

/// Header of a block-open line, handed to a [`BlockHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    name: String,
    value: String,
    label: String,
}

impl Block {
    /// Creates a block header for `name value {`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let label = format!("{name} {value}");
        Self { name, value, label }
    }

    /// Option name that opened the block (`server` in `server main {`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block value (`main` in `server main {`).
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `name value`, used as the nesting context of the block's own options.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Receives block-open lines for a block option.
///
/// The handler owns the lines up to the matching `}`: it is expected to read
/// them, usually with its own [`Bindings::read`] call using
/// [`Block::label`] as the nesting context.
///
/// Any `FnMut(&mut FileStack, &Block) -> Result<(), ReaderError>` closure is a
/// handler; whatever it captures serves as its context.
pub trait BlockHandler {
    /// Handles one block opened by `block`.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing [`Bindings::read`].
    fn open_block(&mut self, stack: &mut FileStack, block: &Block) -> Result<(), ReaderError>;
}

impl<F> BlockHandler for F
where
    F: FnMut(&mut FileStack, &Block) -> Result<(), ReaderError>,
{
    fn open_block(&mut self, stack: &mut FileStack, block: &Block) -> Result<(), ReaderError> {
        self(stack, block)
    }
}

/// Destination of one option.
pub enum Binding<'a> {
    /// Single string value; must be unset before reading
    String(&'a mut Option<String>),
    /// Every occurrence is appended in order
    MultiString(&'a mut Vec<String>),
    /// `on` or `off`; must be unset before reading
    Boolean(&'a mut Option<bool>),
    /// Block option, dispatched to a handler
    Block(&'a mut dyn BlockHandler),
}

impl Binding<'_> {
    /// Line kind this binding accepts.
    const fn accepts(&self) -> LineKind {
        match self {
            Self::String(_) | Self::MultiString(_) | Self::Boolean(_) => LineKind::Scalar,
            Self::Block(_) => LineKind::BlockOpen,
        }
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(dest) => f.debug_tuple("String").field(dest).finish(),
            Self::MultiString(dest) => f.debug_tuple("MultiString").field(dest).finish(),
            Self::Boolean(dest) => f.debug_tuple("Boolean").field(dest).finish(),
            Self::Block(_) => f.write_str("Block(..)"),
        }
    }
}

/// Ordered table of option names and their destinations.
///
/// Names match ASCII case-insensitively; if a name is listed twice the first
/// entry wins.
#[derive(Debug, Default)]
pub struct Bindings<'a> {
    entries: Vec<(&'a str, Binding<'a>)>,
}

impl<'a> Bindings<'a> {
    /// Creates an empty table. Reading with it accepts only `include`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    #[must_use]
    pub fn bind(mut self, name: &'a str, binding: Binding<'a>) -> Self {
        self.entries.push((name, binding));
        self
    }

    /// Adds a single-valued string option.
    #[must_use]
    pub fn string(self, name: &'a str, dest: &'a mut Option<String>) -> Self {
        self.bind(name, Binding::String(dest))
    }

    /// Adds a multi-valued string option.
    #[must_use]
    pub fn multi_string(self, name: &'a str, dest: &'a mut Vec<String>) -> Self {
        self.bind(name, Binding::MultiString(dest))
    }

    /// Adds an `on`/`off` option.
    #[must_use]
    pub fn boolean(self, name: &'a str, dest: &'a mut Option<bool>) -> Self {
        self.bind(name, Binding::Boolean(dest))
    }

    /// Adds a block option handled by `handler`.
    #[must_use]
    pub fn block(self, name: &'a str, handler: &'a mut dyn BlockHandler) -> Self {
        self.bind(name, Binding::Block(handler))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads options from `stack` into the bound destinations.
    ///
    /// `block` is the label of the enclosing block, or `None` at top level.
    /// Reading stops successfully at the end of input (top level) or at the
    /// `}` closing the block. `include` lines are expanded in place.
    ///
    /// On error the destinations may be partially filled and should be
    /// treated as invalid.
    ///
    /// # Errors
    ///
    /// Any [`ReaderError`] from reading or classifying a line, plus:
    /// - [`ReaderError::Include`] if an include cannot be expanded
    /// - [`ReaderError::UnknownOption`] for a name not in the table
    /// - [`ReaderError::WrongSyntax`] for scalar/block syntax mismatches
    /// - [`ReaderError::DuplicateOption`] for a second single-valued assignment
    /// - [`ReaderError::InvalidBoolean`] for booleans other than `on`/`off`
    /// - [`ReaderError::UnterminatedBlock`] if input ends inside a block
    pub fn read(mut self, stack: &mut FileStack, block: Option<&str>) -> Result<(), ReaderError> {
        loop {
            let line = match line::next_line(stack, block)? {
                Line::Option(line) => line,
                Line::BlockEnd => return Ok(()),
                Line::Eof => {
                    return match block {
                        Some(block) => Err(ReaderError::UnterminatedBlock {
                            block: block.to_string(),
                        }),
                        None => Ok(()),
                    };
                }
            };

            if line.kind == LineKind::Scalar && line.name.eq_ignore_ascii_case(defaults::INCLUDE) {
                include(stack, line.value)?;
                continue;
            }

            self.bind_line(stack, block, line)?;
        }
    }

    /// Checks one option line against the table and stores its value.
    fn bind_line(
        &mut self,
        stack: &mut FileStack,
        block: Option<&str>,
        line: ConfigLine,
    ) -> Result<(), ReaderError> {
        let Some(binding) = self
            .entries
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(&line.name))
            .map(|(_, binding)| binding)
        else {
            return Err(ReaderError::UnknownOption {
                location: line.location,
                block: block.map(str::to_string),
                option: line.name,
            });
        };

        if binding.accepts() != line.kind {
            return Err(ReaderError::WrongSyntax {
                location: line.location,
                block: block.map(str::to_string),
                option: line.name,
            });
        }

        let ConfigLine {
            name,
            value,
            location,
            ..
        } = line;

        match binding {
            Binding::String(dest) => {
                if let Some(previous) = &**dest {
                    return Err(ReaderError::DuplicateOption {
                        location,
                        option: name,
                        previous: previous.clone(),
                    });
                }
                log_bound(block, &name, &value);
                **dest = Some(value);
            }
            Binding::MultiString(dest) => {
                log_bound(block, &name, &value);
                dest.push(value);
            }
            Binding::Boolean(dest) => {
                if let Some(previous) = **dest {
                    return Err(ReaderError::DuplicateOption {
                        location,
                        option: name,
                        previous: if previous { defaults::ON } else { defaults::OFF }.to_string(),
                    });
                }
                let Some(flag) = parse_bool(&value) else {
                    return Err(ReaderError::InvalidBoolean {
                        location,
                        block: block.map(str::to_string),
                        option: name,
                        value,
                    });
                };
                log_bound(block, &name, &value);
                **dest = Some(flag);
            }
            Binding::Block(handler) => {
                handler.open_block(stack, &Block::new(name, value))?;
            }
        }
        Ok(())
    }
}

/// Logs an option whose value has been accepted.
fn log_bound(block: Option<&str>, name: &str, value: &str) {
    match block {
        Some(block) => tracing::debug!("block {block}: {name} = {value}"),
        None => tracing::debug!("{name} = {value}"),
    }
}

/// Expands an `include` value onto the stack.
pub(crate) fn include(stack: &mut FileStack, pattern: String) -> Result<(), ReaderError> {
    stack
        .push_glob(&pattern)
        .map(|_| ())
        .map_err(|source| ReaderError::Include {
            pattern,
            source: Box::new(source),
        })
}

/// Parses a case-insensitive `on`/`off` literal.
fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case(defaults::ON) {
        Some(true)
    } else if value.eq_ignore_ascii_case(defaults::OFF) {
        Some(false)
    } else {
        None
    }
}
