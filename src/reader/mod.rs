//! Configuration reader.
//!
//! This module provides:
//! - Line tokenizing with quoting and comments ([`token`])
//! - The stack of open files behind `include` ([`FileStack`])
//! - Line classification ([`line`])
//! - Binding options to caller destinations ([`Bindings`])
//! - Lexical constants ([`defaults`])
//!
//! # Syntax
//!
//! ```text
//! # comment
//! option value
//! option = "quoted value"
//! include conf.d/*.conf
//! block label {
//!     option value
//! }
//! ```
//!
//! Option names are case-insensitive. Tokens are separated by spaces or tabs
//! and may be quoted with `"` or `'`. A `#` starts a comment only as the
//! first token of a line.
//!
//! # Includes
//!
//! `include <pattern>` expands the glob pattern and reads every matching
//! file, in sorted order, before continuing after the `include` line.
//! Relative patterns are resolved against the directory of the including
//! file. A pattern that matches nothing is an error for the binder.

mod binder;
pub mod defaults;
mod error;
pub mod line;
mod stack;
pub mod token;

#[cfg(test)]
mod token_tests;

pub(crate) use binder::include;
pub use binder::{Binding, Bindings, Block, BlockHandler};
pub use error::{Location, ReaderError};
pub use line::{ConfigLine, Line, LineKind};
pub use stack::FileStack;
