//! gconf: block-structured configuration reader
//!
//! A library for reading line-oriented configuration files with quoted
//! values, `{ ... }` blocks and recursive glob `include` directives, and
//! binding their options to caller-declared destinations.

pub mod cli;
pub mod reader;
pub mod tree;
