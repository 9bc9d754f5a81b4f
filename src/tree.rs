//! Schema-less reading of a whole configuration tree.
//!
//! Unlike [`Bindings`](crate::reader::Bindings), the tree reader accepts any
//! option name. It expands includes the same way and keeps every option in
//! source order, which makes it suitable for inspecting what a tree of
//! included files resolves to.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::reader::{self, FileStack, Line, LineKind, Location, ReaderError, defaults, line};

/// One option line, with the contents of its block if it opened one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Option name as written
    pub name: String,
    /// Option value, or the block label
    pub value: String,
    /// Scalar or block
    pub kind: LineKind,
    /// `path:line` where the option was read
    #[serde(serialize_with = "serialize_location")]
    pub location: Location,
    /// Options inside the block, in source order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

fn serialize_location<S: serde::Serializer>(location: &Location, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(location)
}

/// Reads every option from `stack`, expanding includes.
///
/// # Errors
///
/// Returns the first [`ReaderError`] met; include failures are wrapped in
/// [`ReaderError::Include`] and a missing `}` is reported as
/// [`ReaderError::UnterminatedBlock`].
pub fn read_tree(stack: &mut FileStack) -> Result<Vec<Node>, ReaderError> {
    read_nodes(stack, None)
}

fn read_nodes(stack: &mut FileStack, block: Option<&str>) -> Result<Vec<Node>, ReaderError> {
    let mut nodes = Vec::new();
    loop {
        let line = match line::next_line(stack, block)? {
            Line::Option(line) => line,
            Line::BlockEnd => return Ok(nodes),
            Line::Eof => {
                return match block {
                    Some(block) => Err(ReaderError::UnterminatedBlock {
                        block: block.to_string(),
                    }),
                    None => Ok(nodes),
                };
            }
        };

        let children = match line.kind {
            LineKind::Scalar if line.name.eq_ignore_ascii_case(defaults::INCLUDE) => {
                reader::include(stack, line.value)?;
                continue;
            }
            LineKind::Scalar => Vec::new(),
            LineKind::BlockOpen => {
                let label = format!("{} {}", line.name, line.value);
                read_nodes(stack, Some(&label))?
            }
        };

        nodes.push(Node {
            name: line.name,
            value: line.value,
            kind: line.kind,
            location: line.location,
            children,
        });
    }
}

/// Renders nodes back to config syntax, one option per line.
///
/// Names and values that are empty, contain delimiters or start with a
/// quote are quoted; the output reads back to the same tree unless a token
/// holds both quote characters.
#[must_use]
pub fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    render_into(&mut out, nodes, 0);
    out
}

fn render_into(out: &mut String, nodes: &[Node], depth: usize) {
    for node in nodes {
        let indent = "    ".repeat(depth);
        let name = quote(&node.name);
        let value = quote(&node.value);
        // Writing to a String cannot fail.
        let _ = match node.kind {
            LineKind::Scalar => writeln!(out, "{indent}{name} {value}"),
            LineKind::BlockOpen => writeln!(out, "{indent}{name} {value} {{"),
        };
        if node.kind == LineKind::BlockOpen {
            render_into(out, &node.children, depth + 1);
            let _ = writeln!(out, "{indent}}}");
        }
    }
}

fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.contains(|c: char| defaults::DELIMITERS.contains(c))
        || value.starts_with(|c: char| defaults::QUOTES.contains(c));
    if !needs_quotes {
        return value.to_string();
    }
    let quote = if value.contains('"') { '\'' } else { '"' };
    format!("{quote}{value}{quote}")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(std::slice::from_ref(self)))
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
