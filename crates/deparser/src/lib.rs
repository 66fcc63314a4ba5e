//! # Deparser
//!
//! Turns a tree back into source text, which parses back into the same tree.
//!
//! Works in stages:
//! - Renders the tree into an intermediate representation, choosing between operator, keyword
//!   and prefix call syntax, and adding parentheses where the parser would misread the text
//! - Then decides which argument lists need to be broken over lines to fit in the print width
//! - Writes it out as a string
//!
//! Line breaking is based upon the algorithm described by Philip Wadler in
//! [`A prettier printer`](https://homepages.inf.ed.ac.uk/wadler/papers/prettier/prettier.pdf).

#![deny(unsafe_code)]

pub mod config;
mod error;
mod node;
mod printer;

#[cfg(test)]
mod test;

use bumpalo::Bump as Allocator;
use node::Deparser;
use printer::Printer;
use sprig_syntax::Node;

/// Deparse a node with the default configuration.
///
/// # Examples
/// ```
/// use sprig_deparser::deparse;
/// use sprig_syntax::parse_single;
///
/// let tree = parse_single("(a+b)*c").unwrap();
/// assert_eq!(deparse(&tree).unwrap(), "(a + b) * c");
/// ```
///
/// # Errors
/// If the tree has no source text which would parse back into it.
pub fn deparse(node: &Node) -> Result<String, StructuralError> {
  deparse_with(node, Config::default())
}

/// Deparse a node, trying to keep within the print width given in the config.
///
/// # Errors
/// If the tree has no source text which would parse back into it.
pub fn deparse_with(node: &Node, config: Config) -> Result<String, StructuralError> {
  let allocator = Allocator::new();
  let mut deparser = Deparser::new(Printer::new(config, &allocator));

  let ir = deparser.root(node, Vec::new())?;
  Ok(deparser.print(&ir))
}

/// Deparse a sequence of units, each followed by a line ending.
///
/// The path of an error starts with the index of the unit it is in.
///
/// # Errors
/// If any of the trees have no source text which would parse back into them.
pub fn deparse_all(nodes: &[Node], config: Config) -> Result<String, StructuralError> {
  let allocator = Allocator::new();
  let mut deparser = Deparser::new(Printer::new(config, &allocator));

  let mut output = String::new();
  for (index, node) in nodes.iter().enumerate() {
    let ir = deparser.root(node, vec![index])?;
    output.push_str(&deparser.print(&ir));
    output.push_str(config.line_ending.as_str());
  }

  Ok(output)
}

pub use config::{Config, Indentation, LineEnding};
pub use error::StructuralError;
