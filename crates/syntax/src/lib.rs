//! # Syntax
//! Capture source code as a tree which can be inspected, built and rewritten.
//!
//! A pratt parser, based on [Crafting Interpreters](https://craftinginterpreters.com/parsing-expressions.html).
//!
//! The tree is made of four kinds of [`Node`]: constants, symbols, calls and formal lists.
//! Every operator and control flow form becomes an ordinary [`Call`], so `a + b` and
//! `` `+`(a, b) `` produce the same tree.
//!
//! The source is tokenised lazily as the parser asks for tokens, and parsing stops at the
//! first error. Spans are only kept for error messages, not in the tree.

pub mod ast;
mod construct;
mod driver;
mod operator;
mod parser;
mod query;
mod span;
mod standardise;
mod tokeniser;


/// Parses every top-level unit of a source code string.
///
/// # Examples
/// ```
/// use sprig_syntax::parse;
/// let units = parse("x <- 5 + 3\nprint(x)").unwrap();
///
/// assert_eq!(units.len(), 2);
/// ```
///
/// # Errors
/// If the source is not valid, no units are returned.
pub fn parse(source: &str) -> Result<Vec<Node>, ParseError> {
  units(source).collect()
}

/// Parses a source code string which contains exactly one unit.
///
/// # Examples
/// ```
/// use sprig_syntax::parse_single;
///
/// assert_eq!(parse_single("a + b").unwrap(), parse_single("`+`(a, b)").unwrap());
/// assert!(parse_single("a\nb").is_err());
/// ```
///
/// # Errors
/// If the source is not valid, or doesn't have exactly one unit.
pub fn parse_single(source: &str) -> Result<Node, ParseError> {
  parser::Parser::new(source).single()
}

/// Lazily parse the top-level units of a source code string, one at a time.
///
/// Stops after the first error.
pub fn units(source: &str) -> Units<'_> {
  Units::new(source)
}

/// Get the tokens from a source code string
pub fn tokenise(source: &str) -> Tokeniser<'_> {
  Tokeniser::from(source)
}

pub use ast::{
  Argument, Call, Constant, Formal, FormalList, Name, Node, Symbol, Tree, Vector,
  is_syntactic_name, missing_argument, quote,
};
pub use construct::{CallBuilder, ConstructionError, Head, make_call, make_call_from_nodes, make_formal_list};
pub use driver::{DriverError, Evaluator, MissingArgumentError, Outcome, run};
pub use operator::{Associativity, BinaryOperator, Precedence, UnaryOperator, is_custom_operator};
pub use parser::{ParseError, Units};
pub use query::{IndexError, Path, QueryError, Walk};
pub use span::{LineIndex, Span};
pub use standardise::{StandardisationError, standardise};
pub use tokeniser::{LexError, OperatorClass, Token, TokenKind, Tokeniser};
