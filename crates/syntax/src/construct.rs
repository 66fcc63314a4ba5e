//! # Construction
//!
//! Building calls and formal lists from code, rather than by parsing source.
//!
//! Construction is purely structural, nothing checks that a head names a real function.

use crate::ast::{Argument, Call, Formal, FormalList, Name, Node, Symbol};
use std::{error, fmt};

/// The head of a call being constructed
///
/// A `&str` becomes a symbol. Nodes are checked when the call is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Head(pub Node);

impl From<&str> for Head {
  fn from(name: &str) -> Self {
    Self(Node::symbol(name))
  }
}
impl From<Node> for Head {
  fn from(node: Node) -> Self {
    Self(node)
  }
}
impl From<Symbol> for Head {
  fn from(symbol: Symbol) -> Self {
    Self(Node::Symbol(symbol))
  }
}
impl From<Call> for Head {
  fn from(call: Call) -> Self {
    Self(Node::Call(call))
  }
}

/// Build a call from a head and its arguments
///
/// Any iterator of arguments is accepted, so existing collections can be spliced in by
/// chaining them.
///
/// ```
/// use sprig_syntax::{Argument, Node, make_call, parse_single};
///
/// let call = make_call("+", [Node::symbol("a").into(), Node::symbol("b").into()]).unwrap();
/// assert_eq!(call, parse_single("a + b").unwrap());
///
/// let named = make_call("f", [Argument::named("x", Node::symbol("y"))]).unwrap();
/// assert_eq!(named, parse_single("f(x = y)").unwrap());
/// ```
///
/// # Errors
/// If the head is not a symbol or a call.
pub fn make_call(
  head: impl Into<Head>,
  arguments: impl IntoIterator<Item = Argument>,
) -> Result<Node, ConstructionError> {
  let Head(head) = head.into();
  Call::new(head, arguments).map(Node::Call)
}

/// Build a call from a sequence of nodes, where the first is the head and the rest are
/// unnamed arguments
///
/// # Errors
/// If there are no nodes, or the head is not a symbol or a call.
pub fn make_call_from_nodes(
  nodes: impl IntoIterator<Item = Node>,
) -> Result<Node, ConstructionError> {
  let mut nodes = nodes.into_iter();
  let head = nodes.next().ok_or(ConstructionError::MissingHead)?;

  make_call(head, nodes.map(Argument::positional))
}

/// Build a formal list from pairs of names and optional defaults
///
/// ```
/// use sprig_syntax::{Node, make_formal_list};
///
/// let formals = make_formal_list([("x", None), ("y", Some(Node::symbol("x")))]).unwrap();
/// assert_eq!(formals.as_formal_list().unwrap().len(), 2);
///
/// assert!(make_formal_list([("x", None), ("x", None)]).is_err());
/// ```
///
/// # Errors
/// If a name is empty or repeated.
pub fn make_formal_list<'a>(
  pairs: impl IntoIterator<Item = (&'a str, Option<Node>)>,
) -> Result<Node, ConstructionError> {
  let formals = pairs
    .into_iter()
    .map(|(name, default)| Formal::new(name, default));

  FormalList::new(formals).map(Node::FormalList)
}

/// Builds up a call one argument at a time
///
/// ```
/// use sprig_syntax::{CallBuilder, Node, parse_single};
///
/// let call = CallBuilder::new("f")
///   .argument(Node::symbol("a"))
///   .named("b", Node::symbol("c"))
///   .build()
///   .unwrap();
///
/// assert_eq!(call, parse_single("f(a, b = c)").unwrap());
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct CallBuilder {
  head: Node,
  arguments: Vec<Argument>,
}
impl CallBuilder {
  /// Start building a call with a head
  pub fn new(head: impl Into<Head>) -> Self {
    Self {
      head: head.into().0,
      arguments: Vec::new(),
    }
  }

  /// Add an unnamed argument
  pub fn argument(mut self, value: impl Into<Node>) -> Self {
    self.arguments.push(Argument::positional(value));
    self
  }

  /// Add a named argument
  pub fn named(mut self, name: &str, value: impl Into<Node>) -> Self {
    self.arguments.push(Argument::named(name, value));
    self
  }

  /// Add an empty argument
  pub fn missing(mut self) -> Self {
    self.arguments.push(Argument::missing());
    self
  }

  /// Add every argument from a collection, in order, keeping their names
  pub fn splice(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
    self.arguments.extend(arguments);
    self
  }

  /// Finish building the call
  ///
  /// # Errors
  /// If the head is not a symbol or a call.
  pub fn build(self) -> Result<Node, ConstructionError> {
    make_call(self.head, self.arguments)
  }
}

/// An error whilst building a node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
  /// A call was built from no nodes, so has no head
  MissingHead,
  /// The head of a call is not a symbol or call
  InvalidHead {
    /// What the head was
    kind: &'static str,
  },
  /// A constant was given a vector without exactly one element
  NotScalar {
    /// The type of the vector
    kind: &'static str,
    /// How many elements the vector has
    length: usize,
  },
  /// A type of value which can never be a constant in a tree
  UnsupportedConstant {
    /// The type of the value
    kind: &'static str,
  },
  /// A formal with an empty name
  EmptyFormalName {
    /// The position of the formal
    position: usize,
  },
  /// Two formals with the same name
  DuplicateFormal {
    /// The repeated name
    name: Name,
  },
}
impl ConstructionError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> &'static str {
    match self {
      Self::MissingHead => "Missing Head",
      Self::InvalidHead { .. } => "Invalid Head",
      Self::NotScalar { .. } => "Not Scalar",
      Self::UnsupportedConstant { .. } => "Unsupported Constant",
      Self::EmptyFormalName { .. } => "Empty Formal Name",
      Self::DuplicateFormal { .. } => "Duplicate Formal",
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::MissingHead => "a call needs at least a head".into(),
      Self::InvalidHead { kind } => {
        format!("the head of a call must be a symbol or a call, not a {kind}")
      }
      Self::NotScalar { kind, length } => {
        format!("a constant must have exactly one element, but the {kind} vector has {length}")
      }
      Self::UnsupportedConstant { kind } => format!("a {kind} value can't be a constant"),
      Self::EmptyFormalName { position } => format!("formal {position} has an empty name"),
      Self::DuplicateFormal { name } => format!("formal `{name}` is declared more than once"),
    }
  }
}
impl fmt::Display for ConstructionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
impl error::Error for ConstructionError {}
