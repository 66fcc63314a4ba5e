//! # AST
//!
//! The definition of the Abstract Syntax Tree.
//!
//! A tree is made of [`Node`]s, a closed set of four variants. Nodes are plain owned values:
//! a [`Call`] owns its head and arguments, so trees can't contain cycles. Building or rewriting
//! a tree creates a new tree rather than mutating one in place.

pub mod call;
pub mod constant;
pub mod formals;
mod prettyprint;
pub mod symbol;

pub use call::{Argument, Call};
pub use constant::{Constant, Vector, quote};
pub use formals::{Formal, FormalList};
pub use prettyprint::Tree;
pub use symbol::{Symbol, is_syntactic_name, missing_argument};

/// The string type used for names of symbols, arguments and formals
pub type Name = smartstring::alias::String;

/// An element of the tree
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
  /// A single literal value, e.g. `1`, `"hello"`, `TRUE`, `NULL`
  Constant(Constant),
  /// A name referring to a binding, e.g. `x`, `` `my var` ``
  Symbol(Symbol),
  /// Applying a function to arguments, e.g. `f(1, x = 2)`, `a + b`
  Call(Call),
  /// The declared parameters of a function, e.g. the `x, y = 2` in `function(x, y = 2) x`
  FormalList(FormalList),
}
impl Node {
  /// Create a symbol node from a name
  pub fn symbol(name: &str) -> Self {
    Self::Symbol(Symbol::new(name))
  }

  /// Is this the missing argument?
  #[must_use]
  pub fn is_missing_argument(&self) -> bool {
    matches!(self, Self::Symbol(symbol) if symbol.is_missing_argument())
  }

  /// A short description of the variant, for error messages
  #[must_use]
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Constant(_) => "constant",
      Self::Symbol(symbol) if symbol.is_missing_argument() => "missing argument",
      Self::Symbol(_) => "symbol",
      Self::Call(_) => "call",
      Self::FormalList(_) => "formal list",
    }
  }

  /// The node as a constant, if it is one
  #[must_use]
  pub fn as_constant(&self) -> Option<&Constant> {
    match self {
      Self::Constant(constant) => Some(constant),
      _ => None,
    }
  }

  /// The node as a symbol, if it is one
  #[must_use]
  pub fn as_symbol(&self) -> Option<&Symbol> {
    match self {
      Self::Symbol(symbol) => Some(symbol),
      _ => None,
    }
  }

  /// The node as a call, if it is one
  #[must_use]
  pub fn as_call(&self) -> Option<&Call> {
    match self {
      Self::Call(call) => Some(call),
      _ => None,
    }
  }

  /// The node as a formal list, if it is one
  #[must_use]
  pub fn as_formal_list(&self) -> Option<&FormalList> {
    match self {
      Self::FormalList(formals) => Some(formals),
      _ => None,
    }
  }
}

impl From<Constant> for Node {
  fn from(constant: Constant) -> Self {
    Self::Constant(constant)
  }
}
impl From<Symbol> for Node {
  fn from(symbol: Symbol) -> Self {
    Self::Symbol(symbol)
  }
}
impl From<Call> for Node {
  fn from(call: Call) -> Self {
    Self::Call(call)
  }
}
impl From<FormalList> for Node {
  fn from(formals: FormalList) -> Self {
    Self::FormalList(formals)
  }
}

// trees can be shared between threads
const _: () = {
  const fn thread_safe<T: Send + Sync>() {}
  thread_safe::<Node>();
};
