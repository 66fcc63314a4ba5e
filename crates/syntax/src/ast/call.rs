//! # Calls
//!
//! Every function call, operator, and control form in the tree is a [`Call`].

use super::{Name, Node, symbol::missing_argument};
use crate::construct::ConstructionError;
use thin_vec::ThinVec;

/// Applying a head to a list of arguments
///
/// The head is stored apart from the arguments, so a call always has at least one child.
/// As a sequence of children the head is child `0` and the arguments follow.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
  head: Box<Node>,
  arguments: ThinVec<Argument>,
}
impl Call {
  /// Create a new call.
  ///
  /// # Errors
  /// If the head is not a symbol or a call, or is the missing argument.
  pub fn new(
    head: Node,
    arguments: impl IntoIterator<Item = Argument>,
  ) -> Result<Self, ConstructionError> {
    match &head {
      Node::Symbol(symbol) if !symbol.is_missing_argument() => {}
      Node::Call(_) => {}
      other => {
        return Err(ConstructionError::InvalidHead { kind: other.kind() });
      }
    }

    Ok(Self::new_unchecked(head, arguments))
  }

  /// Create a new call to a function named by a symbol, which is always a valid head
  pub fn named(
    function: &str,
    arguments: impl IntoIterator<Item = Argument>,
  ) -> Self {
    Self::new_unchecked(Node::symbol(function), arguments)
  }

  /// Create a call without checking the head
  pub(crate) fn new_unchecked(head: Node, arguments: impl IntoIterator<Item = Argument>) -> Self {
    Self {
      head: Box::new(head),
      arguments: arguments.into_iter().collect(),
    }
  }

  /// The function being called
  pub fn head(&self) -> &Node {
    &self.head
  }

  /// The name of the function being called, if the head is a symbol
  #[must_use]
  pub fn function_name(&self) -> Option<&str> {
    self.head.as_symbol().map(super::Symbol::name)
  }

  /// Is the head a symbol with the given name?
  #[must_use]
  pub fn is_call_to(&self, name: &str) -> bool {
    self.function_name() == Some(name)
  }

  /// The arguments, in order, excluding the head
  #[must_use]
  pub fn arguments(&self) -> &[Argument] {
    &self.arguments
  }

  /// The argument at a position, starting from `0` for the first argument after the head
  #[must_use]
  pub fn argument(&self, index: usize) -> Option<&Argument> {
    self.arguments.get(index)
  }

  /// The number of arguments, excluding the head
  #[must_use]
  pub fn len(&self) -> usize {
    self.arguments.len()
  }

  /// Does the call have no arguments?
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.arguments.is_empty()
  }

  /// The value of the first argument with the given name
  #[must_use]
  pub fn by_name(&self, name: &str) -> Option<&Node> {
    self
      .arguments
      .iter()
      .find(|argument| argument.name.as_deref() == Some(name))
      .map(|argument| &argument.value)
  }

  /// The name of each argument, `None` for positional arguments
  pub fn names(&self) -> impl Iterator<Item = Option<&str>> {
    self.arguments.iter().map(|argument| argument.name.as_deref())
  }

  /// A new call with a collection of arguments inserted before the argument at `index`.
  ///
  /// An index past the end appends the arguments.
  pub fn splice(&self, index: usize, arguments: impl IntoIterator<Item = Argument>) -> Self {
    let index = index.min(self.arguments.len());

    let mut spliced = ThinVec::with_capacity(self.arguments.len());
    spliced.extend(self.arguments[..index].iter().cloned());
    spliced.extend(arguments);
    spliced.extend(self.arguments[index..].iter().cloned());

    Self {
      head: self.head.clone(),
      arguments: spliced,
    }
  }

  /// A new call with the same head and different arguments
  pub fn with_arguments(&self, arguments: impl IntoIterator<Item = Argument>) -> Self {
    Self::new_unchecked((*self.head).clone(), arguments)
  }

  /// Split the call into its head and arguments
  #[must_use]
  pub fn into_parts(self) -> (Node, ThinVec<Argument>) {
    (*self.head, self.arguments)
  }
}

/// A value passed to a call, optionally with a name
///
/// No name (`None`) is different to an empty name.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
  /// The name of the argument, if it was given as `name = value`
  pub name: Option<Name>,
  /// The value of the argument
  pub value: Node,
}
impl Argument {
  /// An argument without a name
  pub fn positional(value: impl Into<Node>) -> Self {
    Self {
      name: None,
      value: value.into(),
    }
  }

  /// An argument with a name
  pub fn named(name: &str, value: impl Into<Node>) -> Self {
    Self {
      name: Some(name.into()),
      value: value.into(),
    }
  }

  /// An argument which has deliberately been left empty, as in `x[, 1]`
  pub fn missing() -> Self {
    Self::positional(missing_argument().clone())
  }

  /// Is the value the missing argument?
  #[must_use]
  pub fn is_missing(&self) -> bool {
    self.value.is_missing_argument()
  }
}
impl From<Node> for Argument {
  fn from(value: Node) -> Self {
    Self::positional(value)
  }
}
impl From<(&str, Node)> for Argument {
  fn from((name, value): (&str, Node)) -> Self {
    Self::named(name, value)
  }
}
impl From<(Option<&str>, Node)> for Argument {
  fn from((name, value): (Option<&str>, Node)) -> Self {
    Self {
      name: name.map(Name::from),
      value,
    }
  }
}
