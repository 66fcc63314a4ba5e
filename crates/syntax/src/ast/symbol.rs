//! # Symbols
//!
//! Names, including the special missing argument.

use super::{Name, Node};
use crate::tokeniser::TokenKind;
use std::fmt;
use std::sync::LazyLock;

/// A name referring to a binding
///
/// Whether the name needs backticks to stand on its own is decided when it is created.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
  name: Name,
  requires_quoting: bool,
  missing: bool,
}
impl Symbol {
  /// Create a symbol from a name
  pub fn new(name: &str) -> Self {
    Self {
      name: name.into(),
      requires_quoting: !is_syntactic_name(name),
      missing: false,
    }
  }

  /// The name of the symbol
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Does the name need wrapping in backticks to be read back as this symbol?
  #[must_use]
  pub fn requires_quoting(&self) -> bool {
    self.requires_quoting
  }

  /// Is this the missing argument, rather than an ordinary name?
  #[must_use]
  pub fn is_missing_argument(&self) -> bool {
    self.missing
  }
}
impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.requires_quoting {
      f.write_str(&super::constant::quote(&self.name, '`'))
    } else {
      f.write_str(&self.name)
    }
  }
}

static MISSING_ARGUMENT: LazyLock<Node> = LazyLock::new(|| {
  Node::Symbol(Symbol {
    name: Name::new(),
    requires_quoting: false,
    missing: true,
  })
});

/// The missing argument, marking an argument or default which has deliberately been left empty.
///
/// It is created on first use and lives for the rest of the process, every call returns the
/// same reference. It is never equal to an ordinary symbol, even one with an empty name.
///
/// ```
/// use sprig_syntax::{Node, missing_argument};
///
/// assert!(std::ptr::eq(missing_argument(), missing_argument()));
/// assert!(missing_argument().is_missing_argument());
/// assert_ne!(missing_argument(), &Node::symbol(""));
/// ```
pub fn missing_argument() -> &'static Node {
  &MISSING_ARGUMENT
}

/// Can the name be written without backticks?
///
/// It must be made of letters, digits, `.` and `_`, start with a letter or a `.` not followed
/// by a digit, and not be a reserved word.
#[must_use]
pub fn is_syntactic_name(name: &str) -> bool {
  let mut characters = name.chars();

  let valid_start = match characters.next() {
    Some('.') => !characters.clone().next().is_some_and(|c| c.is_ascii_digit()),
    Some(c) => c.is_alphabetic(),
    None => false,
  };

  valid_start
    && characters.all(|c| c.is_alphanumeric() || c == '.' || c == '_')
    && TokenKind::keyword(name).is_none()
}
