//! # Formals
//!
//! The declared parameters of a function.

use super::{Name, Node, symbol::missing_argument};
use crate::construct::ConstructionError;
use thin_vec::ThinVec;

/// A parameter, with its default value
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Formal {
  /// The name of the parameter
  pub name: Name,
  /// The default value, the missing argument if there is none
  pub default: Node,
  /// Was the default written but left empty, as in `x = `?
  pub empty_default: bool,
}
impl Formal {
  /// A formal with an optional default value
  pub fn new(name: &str, default: Option<Node>) -> Self {
    Self {
      name: name.into(),
      default: default.unwrap_or_else(|| missing_argument().clone()),
      empty_default: false,
    }
  }

  /// A formal with a default explicitly given as empty, written `x = `
  pub fn with_empty_default(name: &str) -> Self {
    Self {
      name: name.into(),
      default: missing_argument().clone(),
      empty_default: true,
    }
  }

  /// Does the formal have a default value?
  #[must_use]
  pub fn has_default(&self) -> bool {
    !self.default.is_missing_argument()
  }

  /// Is this the `...` formal, which collects any unmatched arguments?
  #[must_use]
  pub fn is_dots(&self) -> bool {
    self.name == "..."
  }
}

/// The ordered list of formals of a function
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormalList {
  formals: ThinVec<Formal>,
}
impl FormalList {
  /// Create a formal list.
  ///
  /// # Errors
  /// If a name is empty, or the same name is used twice.
  pub fn new(formals: impl IntoIterator<Item = Formal>) -> Result<Self, ConstructionError> {
    let formals: ThinVec<Formal> = formals.into_iter().collect();

    for (index, formal) in formals.iter().enumerate() {
      if formal.name.is_empty() {
        return Err(ConstructionError::EmptyFormalName { position: index });
      }

      if formals[..index].iter().any(|other| other.name == formal.name) {
        return Err(ConstructionError::DuplicateFormal {
          name: formal.name.clone(),
        });
      }
    }

    Ok(Self { formals })
  }

  /// Create a formal list which is already known to have unique, non-empty names
  pub(crate) fn new_unchecked(formals: ThinVec<Formal>) -> Self {
    Self { formals }
  }

  /// The formals, in order
  #[must_use]
  pub fn formals(&self) -> &[Formal] {
    &self.formals
  }

  /// The number of formals
  #[must_use]
  pub fn len(&self) -> usize {
    self.formals.len()
  }

  /// Are there no formals?
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.formals.is_empty()
  }

  /// The position of the formal with a name
  #[must_use]
  pub fn position(&self, name: &str) -> Option<usize> {
    self.formals.iter().position(|formal| formal.name == name)
  }

  /// The formal with a name
  #[must_use]
  pub fn find(&self, name: &str) -> Option<&Formal> {
    self.formals.iter().find(|formal| formal.name == name)
  }

  /// The names of the formals, in order
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.formals.iter().map(|formal| formal.name.as_str())
  }

  /// The position of the `...` formal, if there is one
  #[must_use]
  pub fn dots_position(&self) -> Option<usize> {
    self.formals.iter().position(Formal::is_dots)
  }

  pub(crate) fn into_formals(self) -> ThinVec<Formal> {
    self.formals
  }
}
