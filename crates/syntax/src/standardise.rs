//! # Standardise
//!
//! Rewrite the arguments of a call so that each is named after the formal it matches.
//!
//! Arguments are matched to formals in three passes:
//! 1. names which exactly match a formal
//! 2. names which are a prefix of exactly one remaining formal before `...`
//! 3. unnamed arguments, left to right, into the remaining formals before `...`
//!
//! Anything left over is collected by `...` if there is one.

use crate::ast::{Argument, Call, FormalList, Name};
use std::{error, fmt};
use tracing::trace;

/// Rewrite a call so every argument is named after its formal, in the order of the formals.
///
/// Arguments collected by `...` keep the names they were given.
///
/// ```
/// use sprig_syntax::{parse_single, standardise};
///
/// let call = parse_single("f(1, val = 2, 3)").unwrap();
/// let function = parse_single("function(x, value, y) NULL").unwrap();
/// let formals = function.child(1).unwrap().as_formal_list().unwrap();
///
/// let standardised = standardise(call.as_call().unwrap(), formals).unwrap();
/// assert_eq!(standardised, *parse_single("f(x = 1, value = 2, y = 3)").unwrap().as_call().unwrap());
/// ```
///
/// # Errors
/// If a formal is matched more than once, a partial name matches more than one formal, or an
/// argument can't be matched and there is no `...`.
pub fn standardise(call: &Call, formals: &FormalList) -> Result<Call, StandardisationError> {
  let arguments = call.arguments();
  let dots = formals.dots_position();
  let before_dots = dots.unwrap_or(formals.len());

  let mut matched: Vec<Option<usize>> = vec![None; formals.len()];
  let mut used = vec![false; arguments.len()];

  // Exact names
  for (index, argument) in arguments.iter().enumerate() {
    let Some(name) = &argument.name else { continue };
    let Some(formal) = formals.position(name) else { continue };
    if Some(formal) == dots {
      continue;
    }

    if matched[formal].is_some() {
      return Err(StandardisationError::FormalMatchedMultiple { formal: name.clone() });
    }
    matched[formal] = Some(index);
    used[index] = true;
  }
  let exactly_matched = matched.clone();

  // Partial names
  for (index, argument) in arguments.iter().enumerate() {
    if used[index] {
      continue;
    }
    let Some(name) = argument.name.as_deref().filter(|name| !name.is_empty()) else {
      continue;
    };

    let candidates: Vec<usize> = formals.formals()[..before_dots]
      .iter()
      .enumerate()
      .filter(|(position, formal)| {
        exactly_matched[*position].is_none() && formal.name.starts_with(name)
      })
      .map(|(position, _)| position)
      .collect();

    match candidates.as_slice() {
      [] => {}
      [formal] => {
        if matched[*formal].is_some() {
          return Err(StandardisationError::FormalMatchedMultiple {
            formal: formals.formals()[*formal].name.clone(),
          });
        }
        matched[*formal] = Some(index);
        used[index] = true;
      }
      _ => {
        return Err(StandardisationError::AmbiguousPartialMatch {
          argument: name.into(),
          candidates: candidates
            .iter()
            .map(|position| formals.formals()[*position].name.clone())
            .collect(),
        });
      }
    }
  }

  // Positional
  let unfilled: Vec<usize> = (0..before_dots)
    .filter(|formal| matched[*formal].is_none())
    .collect();
  let mut unfilled = unfilled.into_iter();
  for (index, argument) in arguments.iter().enumerate() {
    if used[index] || argument.name.is_some() {
      continue;
    }
    let Some(formal) = unfilled.next() else { break };

    matched[formal] = Some(index);
    used[index] = true;
  }

  let leftover: Vec<usize> = (0..arguments.len()).filter(|index| !used[*index]).collect();
  if dots.is_none() {
    if let Some(&position) = leftover.first() {
      return Err(StandardisationError::UnusedArgument {
        position,
        name: arguments[position].name.clone(),
      });
    }
  }

  trace!(
    matched = matched.iter().flatten().count(),
    dots = leftover.len(),
    "standardised call"
  );

  let mut standardised = Vec::with_capacity(arguments.len());
  for (position, formal) in formals.formals().iter().enumerate() {
    if Some(position) == dots {
      standardised.extend(leftover.iter().map(|index| arguments[*index].clone()));
    } else if let Some(index) = matched[position] {
      standardised.push(Argument {
        name: Some(formal.name.clone()),
        value: arguments[index].value.clone(),
      });
    }
  }

  Ok(call.with_arguments(standardised))
}

/// An error whilst matching arguments to formals
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StandardisationError {
  /// More than one argument matched the same formal
  FormalMatchedMultiple {
    /// The formal matched more than once
    formal: Name,
  },
  /// A partial name is the prefix of more than one formal
  AmbiguousPartialMatch {
    /// The name given
    argument: Name,
    /// The formals it could match
    candidates: Vec<Name>,
  },
  /// An argument didn't match a formal, and there is no `...` to collect it
  UnusedArgument {
    /// The position of the argument
    position: usize,
    /// The name of the argument, if it had one
    name: Option<Name>,
  },
}
impl StandardisationError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> &'static str {
    match self {
      Self::FormalMatchedMultiple { .. } => "Formal Matched Multiple Times",
      Self::AmbiguousPartialMatch { .. } => "Ambiguous Partial Match",
      Self::UnusedArgument { .. } => "Unused Argument",
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::FormalMatchedMultiple { formal } => {
        format!("formal `{formal}` is matched by more than one argument")
      }
      Self::AmbiguousPartialMatch { argument, candidates } => {
        let candidates: Vec<&str> = candidates.iter().map(Name::as_str).collect();
        format!("`{argument}` could match any of {}", candidates.join(", "))
      }
      Self::UnusedArgument { name: Some(name), .. } => format!("unused argument `{name}`"),
      Self::UnusedArgument { position, name: None } => {
        format!("unused argument at position {position}")
      }
    }
  }
}
impl fmt::Display for StandardisationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
impl error::Error for StandardisationError {}
