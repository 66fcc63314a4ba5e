//! # Driver
//!
//! Visit each top-level unit of a source text in order, handing it to an external evaluator.

use crate::{ast::Name, parser::ParseError};
use std::{error, fmt};
use tracing::{debug, trace};

/// Something which consumes the units of a source text, one at a time
pub trait Evaluator {
  /// The state shared between units
  type Environment;
  /// The result of a unit
  type Value;
  /// An error whilst evaluating a unit
  type Error;

  /// Evaluate a single unit.
  ///
  /// # Errors
  /// Whatever the evaluator considers an error, it stops the run.
  fn evaluate(
    &mut self,
    unit: &crate::Node,
    environment: &mut Self::Environment,
  ) -> Result<Self::Value, Self::Error>;
}

/// The result of visiting every unit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<V> {
  /// There were no units
  Empty,
  /// The value of the final unit
  Value(V),
}
impl<V> Outcome<V> {
  /// The value, if there was one
  pub fn value(self) -> Option<V> {
    match self {
      Self::Empty => None,
      Self::Value(value) => Some(value),
    }
  }
}

/// Parse a source text, then evaluate each unit in order.
///
/// Nothing is evaluated unless the whole source parses. The first evaluation error stops the
/// run, and later units are not visited.
///
/// ```
/// use sprig_syntax::{Evaluator, Node, Outcome, run};
///
/// struct Count;
/// impl Evaluator for Count {
///   type Environment = usize;
///   type Value = usize;
///   type Error = ();
///
///   fn evaluate(&mut self, _: &Node, seen: &mut usize) -> Result<usize, ()> {
///     *seen += 1;
///     Ok(*seen)
///   }
/// }
///
/// let mut seen = 0;
/// assert_eq!(run("a\nb; c", &mut Count, &mut seen).unwrap(), Outcome::Value(3));
/// assert_eq!(run("", &mut Count, &mut seen).unwrap(), Outcome::Empty);
/// ```
///
/// # Errors
/// If the source doesn't parse, or the evaluator returns an error.
pub fn run<E: Evaluator>(
  source: &str,
  evaluator: &mut E,
  environment: &mut E::Environment,
) -> Result<Outcome<E::Value>, DriverError<E::Error>> {
  let units = crate::parse(source).map_err(DriverError::Parse)?;
  trace!(units = units.len(), "parsed source");

  let mut outcome = Outcome::Empty;
  for (index, unit) in units.iter().enumerate() {
    debug!(unit = index, "evaluating unit");

    match evaluator.evaluate(unit, environment) {
      Ok(value) => outcome = Outcome::Value(value),
      Err(error) => {
        debug!(unit = index, "evaluation failed");
        return Err(DriverError::Evaluation { unit: index, error });
      }
    }
  }

  Ok(outcome)
}

/// An error whilst running a source text
#[derive(Clone, Debug, PartialEq)]
pub enum DriverError<E> {
  /// The source failed to parse, so nothing was evaluated
  Parse(ParseError),
  /// A unit failed to evaluate
  Evaluation {
    /// The index of the unit, starting from `0`
    unit: usize,
    /// The error from the evaluator
    error: E,
  },
}
impl<E: fmt::Display> fmt::Display for DriverError<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Parse(error) => write!(f, "{}: {}", error.title(), error.message()),
      Self::Evaluation { unit, error } => write!(f, "unit {unit} failed: {error}"),
    }
  }
}
impl<E: fmt::Debug + fmt::Display> error::Error for DriverError<E> {}

/// The error an evaluator raises when a binding holding the missing argument is read
///
/// The tree only represents missing arguments, it is up to an evaluator to reject their use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingArgumentError {
  /// The name of the binding which was read
  pub name: Name,
}
impl fmt::Display for MissingArgumentError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "argument `{}` is missing, with no default", self.name)
  }
}
impl error::Error for MissingArgumentError {}
