//! # Constants
//!
//! Leaves of the tree holding a single literal value.

use super::Name;
use crate::construct::ConstructionError;
use std::fmt;

/// A single literal value
///
/// Never holds more than one element. Doubles are compared by their bit pattern, so `NaN` is
/// equal to itself and `0.0` is not equal to `-0.0`.
#[must_use]
#[derive(Clone, Debug)]
pub enum Constant {
  /// The no value marker, `NULL`
  Null,
  /// `TRUE` or `FALSE`
  Logical(bool),
  /// An integer, e.g. `5L`
  Integer(i32),
  /// A floating point number, e.g. `1.5`, `Inf`
  Double(f64),
  /// A string, e.g. `"hello"`
  String(Name),
}
impl Constant {
  /// Create a constant from a host vector, which must contain exactly one element.
  ///
  /// `Vector::Null` becomes [`Constant::Null`].
  ///
  /// # Errors
  /// If the vector doesn't have one element, or is raw bytes (which can't be in a tree).
  pub fn from_vector(vector: Vector) -> Result<Self, ConstructionError> {
    let length = vector.len();
    let not_scalar = || ConstructionError::NotScalar {
      kind: vector.type_name(),
      length,
    };

    match &vector {
      Vector::Null => Ok(Self::Null),
      Vector::Raw(_) => Err(ConstructionError::UnsupportedConstant {
        kind: vector.type_name(),
      }),
      Vector::Logical(values) => single(values).map(|x| Self::Logical(*x)).ok_or_else(not_scalar),
      Vector::Integer(values) => single(values).map(|x| Self::Integer(*x)).ok_or_else(not_scalar),
      Vector::Double(values) => single(values).map(|x| Self::Double(*x)).ok_or_else(not_scalar),
      Vector::Character(values) => single(values)
        .map(|x| Self::String(x.as_str().into()))
        .ok_or_else(not_scalar),
    }
  }

  /// The name of the type of the constant
  #[must_use]
  pub fn type_name(&self) -> &'static str {
    match self {
      Self::Null => "NULL",
      Self::Logical(_) => "logical",
      Self::Integer(_) => "integer",
      Self::Double(_) => "double",
      Self::String(_) => "character",
    }
  }

  /// Is the constant a number below zero?
  ///
  /// These can't be written directly in source, as a leading `-` is parsed as a call.
  #[must_use]
  pub fn is_negative(&self) -> bool {
    match self {
      Self::Integer(value) => *value < 0,
      Self::Double(value) => value.is_sign_negative() && !value.is_nan(),
      _ => false,
    }
  }
}
impl PartialEq for Constant {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::Null, Self::Null) => true,
      (Self::Logical(a), Self::Logical(b)) => a == b,
      (Self::Integer(a), Self::Integer(b)) => a == b,
      (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
      (Self::String(a), Self::String(b)) => a == b,
      _ => false,
    }
  }
}
impl Eq for Constant {}

impl fmt::Display for Constant {
  /// The canonical literal syntax for the constant
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Null => f.write_str("NULL"),
      Self::Logical(true) => f.write_str("TRUE"),
      Self::Logical(false) => f.write_str("FALSE"),
      Self::Integer(value) => write!(f, "{value}L"),
      Self::Double(value) => f.write_str(&format_double(*value)),
      Self::String(value) => f.write_str(&quote(value, '"')),
    }
  }
}

impl From<bool> for Constant {
  fn from(value: bool) -> Self {
    Self::Logical(value)
  }
}
impl From<i32> for Constant {
  fn from(value: i32) -> Self {
    Self::Integer(value)
  }
}
impl From<f64> for Constant {
  fn from(value: f64) -> Self {
    Self::Double(value)
  }
}
impl From<&str> for Constant {
  fn from(value: &str) -> Self {
    Self::String(value.into())
  }
}
impl From<String> for Constant {
  fn from(value: String) -> Self {
    Self::String(value.into())
  }
}

/// A vector of values from the host, which may be converted into a [`Constant`]
#[derive(Clone, Debug, PartialEq)]
pub enum Vector {
  /// The empty `NULL` value
  Null,
  /// Booleans
  Logical(Vec<bool>),
  /// Integers
  Integer(Vec<i32>),
  /// Floating point numbers
  Double(Vec<f64>),
  /// Strings
  Character(Vec<String>),
  /// Raw bytes
  Raw(Vec<u8>),
}
impl Vector {
  /// The number of elements
  #[must_use]
  pub fn len(&self) -> usize {
    match self {
      Self::Null => 0,
      Self::Logical(values) => values.len(),
      Self::Integer(values) => values.len(),
      Self::Double(values) => values.len(),
      Self::Character(values) => values.len(),
      Self::Raw(values) => values.len(),
    }
  }

  /// Does the vector have no elements?
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The name of the type of the vector
  #[must_use]
  pub fn type_name(&self) -> &'static str {
    match self {
      Self::Null => "NULL",
      Self::Logical(_) => "logical",
      Self::Integer(_) => "integer",
      Self::Double(_) => "double",
      Self::Character(_) => "character",
      Self::Raw(_) => "raw",
    }
  }
}

fn single<T>(values: &[T]) -> Option<&T> {
  match values {
    [value] => Some(value),
    _ => None,
  }
}

/// Format a double so that parsing the text gives back the same value
fn format_double(value: f64) -> String {
  if value.is_nan() {
    return "NaN".into();
  }
  if value.is_infinite() {
    return if value > 0.0 { "Inf" } else { "-Inf" }.into();
  }

  let magnitude = value.abs();
  if magnitude != 0.0 && !(1e-4..1e15).contains(&magnitude) {
    // positive exponents are signed, as in `1e+300`
    let text = format!("{value:e}");
    match text.split_once('e') {
      Some((mantissa, exponent)) if !exponent.starts_with('-') => {
        format!("{mantissa}e+{exponent}")
      }
      _ => text,
    }
  } else {
    format!("{value}")
  }
}

/// Wrap text in a quote character, escaping where needed
#[must_use]
pub fn quote(text: &str, quote: char) -> String {
  let mut quoted = String::with_capacity(text.len() + 2);
  quoted.push(quote);

  for character in text.chars() {
    match character {
      '\\' => quoted.push_str("\\\\"),
      '\n' => quoted.push_str("\\n"),
      '\t' => quoted.push_str("\\t"),
      '\r' => quoted.push_str("\\r"),
      '\0' => quoted.push_str("\\0"),
      c if c == quote => {
        quoted.push('\\');
        quoted.push(c);
      }
      c => quoted.push(c),
    }
  }

  quoted.push(quote);
  quoted
}
