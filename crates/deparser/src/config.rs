//! The configuration options for the deparser
use std::fmt;

/// Configuration for the deparser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  /// The width to try to keep lines within
  pub print_width: u16,
  /// The indentation of each nested level, when an argument list or block is broken
  pub indentation: Indentation,
  /// The line ending to use
  pub line_ending: LineEnding,
  /// Quote strings with `'` rather than `"`
  pub single_quotes: bool,
}
impl Default for Config {
  fn default() -> Self {
    Self {
      print_width: 80,
      indentation: Indentation::Space(4),
      line_ending: LineEnding::LineFeed,
      single_quotes: false,
    }
  }
}
impl Config {
  /// The character strings are quoted with
  #[must_use]
  pub fn quote(self) -> char {
    if self.single_quotes { '\'' } else { '"' }
  }
}

/// The indentation to use when printing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indentation {
  /// Use this number of spaces for indentation
  Space(u16),
  /// Use tabs for indentation
  Tab,
}
impl Indentation {
  /// The width of a single level, a tab counts as four columns
  pub(crate) fn width(self) -> usize {
    match self {
      Self::Space(n) => usize::from(n),
      Self::Tab => 4,
    }
  }
}
impl From<u16> for Indentation {
  /// The number of spaces to use for indentation. If 0 use tabs.
  fn from(n: u16) -> Self {
    if n == 0 { Self::Tab } else { Self::Space(n) }
  }
}
impl fmt::Display for Indentation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Space(n) => (0..*n).try_for_each(|_| f.write_str(" ")),
      Self::Tab => f.write_str("\t"),
    }
  }
}

/// The line ending placed between lines and after each unit
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum LineEnding {
  /// Line Feed only (\n)
  #[default]
  LineFeed,
  /// Carriage Return + Line Feed characters (\r\n)
  CarriageReturnLineFeed,
}
impl LineEnding {
  pub(crate) const fn as_str(self) -> &'static str {
    match self {
      Self::LineFeed => "\n",
      Self::CarriageReturnLineFeed => "\r\n",
    }
  }
}
