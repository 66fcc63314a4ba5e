//! Source positions and related helper functions.
//!
//! Spans are only used for diagnostics, they are never stored in a [`Node`](crate::Node).

use std::fmt;

/// A byte range of the source code
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  /// The byte index of the start of the span
  pub start: u32,
  /// The byte index of the end of the span
  pub end: u32,
}

impl Span {
  /// Create a new `Span` from a start and end position
  #[inline]
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// A zero-width `Span` at a position
  #[inline]
  pub const fn at(position: u32) -> Self {
    Self::new(position, position)
  }

  /// Combine two `Span`s into one covering both
  pub fn merge(self, other: Self) -> Self {
    Self::new(self.start.min(other.start), self.end.max(other.end))
  }

  /// The number of bytes covered
  #[must_use]
  pub const fn len(self) -> u32 {
    self.end - self.start
  }

  /// Does the span cover no bytes?
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.start == self.end
  }

  /// Get the source text for a `Span` from a source string
  ///
  /// Returns an empty string if the span is not within the source.
  #[must_use]
  pub fn source_text(self, source: &str) -> &str {
    let start = self.start as usize;
    let end = self.end as usize;

    source.get(start..end).unwrap_or_default()
  }
}
impl fmt::Display for Span {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.start, self.end)
  }
}

type FilePosition = u32;
type LineNumber = usize;

/// Index for looking up line numbers from source positions
///
/// Line numbers given start at 1.
#[must_use]
#[derive(Debug)]
pub struct LineIndex {
  line_starts: Vec<FilePosition>,
  file_length: FilePosition,
}
impl LineIndex {
  /// Create a new `LineIndex` from a source string.
  ///
  /// # Panics
  ///
  /// Panics if the source string is longer than `u32::MAX` bytes.
  pub fn from_source(source: &str) -> Self {
    let file_length = FilePosition::try_from(source.len()).expect("source.len() < u32::MAX");

    let line_starts = std::iter::once(0)
      .chain(
        source
          .bytes()
          .enumerate()
          .filter(|(_, byte)| *byte == b'\n')
          .map(|(index, _)| index as FilePosition + 1),
      )
      .collect();

    Self {
      line_starts,
      file_length,
    }
  }

  /// Get the line number which a `Span` starts on
  #[must_use]
  pub fn line(&self, span: Span) -> LineNumber {
    self.line_of(span.start)
  }

  /// Get the line number which a `Span` ends on
  #[must_use]
  pub fn final_line(&self, span: Span) -> LineNumber {
    self.line_of(span.end)
  }

  /// Get a `Span` for a given line number, including its line ending
  ///
  /// # Panics
  /// Panics if the line number doesn't exist
  pub fn line_span(&self, line: LineNumber) -> Span {
    let start = self.line_starts[line - 1];
    let end = *self.line_starts.get(line).unwrap_or(&self.file_length);

    Span::new(start, end)
  }

  /// The number of lines in the source
  #[must_use]
  pub fn line_count(&self) -> usize {
    self.line_starts.len()
  }

  fn line_of(&self, position: FilePosition) -> LineNumber {
    match self.line_starts.binary_search(&position) {
      Ok(line) => line + 1,
      Err(line) => line,
    }
  }
}
