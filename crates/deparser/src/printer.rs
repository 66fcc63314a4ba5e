//! # Printer
//!
//! Chooses where to break lines, then writes out the text.
//!
//! Based upon the algorithm described by Philip Wadler in
//! [`A prettier printer`](https://homepages.inf.ed.ac.uk/wadler/papers/prettier/prettier.pdf).

use crate::config::{Config, Indentation, LineEnding};
use bumpalo::{Bump as Allocator, boxed::Box, collections::Vec};
use std::{fmt, mem};

/// Builds the layout representation in an arena, then prints it
pub struct Printer<'a> {
  pub(crate) config: Config,
  allocator: &'a Allocator,
}
impl<'a> Printer<'a> {
  pub(crate) fn new(config: Config, allocator: &'a Allocator) -> Self {
    Self { config, allocator }
  }

  /// Decide the line breaks, and write the layout out as a string
  pub(crate) fn print(&self, ir: &IR<'a>) -> String {
    let layout = ir.layout(0, 0, false, self.config, self.allocator);
    layout.to_string()
  }

  /// Text which has been built up, copied into the arena
  pub(crate) fn text(&self, text: &str) -> IR<'a> {
    IR::Text(self.allocator.alloc_str(text))
  }

  /// Lines inside are indented by one more level
  pub(crate) fn indent<const N: usize>(&self, ir: [IR<'a>; N]) -> IR<'a> {
    IR::Indent(Box::new_in(self.concat(ir), self.allocator))
  }

  /// A section which is either on one line, or has all of its lines broken
  pub(crate) fn group<const N: usize>(&self, ir: [IR<'a>; N]) -> IR<'a> {
    IR::Group(Box::new_in(self.concat(ir), self.allocator))
  }

  /// Merge multiple IRs into a single IR
  pub(crate) fn concat<const N: usize>(&self, mut ir: [IR<'a>; N]) -> IR<'a> {
    match N {
      0 => IR::Empty,
      1 => mem::take(&mut ir[0]),
      _ => IR::Concat(Vec::from_iter_in(ir, self.allocator)),
    }
  }

  /// Merge multiple IRs together from an iterator
  pub(crate) fn concat_iterator(&self, ir: impl Iterator<Item = IR<'a>>) -> IR<'a> {
    IR::Concat(Vec::from_iter_in(ir, self.allocator))
  }

  /// Join items with a separator between each one
  pub(crate) fn join(
    &self,
    items: impl IntoIterator<Item = IR<'a>>,
    separator: impl Fn() -> IR<'a>,
  ) -> IR<'a> {
    let mut joined = Vec::new_in(self.allocator);
    for (index, item) in items.into_iter().enumerate() {
      if index > 0 {
        joined.push(separator());
      }
      joined.push(item);
    }
    IR::Concat(joined)
  }
}

/// Representation of the source text, before line breaks are decided
#[derive(Default)]
pub enum IR<'a> {
  /// No content
  #[default]
  Empty,
  /// Text which doesn't contain a line break
  Text(&'a str),
  /// A possible line break, or nothing
  Line,
  /// A possible line break, or a space
  LineOrSpace,
  /// Always a line break
  AlwaysLine,
  /// A combination of multiple IRs
  Concat(Vec<'a, IR<'a>>),
  /// Indent the given IR, if a line break present
  Indent(Box<'a, IR<'a>>),
  /// Mark a section where the line breaks are either all taken, or all skipped
  Group(Box<'a, IR<'a>>),
}
impl<'a> IR<'a> {
  /// Does the IR contain a line break which can't be skipped?
  fn has_always_line(&self) -> bool {
    match self {
      IR::AlwaysLine => true,
      IR::Empty | IR::Text(_) | IR::LineOrSpace | IR::Line => false,
      IR::Concat(items) => items.iter().any(IR::has_always_line),
      IR::Indent(ir) | IR::Group(ir) => ir.has_always_line(),
    }
  }

  /// Decide which line breaks are taken.
  ///
  /// `column` is the length of the current line so far, and `depth` the indentation level.
  fn layout(
    &self,
    column: usize,
    depth: usize,
    flat: bool,
    config: Config,
    allocator: &'a Allocator,
  ) -> Layout<'a> {
    match self {
      IR::Empty => Layout::Empty,
      IR::Text(text) => Layout::Text(text),

      IR::LineOrSpace if flat => Layout::Text(" "),
      IR::Line if flat => Layout::Empty,
      IR::Line | IR::AlwaysLine | IR::LineOrSpace => Layout::Line {
        depth,
        indentation: config.indentation,
        line_ending: config.line_ending,
      },

      IR::Indent(ir) => ir.layout(column, depth + 1, flat, config, allocator),
      IR::Concat(items) => {
        let mut collection = Vec::new_in(allocator);
        let mut column = column;

        for ir in items {
          let layout = ir.layout(column, depth, flat, config, allocator);

          if layout.contains_line() {
            column = layout.last_line_width();
          } else {
            column += layout.width();
          }

          collection.push(layout);
        }

        Layout::Collection(collection)
      }
      IR::Group(ir) => {
        if !ir.has_always_line() {
          let flattened = ir.layout(column, depth, true, config, allocator);
          if flattened.fits(usize::from(config.print_width), column) {
            return flattened;
          }
        }

        ir.layout(column, depth, false, config, allocator)
      }
    }
  }
}
impl fmt::Debug for IR<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Empty => write!(f, "Empty"),
      Self::Text(text) => write!(f, "Text '{text}'"),
      Self::Line => write!(f, "Line"),
      Self::LineOrSpace => write!(f, "LineOrSpace"),
      Self::AlwaysLine => write!(f, "AlwaysLine"),
      Self::Concat(items) => f.debug_list().entries(items).finish(),
      Self::Indent(ir) => f.debug_tuple("Indent").field(ir).finish(),
      Self::Group(ir) => f.debug_tuple("Group").field(ir).finish(),
    }
  }
}

/// The text with line breaks decided, which can directly be printed
#[derive(Debug)]
enum Layout<'a> {
  Empty,
  Text(&'a str),
  Line {
    depth: usize,
    indentation: Indentation,
    line_ending: LineEnding,
  },
  Collection(Vec<'a, Layout<'a>>),
}
impl Layout<'_> {
  /// Will the first line fit in the remaining width?
  fn fits(&self, max_width: usize, column: usize) -> bool {
    column + self.width() <= max_width
  }

  /// The width up to the first line break
  fn width(&self) -> usize {
    match self {
      Layout::Empty => 0,
      Layout::Text(text) => text.chars().count(),
      Layout::Line {
        depth, indentation, ..
      } => indentation.width() * depth,
      Layout::Collection(items) => items
        .iter()
        .take_while(|item| !item.contains_line())
        .map(Layout::width)
        .sum(),
    }
  }

  /// The width of the final line
  fn last_line_width(&self) -> usize {
    match self {
      Layout::Collection(items) => {
        let mut width = 0;
        for item in items.iter().rev() {
          width += item.last_line_width();
          if item.contains_line() {
            break;
          }
        }
        width
      }
      layout => layout.width(),
    }
  }

  fn contains_line(&self) -> bool {
    match self {
      Layout::Line { .. } => true,
      Layout::Collection(items) => items.iter().any(Layout::contains_line),
      Layout::Empty | Layout::Text(_) => false,
    }
  }
}
impl fmt::Display for Layout<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Empty => Ok(()),
      Self::Text(text) => f.write_str(text),
      Self::Line {
        depth,
        indentation,
        line_ending,
      } => {
        f.write_str(line_ending.as_str())?;
        (0..*depth).try_for_each(|_| write!(f, "{indentation}"))
      }
      Self::Collection(items) => items.iter().try_for_each(|item| write!(f, "{item}")),
    }
  }
}
