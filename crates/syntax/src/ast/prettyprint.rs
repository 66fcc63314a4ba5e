//! Pretty-print the AST into a human readable format.
//!
//! Based upon this [blog post](https://www.georgevreilly.com/blog/2023/01/24/TreeInRust2PrintingTrees.html)

use super::{Argument, Call, Constant, FormalList, Node, Symbol};
use std::fmt;

/// Displays a sequence of nodes as an indented tree
///
/// ```
/// use sprig_syntax::{Tree, parse};
///
/// let units = parse("f(x)").unwrap();
/// assert_eq!(
///   Tree(&units).to_string(),
///   "├─ Call\n│  ├─ Symbol (f)\n│  ╰─ Symbol (x)\n",
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Tree<'a>(pub &'a [Node]);

impl fmt::Display for Tree<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for node in self.0 {
      node.pretty(f, "", false)?;
    }

    Ok(())
  }
}

const OTHER_CHILD: &str = "│  ";
const OTHER_ENTRY: &str = "├─ ";
const FINAL_CHILD: &str = "   ";
const FINAL_ENTRY: &str = "╰─ ";

trait PrettyPrint {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result;
}

fn connector(last: bool) -> &'static str {
  if last { FINAL_ENTRY } else { OTHER_ENTRY }
}

fn child_prefix(prefix: &str, last: bool) -> String {
  format!("{prefix}{}", if last { FINAL_CHILD } else { OTHER_CHILD })
}

impl PrettyPrint for Node {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    match self {
      Self::Constant(x) => x.pretty(f, prefix, last),
      Self::Symbol(x) => x.pretty(f, prefix, last),
      Self::Call(x) => x.pretty(f, prefix, last),
      Self::FormalList(x) => x.pretty(f, prefix, last),
    }
  }
}
impl PrettyPrint for Constant {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    writeln!(f, "{prefix}{}Constant ({self})", connector(last))
  }
}
impl PrettyPrint for Symbol {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    if self.is_missing_argument() {
      writeln!(f, "{prefix}{}Missing Argument", connector(last))
    } else {
      writeln!(f, "{prefix}{}Symbol ({})", connector(last), self.name())
    }
  }
}
impl PrettyPrint for Call {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    writeln!(f, "{prefix}{}Call", connector(last))?;

    let prefix = child_prefix(prefix, last);
    self.head().pretty(f, &prefix, self.is_empty())?;

    if let Some((final_argument, arguments)) = self.arguments().split_last() {
      for argument in arguments {
        argument.pretty(f, &prefix, false)?;
      }
      final_argument.pretty(f, &prefix, true)?;
    }

    Ok(())
  }
}
impl PrettyPrint for Argument {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    match &self.name {
      Some(name) => {
        writeln!(f, "{prefix}{}Named Argument ({name})", connector(last))?;
        self.value.pretty(f, &child_prefix(prefix, last), true)
      }
      None => self.value.pretty(f, prefix, last),
    }
  }
}
impl PrettyPrint for FormalList {
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    writeln!(f, "{prefix}{}Formals", connector(last))?;

    let prefix = child_prefix(prefix, last);
    for (index, formal) in self.formals().iter().enumerate() {
      let last = index + 1 == self.len();
      let connector = connector(last);

      if formal.has_default() {
        writeln!(f, "{prefix}{connector}Formal ({} =)", formal.name)?;
        formal.default.pretty(f, &child_prefix(&prefix, last), true)?;
      } else if formal.empty_default {
        writeln!(f, "{prefix}{connector}Formal ({} =)", formal.name)?;
      } else {
        writeln!(f, "{prefix}{connector}Formal ({})", formal.name)?;
      }
    }

    Ok(())
  }
}
