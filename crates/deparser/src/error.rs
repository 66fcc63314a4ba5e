use sprig_syntax::Path;
use std::{error, fmt};

/// A tree which has no source text that parses back into it
///
/// Each variant carries the path of child indices from the root to the offending node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructuralError {
  /// The missing argument somewhere other than an argument or a default
  MissingArgumentOutsideArgument {
    /// Where the missing argument is
    path: Path,
  },
  /// A formal list which isn't the formals of a `function`, or the node being deparsed
  MisplacedFormalList {
    /// Where the formal list is
    path: Path,
  },
  /// An ordinary symbol with no name
  EmptySymbol {
    /// Where the symbol is
    path: Path,
  },
  /// A call whose only argument is unnamed and missing, which can't be told apart from no
  /// arguments
  LoneMissingArgument {
    /// Where the argument is
    path: Path,
  },
}
impl StructuralError {
  /// The path from the root to the offending node
  #[must_use]
  pub fn path(&self) -> &[usize] {
    match self {
      Self::MissingArgumentOutsideArgument { path }
      | Self::MisplacedFormalList { path }
      | Self::EmptySymbol { path }
      | Self::LoneMissingArgument { path } => path,
    }
  }

  /// Get the title of the error
  #[must_use]
  pub fn title(&self) -> &'static str {
    match self {
      Self::MissingArgumentOutsideArgument { .. } => "Missing Argument Outside Argument",
      Self::MisplacedFormalList { .. } => "Misplaced Formal List",
      Self::EmptySymbol { .. } => "Empty Symbol",
      Self::LoneMissingArgument { .. } => "Lone Missing Argument",
    }
  }

  /// Get the message of the error
  #[must_use]
  pub fn message(&self) -> String {
    let problem = match self {
      Self::MissingArgumentOutsideArgument { .. } => {
        "the missing argument can only be an argument or a default"
      }
      Self::MisplacedFormalList { .. } => "a formal list can only be the formals of a function",
      Self::EmptySymbol { .. } => "a symbol must have a name",
      Self::LoneMissingArgument { .. } => {
        "a single unnamed missing argument would be read back as no arguments"
      }
    };

    let path = self.path();
    if path.is_empty() {
      format!("{problem} (at the root)")
    } else {
      let path = path.iter().map(usize::to_string).collect::<Vec<_>>();
      format!("{problem} (at [{}])", path.join(", "))
    }
  }
}
impl fmt::Display for StructuralError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.title(), self.message())
  }
}
impl error::Error for StructuralError {}
