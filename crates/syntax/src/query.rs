//! # Query
//!
//! Navigating a tree by the position of children.
//!
//! The children of a call are its head at index `0` followed by its argument values. The
//! children of a formal list are the defaults of each formal. Constants and symbols have no
//! children.

use crate::ast::{Argument, Call, FormalList, Node};
use crate::construct::ConstructionError;
use std::{error, fmt, ops::Range};

/// The indices of children followed from the root to reach a node
pub type Path = Vec<usize>;

impl Node {
  /// The number of children
  ///
  /// ```
  /// use sprig_syntax::parse_single;
  ///
  /// assert_eq!(parse_single("f(a, b)").unwrap().len(), 3);
  /// assert_eq!(parse_single("f()").unwrap().len(), 1);
  /// assert_eq!(parse_single("x").unwrap().len(), 0);
  /// ```
  #[must_use]
  pub fn len(&self) -> usize {
    match self {
      Self::Call(call) => call.len() + 1,
      Self::FormalList(formals) => formals.len(),
      Self::Constant(_) | Self::Symbol(_) => 0,
    }
  }

  /// Does the node have no children?
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The child at an index
  ///
  /// # Errors
  /// If the index is out of bounds.
  pub fn child(&self, index: usize) -> Result<&Node, IndexError> {
    let child = match self {
      Self::Call(call) if index == 0 => Some(call.head()),
      Self::Call(call) => call.argument(index - 1).map(|argument| &argument.value),
      Self::FormalList(formals) => formals.formals().get(index).map(|formal| &formal.default),
      Self::Constant(_) | Self::Symbol(_) => None,
    };

    child.ok_or(IndexError {
      index,
      length: self.len(),
    })
  }

  /// The children, in order
  pub fn children(&self) -> impl Iterator<Item = &Node> {
    let (head, arguments, formals) = match self {
      Self::Call(call) => (Some(call.head()), call.arguments(), &[][..]),
      Self::FormalList(formals) => (None, &[][..], formals.formals()),
      Self::Constant(_) | Self::Symbol(_) => (None, &[][..], &[][..]),
    };

    head
      .into_iter()
      .chain(arguments.iter().map(|argument| &argument.value))
      .chain(formals.iter().map(|formal| &formal.default))
  }

  /// A new node with the child at an index replaced.
  ///
  /// Argument names are kept. Replacing the head of a call checks the new head is valid.
  ///
  /// # Errors
  /// If the index is out of bounds, the node has no children, or the new head is invalid.
  pub fn replace_child(self, index: usize, replacement: Node) -> Result<Node, QueryError> {
    let length = self.len();
    let out_of_bounds = || QueryError::Index(IndexError { index, length });

    match self {
      Self::Call(call) => {
        let (head, mut arguments) = call.into_parts();

        if index == 0 {
          return Ok(Call::new(replacement, arguments)?.into());
        }

        let argument = arguments.get_mut(index - 1).ok_or_else(out_of_bounds)?;
        argument.value = replacement;
        Ok(Call::new_unchecked(head, arguments).into())
      }
      Self::FormalList(formals) => {
        let mut formals = formals.into_formals();

        let formal = formals.get_mut(index).ok_or_else(out_of_bounds)?;
        formal.empty_default &= replacement.is_missing_argument();
        formal.default = replacement;
        Ok(FormalList::new(formals)?.into())
      }
      leaf => Err(QueryError::NotAContainer { kind: leaf.kind() }),
    }
  }

  /// A new node made of a contiguous range of the children.
  ///
  /// For a call, the first child in the range becomes the head (losing its name if it had
  /// one) and the rest keep their names. For a formal list, the formals in the range are kept.
  ///
  /// ```
  /// use sprig_syntax::parse_single;
  ///
  /// let call = parse_single("f(g, x = 1, 2)").unwrap();
  /// assert_eq!(call.slice(1..3).unwrap(), parse_single("g(x = 1)").unwrap());
  /// ```
  ///
  /// # Errors
  /// If the range is out of bounds, a call slice is empty or its head isn't valid, or the node
  /// has no children.
  pub fn slice(&self, range: Range<usize>) -> Result<Node, QueryError> {
    let length = self.len();
    if range.start > range.end || range.end > length {
      return Err(QueryError::Index(IndexError {
        index: range.end.max(range.start),
        length,
      }));
    }

    match self {
      Self::Call(call) => {
        let mut children = std::iter::once(Argument::positional(call.head().clone()))
          .chain(call.arguments().iter().cloned())
          .skip(range.start)
          .take(range.len());

        let head = children.next().ok_or(ConstructionError::MissingHead)?;
        Ok(Call::new(head.value, children)?.into())
      }
      Self::FormalList(formals) => {
        let formals = formals.formals()[range].iter().cloned();
        Ok(FormalList::new(formals)?.into())
      }
      leaf => Err(QueryError::NotAContainer { kind: leaf.kind() }),
    }
  }

  /// Visit every node of the tree, parents before their children.
  ///
  /// Each node is given with the path of child indices from this node.
  ///
  /// ```
  /// use sprig_syntax::{Node, parse_single};
  ///
  /// let tree = parse_single("a + f(b)").unwrap();
  /// let paths: Vec<_> = tree.walk().map(|(path, _)| path).collect();
  ///
  /// assert_eq!(paths, [vec![], vec![0], vec![1], vec![2], vec![2, 0], vec![2, 1]]);
  /// ```
  pub fn walk(&self) -> Walk<'_> {
    Walk {
      stack: vec![(Path::new(), self)],
    }
  }

  /// Every node in the tree matching a predicate, parents before their children
  pub fn find_all<'a>(
    &'a self,
    mut predicate: impl FnMut(&Node) -> bool + 'a,
  ) -> impl Iterator<Item = (Path, &'a Node)> {
    self.walk().filter(move |(_, node)| predicate(node))
  }
}

/// Pre-order iterator over the nodes of a tree, created by [`Node::walk`]
#[derive(Clone, Debug)]
pub struct Walk<'a> {
  stack: Vec<(Path, &'a Node)>,
}
impl<'a> Iterator for Walk<'a> {
  type Item = (Path, &'a Node);

  fn next(&mut self) -> Option<Self::Item> {
    let (path, node) = self.stack.pop()?;

    let children: Vec<_> = node.children().enumerate().collect();
    for (index, child) in children.into_iter().rev() {
      let mut child_path = path.clone();
      child_path.push(index);
      self.stack.push((child_path, child));
    }

    Some((path, node))
  }
}

/// A child index which doesn't exist
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexError {
  /// The index asked for
  pub index: usize,
  /// How many children there are
  pub length: usize,
}
impl fmt::Display for IndexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "index {} is out of bounds for a node with {} children",
      self.index, self.length
    )
  }
}
impl error::Error for IndexError {}

/// An error whilst querying or rewriting a tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
  /// A child index which doesn't exist
  Index(IndexError),
  /// The result would not be a valid node
  Construction(ConstructionError),
  /// The node is a constant or symbol, so has no children
  NotAContainer {
    /// What the node is
    kind: &'static str,
  },
}
impl QueryError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> &'static str {
    match self {
      Self::Index(_) => "Index Out of Bounds",
      Self::Construction(error) => error.title(),
      Self::NotAContainer { .. } => "Not a Container",
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::Index(error) => error.to_string(),
      Self::Construction(error) => error.message(),
      Self::NotAContainer { kind } => format!("a {kind} has no children"),
    }
  }
}
impl fmt::Display for QueryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
impl error::Error for QueryError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Self::Index(error) => Some(error),
      Self::Construction(error) => Some(error),
      Self::NotAContainer { .. } => None,
    }
  }
}
impl From<IndexError> for QueryError {
  fn from(error: IndexError) -> Self {
    Self::Index(error)
  }
}
impl From<ConstructionError> for QueryError {
  fn from(error: ConstructionError) -> Self {
    Self::Construction(error)
  }
}
