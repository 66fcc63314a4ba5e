//! # Nodes
//!
//! Turns a tree into the layout representation.
//!
//! Operator and control flow calls are written in their own syntax when the call has the
//! right shape for it, with parentheses added wherever the parser would otherwise read the
//! text as a different tree. Any other call is written as `head(arguments)`.

use crate::error::StructuralError;
use crate::printer::{IR, Printer};
use sprig_syntax::{
  Argument, Associativity, BinaryOperator, Call, Constant, FormalList, Node, Path, Precedence,
  Symbol, UnaryOperator, quote,
};

/// How text behaves when more text is written around it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Shape {
  /// The loosest binary operator at the top level of the text
  precedence: Precedence,
  /// An operator at least this tight, written straight after, would be read into the text
  open: Option<Precedence>,
  /// Ends with an `if` which has no `else`
  dangling_if: bool,
  /// Is an `=` assignment
  equals: bool,
}
impl Shape {
  /// Nothing written after it can be read into it
  const CLOSED: Self = Self {
    precedence: Precedence::Postfix,
    open: None,
    dangling_if: false,
    equals: false,
  };

  /// Starts with a keyword or prefix operator, and ends with an operand read at a precedence
  fn prefix(operand: Precedence, last: Shape) -> Self {
    Self {
      precedence: Precedence::Postfix,
      open: Some(tightest_open(operand, last.open)),
      dangling_if: last.dangling_if,
      equals: false,
    }
  }
}

/// Out of the operand's precedence and the operand's own open end, the one which reads more
fn tightest_open(operand: Precedence, open: Option<Precedence>) -> Precedence {
  open.map_or(operand, |open| open.min(operand))
}

/// Where text is being written, and what the parser expects to find there
#[derive(Clone, Copy, Debug)]
struct Position {
  /// The loosest binary operator which can be written without parentheses
  precedence: Precedence,
  /// The operator written straight after
  followed_by: Option<Precedence>,
  /// Is an `else` written straight after?
  before_else: bool,
  /// Is `=` an assignment here, rather than naming an argument?
  equals_allowed: bool,
}
impl Position {
  /// A whole unit, or a statement of a block
  const STATEMENT: Self = Self {
    precedence: Precedence::Lowest,
    followed_by: None,
    before_else: false,
    equals_allowed: true,
  };

  /// An argument, default or condition
  const BRACKETED: Self = Self {
    equals_allowed: false,
    ..Self::STATEMENT
  };

  /// The function being called, or the object being indexed
  const CALLEE: Self = Self {
    precedence: Precedence::Member,
    followed_by: Some(Precedence::Postfix),
    before_else: false,
    equals_allowed: true,
  };

  /// The body of a function or control flow, which reads as far as it can
  fn body(self) -> Self {
    Self {
      equals_allowed: self.equals_allowed,
      ..Self::STATEMENT
    }
  }

  /// An operand of an operator
  fn operand(self, precedence: Precedence, followed_by: Option<Precedence>) -> Self {
    Self {
      precedence,
      followed_by,
      before_else: false,
      equals_allowed: self.equals_allowed,
    }
  }

  fn needs_parentheses(self, shape: Shape) -> bool {
    let reads_follower = match (self.followed_by, shape.open) {
      (Some(follower), Some(open)) => follower >= open,
      _ => false,
    };

    shape.precedence < self.precedence
      || reads_follower
      || (shape.equals && !self.equals_allowed)
      || (shape.dangling_if && self.before_else)
  }
}

struct Rendered<'a> {
  ir: IR<'a>,
  shape: Shape,
}
impl<'a> Rendered<'a> {
  fn closed(ir: IR<'a>) -> Self {
    Self {
      ir,
      shape: Shape::CLOSED,
    }
  }
}

/// Renders nodes, tracking the path to the current node for errors
pub(crate) struct Deparser<'a> {
  printer: Printer<'a>,
  path: Path,
}
impl<'a> Deparser<'a> {
  pub(crate) fn new(printer: Printer<'a>) -> Self {
    Self {
      printer,
      path: Path::new(),
    }
  }

  pub(crate) fn print(&self, ir: &IR<'a>) -> String {
    self.printer.print(ir)
  }

  /// Render a node which isn't part of a larger tree.
  ///
  /// Errors have `path` in front of the path within the node.
  pub(crate) fn root(&mut self, node: &Node, path: Path) -> Result<IR<'a>, StructuralError> {
    self.path = path;

    match node {
      Node::FormalList(formals) => {
        let formals = self.formals(formals)?;
        Ok(self.printer.group([formals]))
      }
      node => Ok(self.node(node, Position::STATEMENT)?.ir),
    }
  }

  fn at(&self) -> Path {
    self.path.clone()
  }

  fn child(
    &mut self,
    index: usize,
    node: &Node,
    position: Position,
  ) -> Result<Rendered<'a>, StructuralError> {
    self.path.push(index);
    let rendered = self.node(node, position);
    self.path.pop();
    rendered
  }

  fn node(&mut self, node: &Node, position: Position) -> Result<Rendered<'a>, StructuralError> {
    let rendered = match node {
      Node::Constant(constant) => self.constant(constant),
      Node::Symbol(symbol) => Rendered::closed(self.symbol(symbol)?),
      Node::Call(call) => self.call(call, position)?,
      Node::FormalList(_) => return Err(StructuralError::MisplacedFormalList { path: self.at() }),
    };

    if position.needs_parentheses(rendered.shape) {
      let ir = self
        .printer
        .concat([IR::Text("("), rendered.ir, IR::Text(")")]);
      Ok(Rendered::closed(ir))
    } else {
      Ok(rendered)
    }
  }

  fn constant(&self, constant: &Constant) -> Rendered<'a> {
    let text = match constant {
      Constant::String(text) => quote(text, self.printer.config.quote()),
      constant => constant.to_string(),
    };

    // a negative number is read back as a negation
    let shape = if text.starts_with('-') {
      Shape::prefix(UnaryOperator::Negate.operand_precedence(), Shape::CLOSED)
    } else {
      Shape::CLOSED
    };

    Rendered {
      ir: self.printer.text(&text),
      shape,
    }
  }

  fn symbol(&self, symbol: &Symbol) -> Result<IR<'a>, StructuralError> {
    if symbol.is_missing_argument() {
      return Err(StructuralError::MissingArgumentOutsideArgument { path: self.at() });
    }
    if symbol.name().is_empty() {
      return Err(StructuralError::EmptySymbol { path: self.at() });
    }

    Ok(self.printer.text(&symbol.to_string()))
  }

  fn call(&mut self, call: &Call, position: Position) -> Result<Rendered<'a>, StructuralError> {
    if let Some(rendered) = self.special_form(call, position)? {
      return Ok(rendered);
    }

    let head = self.child(0, call.head(), Position::CALLEE)?;

    if matches!(
      call.arguments(),
      [argument] if argument.name.is_none() && argument.is_missing()
    ) {
      let mut path = self.at();
      path.push(1);
      return Err(StructuralError::LoneMissingArgument { path });
    }

    if call.is_empty() {
      return Ok(Rendered::closed(
        self.printer.concat([head.ir, IR::Text("()")]),
      ));
    }

    let arguments = self.arguments(call.arguments(), 1)?;
    Ok(Rendered::closed(self.bracketed(head.ir, "(", arguments, ")")))
  }

  /// Write the call with operator or keyword syntax, if it has the shape for it
  fn special_form(
    &mut self,
    call: &Call,
    position: Position,
  ) -> Result<Option<Rendered<'a>>, StructuralError> {
    let Some(name) = call.function_name() else {
      return Ok(None);
    };
    let arguments = call.arguments();

    if matches!(name, "[" | "[[") {
      return match arguments {
        [object, _, ..] if object.name.is_none() && !object.is_missing() => {
          self.index(name, &object.value, &arguments[1..]).map(Some)
        }
        _ => Ok(None),
      };
    }

    let plain = arguments
      .iter()
      .all(|argument| argument.name.is_none() && !argument.is_missing());
    if !plain {
      return Ok(None);
    }

    let rendered = match (name, arguments) {
      ("function", [formals, body]) => match &formals.value {
        Node::FormalList(formals) => self.function(formals, &body.value, position)?,
        _ => return Ok(None),
      },
      ("if", [condition, then]) => self.if_(&condition.value, &then.value, None, position)?,
      ("if", [condition, then, otherwise]) => self.if_(
        &condition.value,
        &then.value,
        Some(&otherwise.value),
        position,
      )?,
      ("for", [variable, sequence, body]) => match &variable.value {
        Node::Symbol(variable) if !variable.is_missing_argument() && !variable.name().is_empty() => {
          self.for_(variable, &sequence.value, &body.value, position)?
        }
        _ => return Ok(None),
      },
      ("while", [condition, body]) => self.while_(&condition.value, &body.value, position)?,
      ("repeat", [body]) => {
        let body = self.child(1, &body.value, position.body())?;
        Rendered {
          shape: Shape::prefix(Precedence::Lowest, body.shape),
          ir: self.printer.concat([IR::Text("repeat "), body.ir]),
        }
      }
      ("break" | "next", []) => Rendered::closed(self.printer.text(name)),
      ("{", statements) => self.block(statements)?,

      (name, [operand]) => match UnaryOperator::from_name(name) {
        Some(operator) => self.unary(operator, &operand.value, position)?,
        None => return Ok(None),
      },
      (name, [left, right]) => match BinaryOperator::from_name(name) {
        Some(operator) => {
          return self.binary(operator, name, &left.value, &right.value, position);
        }
        None => return Ok(None),
      },
      _ => return Ok(None),
    };

    Ok(Some(rendered))
  }

  fn unary(
    &mut self,
    operator: UnaryOperator,
    operand: &Node,
    position: Position,
  ) -> Result<Rendered<'a>, StructuralError> {
    let precedence = operator.operand_precedence();
    let operand = self.child(1, operand, position.operand(precedence, None))?;

    Ok(Rendered {
      ir: self.printer.concat([IR::Text(operator.as_str()), operand.ir]),
      shape: Shape::prefix(precedence, operand.shape),
    })
  }

  fn binary(
    &mut self,
    operator: BinaryOperator,
    name: &str,
    left: &Node,
    right: &Node,
    position: Position,
  ) -> Result<Option<Rendered<'a>>, StructuralError> {
    let precedence = operator.precedence();
    let position = Position {
      equals_allowed: position.equals_allowed || operator == BinaryOperator::EqualAssign,
      ..position
    };

    if matches!(operator, BinaryOperator::Dollar | BinaryOperator::At) {
      return self.member(name, left, right, position);
    }

    let left_precedence = match operator.associativity() {
      Associativity::Left => precedence,
      Associativity::Right | Associativity::None => precedence.next(),
    };
    let left = self.child(1, left, position.operand(left_precedence, Some(precedence)))?;
    let right_precedence = operator.right_precedence();
    let right = self.child(2, right, position.operand(right_precedence, None))?;

    let spelling = match operator.as_str() {
      Some(spelling) => IR::Text(spelling),
      None => self.printer.text(name),
    };
    let ir = if operator.is_spaced() {
      self
        .printer
        .concat([left.ir, IR::Text(" "), spelling, IR::Text(" "), right.ir])
    } else {
      self.printer.concat([left.ir, spelling, right.ir])
    };

    Ok(Some(Rendered {
      ir,
      shape: Shape {
        precedence,
        open: Some(tightest_open(right_precedence, right.shape.open)),
        dangling_if: right.shape.dangling_if,
        equals: operator == BinaryOperator::EqualAssign,
      },
    }))
  }

  /// `x$name` and `x@name`, where the name is read as a single token
  fn member(
    &mut self,
    name: &str,
    object: &Node,
    member: &Node,
    position: Position,
  ) -> Result<Option<Rendered<'a>>, StructuralError> {
    let Node::Symbol(member) = member else {
      return Ok(None);
    };
    if member.is_missing_argument() || member.name().is_empty() {
      return Ok(None);
    }

    let object_position = position.operand(Precedence::Member, Some(Precedence::Member));
    let object = self.child(1, object, object_position)?;
    let ir = self.printer.concat([
      object.ir,
      self.printer.text(name),
      self.printer.text(&member.to_string()),
    ]);

    Ok(Some(Rendered {
      ir,
      shape: Shape {
        precedence: Precedence::Member,
        ..Shape::CLOSED
      },
    }))
  }

  fn index(
    &mut self,
    name: &str,
    object: &Node,
    indices: &[Argument],
  ) -> Result<Rendered<'a>, StructuralError> {
    let object = self.child(1, object, Position::CALLEE)?;
    let indices = self.arguments(indices, 2)?;

    let (opening, closing) = if name == "[[" { ("[[", "]]") } else { ("[", "]") };
    Ok(Rendered::closed(
      self.bracketed(object.ir, opening, indices, closing),
    ))
  }

  /// Comma separated arguments, where the first is the child at index `first`
  fn arguments(
    &mut self,
    arguments: &[Argument],
    first: usize,
  ) -> Result<IR<'a>, StructuralError> {
    let mut rendered = Vec::with_capacity(arguments.len());

    for (index, argument) in arguments.iter().enumerate() {
      let value = if argument.is_missing() {
        IR::Empty
      } else {
        self
          .child(first + index, &argument.value, Position::BRACKETED)?
          .ir
      };

      rendered.push(match &argument.name {
        Some(name) => self
          .printer
          .concat([self.printer.text(&name_text(name)), IR::Text(" = "), value]),
        None => value,
      });
    }

    Ok(self.separated(rendered))
  }

  /// Items separated by commas, broken onto their own lines if they don't fit
  fn separated(&self, items: Vec<IR<'a>>) -> IR<'a> {
    self.printer.join(items, || {
      self.printer.concat([IR::Text(","), IR::LineOrSpace])
    })
  }

  fn bracketed(
    &self,
    before: IR<'a>,
    opening: &'static str,
    contents: IR<'a>,
    closing: &'static str,
  ) -> IR<'a> {
    self.printer.group([
      before,
      IR::Text(opening),
      self.printer.indent([IR::Line, contents]),
      IR::Line,
      IR::Text(closing),
    ])
  }

  /// The formals of a function, also used for a formal list on its own
  fn formals(&mut self, formals: &FormalList) -> Result<IR<'a>, StructuralError> {
    let mut rendered = Vec::with_capacity(formals.len());

    for (index, formal) in formals.formals().iter().enumerate() {
      let name = self.printer.text(&name_text(&formal.name));

      rendered.push(if formal.has_default() {
        let default = self.child(index, &formal.default, Position::BRACKETED)?;
        self.printer.concat([name, IR::Text(" = "), default.ir])
      } else if formal.empty_default {
        self.printer.concat([name, IR::Text(" = ")])
      } else {
        name
      });
    }

    Ok(self.separated(rendered))
  }

  fn function(
    &mut self,
    formals: &FormalList,
    body: &Node,
    position: Position,
  ) -> Result<Rendered<'a>, StructuralError> {
    self.path.push(1);
    let formals_ir = self.formals(formals);
    self.path.pop();
    let formals_ir = formals_ir?;

    let body = self.child(2, body, position.body())?;

    let signature = if formals.is_empty() {
      IR::Text("function()")
    } else {
      self.bracketed(IR::Text("function"), "(", formals_ir, ")")
    };

    Ok(Rendered {
      ir: self.printer.concat([signature, IR::Text(" "), body.ir]),
      shape: Shape::prefix(Precedence::Lowest, body.shape),
    })
  }

  fn if_(
    &mut self,
    condition: &Node,
    then: &Node,
    otherwise: Option<&Node>,
    position: Position,
  ) -> Result<Rendered<'a>, StructuralError> {
    let condition = self.child(1, condition, Position::BRACKETED)?;
    let then_position = Position {
      before_else: otherwise.is_some(),
      ..position.body()
    };
    let then = self.child(2, then, then_position)?;

    let Some(otherwise) = otherwise else {
      let ir = self
        .printer
        .concat([IR::Text("if ("), condition.ir, IR::Text(") "), then.ir]);
      let shape = Shape {
        dangling_if: true,
        ..Shape::prefix(Precedence::Lowest, then.shape)
      };
      return Ok(Rendered { ir, shape });
    };

    let otherwise = self.child(3, otherwise, position.body())?;
    Ok(Rendered {
      ir: self.printer.concat([
        IR::Text("if ("),
        condition.ir,
        IR::Text(") "),
        then.ir,
        IR::Text(" else "),
        otherwise.ir,
      ]),
      shape: Shape::prefix(Precedence::Lowest, otherwise.shape),
    })
  }

  fn for_(
    &mut self,
    variable: &Symbol,
    sequence: &Node,
    body: &Node,
    position: Position,
  ) -> Result<Rendered<'a>, StructuralError> {
    let sequence = self.child(2, sequence, Position::BRACKETED)?;
    let body = self.child(3, body, position.body())?;

    Ok(Rendered {
      ir: self.printer.concat([
        IR::Text("for ("),
        self.printer.text(&variable.to_string()),
        IR::Text(" in "),
        sequence.ir,
        IR::Text(") "),
        body.ir,
      ]),
      shape: Shape::prefix(Precedence::Lowest, body.shape),
    })
  }

  fn while_(
    &mut self,
    condition: &Node,
    body: &Node,
    position: Position,
  ) -> Result<Rendered<'a>, StructuralError> {
    let condition = self.child(1, condition, Position::BRACKETED)?;
    let body = self.child(2, body, position.body())?;

    Ok(Rendered {
      ir: self.printer.concat([
        IR::Text("while ("),
        condition.ir,
        IR::Text(") "),
        body.ir,
      ]),
      shape: Shape::prefix(Precedence::Lowest, body.shape),
    })
  }

  /// `{` always puts each statement on its own line
  fn block(&mut self, statements: &[Argument]) -> Result<Rendered<'a>, StructuralError> {
    if statements.is_empty() {
      return Ok(Rendered::closed(IR::Text("{}")));
    }

    let mut lines = Vec::with_capacity(statements.len());
    for (index, statement) in statements.iter().enumerate() {
      let statement = self.child(index + 1, &statement.value, Position::STATEMENT)?;
      lines.push(self.printer.concat([IR::AlwaysLine, statement.ir]));
    }

    Ok(Rendered::closed(self.printer.concat([
      IR::Text("{"),
      self.printer.indent([self.printer.concat_iterator(lines.into_iter())]),
      IR::AlwaysLine,
      IR::Text("}"),
    ])))
  }
}

/// An argument or formal name, quoted when it isn't a valid bare name
fn name_text(name: &str) -> String {
  if name.is_empty() {
    quote(name, '"')
  } else {
    Symbol::new(name).to_string()
  }
}
