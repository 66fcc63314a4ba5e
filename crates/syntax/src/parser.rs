use crate::{
  ast::{Argument, Call, Constant, Formal, FormalList, Name, Node, Symbol, missing_argument},
  operator::{BinaryOperator, Precedence, UnaryOperator},
  span::Span,
  tokeniser::{LexError, Token, TokenKind, Tokeniser, unescape},
};
use std::{error, fmt, iter, mem};
use thin_vec::{ThinVec, thin_vec};
use tracing::trace;

/// The kind of bracket the parser is currently inside
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delimiter {
  /// `(`, newlines are ignored
  Paren,
  /// `[` or `[[`, newlines are ignored
  Bracket,
  /// `{`, newlines separate statements
  Brace,
}

pub struct Parser<'source> {
  source: &'source str,
  tokeniser: Tokeniser<'source>,

  /// The current token
  current: Token,
  /// A token read ahead of the current token by [`Parser::peek`]
  lookahead: Option<Token>,
  /// Has the first token been read?
  primed: bool,

  /// The brackets surrounding the current token, innermost last
  delimiters: Vec<Delimiter>,
  /// Can `=` be used as an operator here, or does it only name arguments?
  equals_allowed: bool,
  /// If the last token was a newline, and was skipped over looking for an `else`
  skipped_newline: bool,
}
impl<'source> Parser<'source> {
  pub fn new(source: &'source str) -> Self {
    Self {
      source,
      tokeniser: Tokeniser::from(source),
      current: Token::default(),
      lookahead: None,
      primed: false,
      delimiters: Vec::new(),
      equals_allowed: true,
      skipped_newline: false,
    }
  }

  /// Parse the next top-level unit, or `None` if the source is finished
  pub fn next_unit(&mut self) -> Result<Option<Node>, ParseError> {
    if !self.primed {
      self.primed = true;
      self.advance()?;
    }

    self.skip_separators()?;
    if self.current.kind == TokenKind::EndOfFile {
      return Ok(None);
    }

    let start = self.current.start;
    let unit = self.expression(Precedence::Lowest)?;

    match self.current.kind {
      TokenKind::EndOfLine | TokenKind::Semicolon | TokenKind::EndOfFile => {}
      _ if self.skipped_newline => {}
      _ => return Err(ParseError::UnexpectedToken(self.current)),
    }

    trace!(start, end = self.current.start, "parsed unit");
    Ok(Some(unit))
  }

  /// Parse a source which must contain exactly one unit
  pub fn single(mut self) -> Result<Node, ParseError> {
    let Some(unit) = self.next_unit()? else {
      return Err(ParseError::UnexpectedEndOfInput(self.current));
    };

    self.skip_separators()?;
    if self.current.kind != TokenKind::EndOfFile {
      return Err(ParseError::UnexpectedToken(self.current));
    }

    Ok(unit)
  }

  fn ignoring_newlines(&self) -> bool {
    matches!(
      self.delimiters.last(),
      Some(Delimiter::Paren | Delimiter::Bracket)
    )
  }

  fn fetch(&mut self) -> Result<Token, ParseError> {
    match self.tokeniser.next() {
      Some(Ok(token)) => Ok(token),
      Some(Err(error)) => Err(ParseError::Lex(error)),
      None => Ok(Token {
        kind: TokenKind::EndOfFile,
        start: self.current.start + self.current.length,
        length: 0,
      }),
    }
  }

  fn next_token(&mut self) -> Result<Token, ParseError> {
    loop {
      let token = match self.lookahead.take() {
        Some(token) => token,
        None => self.fetch()?,
      };

      if token.kind == TokenKind::EndOfLine && self.ignoring_newlines() {
        continue;
      }
      return Ok(token);
    }
  }

  /// Move to the next token, returning the one which was current
  fn advance(&mut self) -> Result<Token, ParseError> {
    let previous = self.current;
    self.current = self.next_token()?;
    self.skipped_newline = false;
    Ok(previous)
  }

  /// The kind of the token after the current one
  fn peek(&mut self) -> Result<TokenKind, ParseError> {
    if self.lookahead.is_none() {
      self.lookahead = Some(self.next_token()?);
    }

    Ok(self.lookahead.map_or(TokenKind::EndOfFile, |token| token.kind))
  }

  fn skip_newlines(&mut self) -> Result<(), ParseError> {
    while self.current.kind == TokenKind::EndOfLine {
      self.advance()?;
      self.skipped_newline = true;
    }

    Ok(())
  }

  fn skip_separators(&mut self) -> Result<(), ParseError> {
    while let TokenKind::EndOfLine | TokenKind::Semicolon = self.current.kind {
      self.advance()?;
    }

    Ok(())
  }

  fn unexpected(&self, expected: TokenKind) -> ParseError {
    if self.current.kind == TokenKind::EndOfFile {
      ParseError::UnexpectedEndOfInput(self.current)
    } else {
      ParseError::Expected {
        expected,
        received: self.current,
      }
    }
  }

  fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
    if self.current.kind == kind {
      self.advance()
    } else {
      Err(self.unexpected(kind))
    }
  }

  /// Consume an opening bracket, and enter it
  fn open(&mut self, kind: TokenKind, delimiter: Delimiter) -> Result<Token, ParseError> {
    if self.current.kind != kind {
      return Err(self.unexpected(kind));
    }

    self.delimiters.push(delimiter);
    self.advance()
  }

  /// Consume a closing bracket, and leave it
  fn close(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
    if self.current.kind != kind {
      return Err(self.unexpected(kind));
    }

    self.delimiters.pop();
    self.advance()
  }

  fn in_brace(&self) -> bool {
    self.delimiters.last() == Some(&Delimiter::Brace)
  }

  fn with_equals<T>(
    &mut self,
    allowed: bool,
    parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
  ) -> Result<T, ParseError> {
    let previous = mem::replace(&mut self.equals_allowed, allowed);
    let result = parse(self);
    self.equals_allowed = previous;
    result
  }

  /// The body of a string or quoted identifier token, with escapes resolved
  fn quoted_text(&self, token: Token) -> String {
    let text = token.text(self.source);
    unescape(text.get(1..text.len().saturating_sub(1)).unwrap_or_default())
  }

  /// The name written by an identifier, quoted identifier or string token
  fn name(&self, token: Token) -> Name {
    match token.kind {
      TokenKind::Identifier => token.text(self.source).into(),
      _ => self.quoted_text(token).into(),
    }
  }

  fn infix_precedence(&self, kind: TokenKind) -> Option<Precedence> {
    match kind {
      TokenKind::Equal if !self.equals_allowed => None,
      TokenKind::RightAssign | TokenKind::RightSuperAssign => Some(Precedence::RightAssign),
      TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftDoubleBracket => {
        Some(Precedence::Postfix)
      }
      _ => BinaryOperator::from_token(kind).map(BinaryOperator::precedence),
    }
  }

  fn expression(&mut self, precedence: Precedence) -> Result<Node, ParseError> {
    let mut left = self.prefix_expression()?;
    let mut previous = None;

    while !self.skipped_newline {
      let operator = self.current;
      let Some(operator_precedence) = self.infix_precedence(operator.kind) else {
        break;
      };
      if operator_precedence < precedence {
        break;
      }

      if operator_precedence == Precedence::Comparison && previous == Some(Precedence::Comparison)
      {
        return Err(ParseError::ChainedComparison(operator));
      }
      previous = Some(operator_precedence);

      left = self.infix_expression(left, operator)?;
    }

    Ok(left)
  }

  /// Parse a prefix expression
  ///
  /// An expression which starts/ makes up the first part of the expression
  fn prefix_expression(&mut self) -> Result<Node, ParseError> {
    let token = self.current;

    let constant = match token.kind {
      TokenKind::Number => Some(self.number(token)?),
      TokenKind::String => Some(Constant::String(self.quoted_text(token).into())),
      TokenKind::True => Some(Constant::Logical(true)),
      TokenKind::False => Some(Constant::Logical(false)),
      TokenKind::Null => Some(Constant::Null),
      TokenKind::Inf => Some(Constant::Double(f64::INFINITY)),
      TokenKind::NaN => Some(Constant::Double(f64::NAN)),
      _ => None,
    };
    if let Some(constant) = constant {
      self.advance()?;
      return Ok(constant.into());
    }

    match token.kind {
      TokenKind::Identifier | TokenKind::QuotedIdentifier => {
        self.advance()?;
        Ok(Symbol::new(&self.name(token)).into())
      }

      TokenKind::LeftParen => self.group(),
      TokenKind::LeftCurly => self.block(),
      TokenKind::Minus | TokenKind::Plus | TokenKind::Bang | TokenKind::Tilde => self.unary(),

      TokenKind::Function => self.function(),
      TokenKind::If => self.if_(),
      TokenKind::For => self.for_(),
      TokenKind::While => self.while_(),
      TokenKind::Repeat => self.repeat(),
      TokenKind::Break | TokenKind::Next => {
        self.advance()?;
        let name = if token.kind == TokenKind::Break { "break" } else { "next" };
        Ok(Call::named(name, []).into())
      }

      TokenKind::EndOfFile => Err(ParseError::UnexpectedEndOfInput(token)),
      _ => Err(ParseError::ExpectedExpression(token)),
    }
  }

  /// Parse an infix expression
  ///
  /// An expression which relies on a previous expression to be complete.
  /// Passes the previously parsed expression to make up the start of the expression.
  fn infix_expression(&mut self, left: Node, operator: Token) -> Result<Node, ParseError> {
    match operator.kind {
      TokenKind::LeftParen => self.call(left, operator),
      TokenKind::LeftBracket => self.index(left, false),
      TokenKind::LeftDoubleBracket => self.index(left, true),
      TokenKind::Dollar | TokenKind::At => self.member(left, operator),
      TokenKind::RightAssign | TokenKind::RightSuperAssign => self.right_assign(left, operator),
      _ => self.binary(left, operator),
    }
  }
}
// Expressions
impl Parser<'_> {
  fn binary(&mut self, left: Node, operator: Token) -> Result<Node, ParseError> {
    self.advance()?;
    let Some(binary) = BinaryOperator::from_token(operator.kind) else {
      return Err(ParseError::UnexpectedToken(operator));
    };

    self.skip_newlines()?;
    let right = self.expression(binary.right_precedence())?;

    let name = binary
      .as_str()
      .unwrap_or_else(|| operator.text(self.source));
    Ok(Call::named(name, [left.into(), right.into()]).into())
  }

  /// `a -> b` is stored as `b <- a`
  fn right_assign(&mut self, left: Node, operator: Token) -> Result<Node, ParseError> {
    self.advance()?;
    self.skip_newlines()?;
    let right = self.expression(Precedence::RightAssign.next())?;

    let name = match operator.kind {
      TokenKind::RightSuperAssign => "<<-",
      _ => "<-",
    };
    Ok(Call::named(name, [right.into(), left.into()]).into())
  }

  fn member(&mut self, object: Node, operator: Token) -> Result<Node, ParseError> {
    self.advance()?;
    self.skip_newlines()?;

    let token = self.advance()?;
    let member = match token.kind {
      TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::String => {
        Symbol::new(&self.name(token))
      }
      TokenKind::EndOfFile => return Err(ParseError::UnexpectedEndOfInput(token)),
      _ => return Err(ParseError::InvalidMemberName(token)),
    };

    let name = if operator.kind == TokenKind::At { "@" } else { "$" };
    Ok(Call::named(name, [object.into(), Node::from(member).into()]).into())
  }

  fn call(&mut self, head: Node, opening: Token) -> Result<Node, ParseError> {
    let head = match head {
      Node::Constant(Constant::String(name)) => Node::symbol(&name),
      Node::Symbol(_) | Node::Call(_) => head,
      other => {
        return Err(ParseError::InvalidCallHead {
          kind: other.kind(),
          span: opening.span(),
        });
      }
    };

    self.open(TokenKind::LeftParen, Delimiter::Paren)?;
    let arguments = self.arguments(TokenKind::RightParen, false)?;
    self.close(TokenKind::RightParen)?;

    Ok(Call::new_unchecked(head, arguments).into())
  }

  fn index(&mut self, object: Node, double: bool) -> Result<Node, ParseError> {
    let (opening, name) = if double {
      (TokenKind::LeftDoubleBracket, "[[")
    } else {
      (TokenKind::LeftBracket, "[")
    };

    self.open(opening, Delimiter::Bracket)?;
    let indices = self.arguments(TokenKind::RightBracket, true)?;
    self.close(TokenKind::RightBracket)?;
    if double {
      self.expect(TokenKind::RightBracket)?;
    }

    let arguments = iter::once(Argument::positional(object)).chain(indices);
    Ok(Call::named(name, arguments).into())
  }

  /// Comma separated arguments, up to but not including the closing bracket.
  ///
  /// Indexing with nothing (`x[]`) has a single missing argument, but calling with nothing
  /// (`f()`) has no arguments.
  fn arguments(
    &mut self,
    closing: TokenKind,
    is_index: bool,
  ) -> Result<ThinVec<Argument>, ParseError> {
    let mut arguments = ThinVec::new();

    if self.current.kind == closing {
      if is_index {
        arguments.push(Argument::missing());
      }
      return Ok(arguments);
    }

    loop {
      arguments.push(self.argument(closing)?);

      if self.current.kind != TokenKind::Comma {
        break;
      }
      self.advance()?;
    }

    Ok(arguments)
  }

  fn argument(&mut self, closing: TokenKind) -> Result<Argument, ParseError> {
    let ends_argument = |kind: TokenKind| kind == TokenKind::Comma || kind == closing;

    if ends_argument(self.current.kind) {
      return Ok(Argument::missing());
    }

    let is_name = matches!(
      self.current.kind,
      TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::String
    );
    if is_name && self.peek()? == TokenKind::Equal {
      let token = self.advance()?;
      let name = self.name(token);
      self.advance()?;

      if ends_argument(self.current.kind) {
        return Ok(Argument::named(&name, missing_argument().clone()));
      }

      let value = self.with_equals(false, |parser| parser.expression(Precedence::Lowest))?;
      return Ok(Argument::named(&name, value));
    }

    let value = self.with_equals(false, |parser| parser.expression(Precedence::Lowest))?;
    if self.current.kind == TokenKind::Equal {
      return Err(ParseError::InvalidArgumentName(self.current.span()));
    }

    Ok(Argument::positional(value))
  }

  fn group(&mut self) -> Result<Node, ParseError> {
    self.open(TokenKind::LeftParen, Delimiter::Paren)?;
    let expression = self.with_equals(true, |parser| parser.expression(Precedence::Lowest))?;
    self.close(TokenKind::RightParen)?;

    Ok(expression)
  }

  fn block(&mut self) -> Result<Node, ParseError> {
    self.open(TokenKind::LeftCurly, Delimiter::Brace)?;

    let statements = self.with_equals(true, |parser| {
      let mut statements = ThinVec::new();

      loop {
        parser.skip_separators()?;
        if parser.current.kind == TokenKind::RightCurly {
          break;
        }

        statements.push(Argument::positional(parser.expression(Precedence::Lowest)?));

        match parser.current.kind {
          TokenKind::RightCurly | TokenKind::EndOfLine | TokenKind::Semicolon => {}
          _ if parser.skipped_newline => {}
          TokenKind::EndOfFile => return Err(ParseError::UnexpectedEndOfInput(parser.current)),
          _ => return Err(ParseError::UnexpectedToken(parser.current)),
        }
      }

      Ok(statements)
    })?;

    self.close(TokenKind::RightCurly)?;
    Ok(Call::new_unchecked(Node::symbol("{"), statements).into())
  }

  fn unary(&mut self) -> Result<Node, ParseError> {
    let token = self.advance()?;
    let Some(operator) = UnaryOperator::from_token(token.kind) else {
      return Err(ParseError::ExpectedExpression(token));
    };

    self.skip_newlines()?;
    let operand = self.expression(operator.operand_precedence())?;

    Ok(Call::named(operator.as_str(), [operand.into()]).into())
  }

  fn function(&mut self) -> Result<Node, ParseError> {
    self.advance()?;
    self.open(TokenKind::LeftParen, Delimiter::Paren)?;
    let formals = self.formals()?;
    self.close(TokenKind::RightParen)?;

    self.skip_newlines()?;
    let body = self.expression(Precedence::Lowest)?;

    let arguments = [Node::from(formals).into(), body.into()];
    Ok(Call::named("function", arguments).into())
  }

  fn formals(&mut self) -> Result<FormalList, ParseError> {
    let mut formals = ThinVec::new();
    if self.current.kind == TokenKind::RightParen {
      return Ok(FormalList::default());
    }

    loop {
      let token = self.current;
      if !matches!(
        token.kind,
        TokenKind::Identifier | TokenKind::QuotedIdentifier
      ) {
        return Err(self.unexpected(TokenKind::Identifier));
      }
      self.advance()?;

      let name = self.name(token);
      if formals.iter().any(|formal: &Formal| formal.name == name) {
        return Err(ParseError::DuplicateFormal { name, token });
      }

      let formal = if self.current.kind == TokenKind::Equal {
        self.advance()?;

        if matches!(
          self.current.kind,
          TokenKind::Comma | TokenKind::RightParen
        ) {
          Formal::with_empty_default(&name)
        } else {
          let default = self.with_equals(false, |parser| parser.expression(Precedence::Lowest))?;
          Formal::new(&name, Some(default))
        }
      } else {
        Formal::new(&name, None)
      };
      formals.push(formal);

      if self.current.kind != TokenKind::Comma {
        break;
      }
      self.advance()?;
    }

    Ok(FormalList::new_unchecked(formals))
  }

  fn condition(&mut self) -> Result<Node, ParseError> {
    self.open(TokenKind::LeftParen, Delimiter::Paren)?;
    let condition = self.with_equals(false, |parser| parser.expression(Precedence::Lowest))?;
    self.close(TokenKind::RightParen)?;

    Ok(condition)
  }

  /// The body of a control flow expression, which can start on the next line
  fn body(&mut self) -> Result<Node, ParseError> {
    self.skip_newlines()?;
    self.expression(Precedence::Lowest)
  }

  fn if_(&mut self) -> Result<Node, ParseError> {
    self.advance()?;
    let condition = self.condition()?;
    let then = self.body()?;

    let mut arguments = thin_vec![condition.into(), then.into()];

    // inside braces, an `else` can be on a following line
    if self.current.kind == TokenKind::EndOfLine && self.in_brace() {
      self.skip_newlines()?;
    }
    if self.current.kind == TokenKind::Else {
      self.advance()?;
      arguments.push(self.body()?.into());
    }

    Ok(Call::named("if", arguments).into())
  }

  fn for_(&mut self) -> Result<Node, ParseError> {
    self.advance()?;
    self.open(TokenKind::LeftParen, Delimiter::Paren)?;

    let token = self.current;
    if !matches!(
      token.kind,
      TokenKind::Identifier | TokenKind::QuotedIdentifier
    ) {
      return Err(self.unexpected(TokenKind::Identifier));
    }
    self.advance()?;
    let variable = Symbol::new(&self.name(token));

    self.expect(TokenKind::In)?;
    let sequence = self.with_equals(false, |parser| parser.expression(Precedence::Lowest))?;
    self.close(TokenKind::RightParen)?;

    let body = self.body()?;

    let arguments = [Node::from(variable).into(), sequence.into(), body.into()];
    Ok(Call::named("for", arguments).into())
  }

  fn while_(&mut self) -> Result<Node, ParseError> {
    self.advance()?;
    let condition = self.condition()?;
    let body = self.body()?;

    Ok(Call::named("while", [condition.into(), body.into()]).into())
  }

  fn repeat(&mut self) -> Result<Node, ParseError> {
    self.advance()?;
    let body = self.body()?;

    Ok(Call::named("repeat", [body.into()]).into())
  }

  fn number(&self, token: Token) -> Result<Constant, ParseError> {
    let text = token.text(self.source);
    let (digits, is_integer) = match text.strip_suffix('L') {
      Some(digits) => (digits, true),
      None => (text, false),
    };

    let value = match digits
      .strip_prefix("0x")
      .or_else(|| digits.strip_prefix("0X"))
    {
      Some(hex) => hex.chars().fold(0.0, |value, digit| {
        value * 16.0 + f64::from(digit.to_digit(16).unwrap_or_default())
      }),
      None => digits.parse::<f64>().map_err(|_| {
        ParseError::Lex(LexError::InvalidNumber {
          offset: token.start,
        })
      })?,
    };

    let fits_integer =
      value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if is_integer && fits_integer {
      #[allow(clippy::cast_possible_truncation, reason = "checked to be within i32 range")]
      return Ok(Constant::Integer(value as i32));
    }

    Ok(Constant::Double(value))
  }
}

/// A lazy iterator over the top-level units of a source text
///
/// Stops after the first error.
pub struct Units<'source> {
  parser: Parser<'source>,
  finished: bool,
}
impl<'source> Units<'source> {
  pub(crate) fn new(source: &'source str) -> Self {
    Self {
      parser: Parser::new(source),
      finished: false,
    }
  }
}
impl Iterator for Units<'_> {
  type Item = Result<Node, ParseError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }

    match self.parser.next_unit() {
      Ok(Some(unit)) => Some(Ok(unit)),
      Ok(None) => {
        self.finished = true;
        None
      }
      Err(error) => {
        self.finished = true;
        Some(Err(error))
      }
    }
  }
}
impl iter::FusedIterator for Units<'_> {}

/// An error whilst parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
  /// The source could not be split into tokens
  Lex(LexError),
  /// The source ended in the middle of an expression
  UnexpectedEndOfInput(Token),
  /// A particular token was needed but another was found
  Expected {
    /// The token needed
    expected: TokenKind,
    /// The token found
    received: Token,
  },
  /// A token which can't start an expression
  ExpectedExpression(Token),
  /// A token after a complete expression which can't continue it
  UnexpectedToken(Token),
  /// Comparisons can't follow each other without brackets, e.g. `a < b < c`
  ChainedComparison(Token),
  /// Something other than a name before the `=` of an argument
  InvalidArgumentName(Span),
  /// Calling something which isn't a name or call, e.g. `1(2)`
  InvalidCallHead {
    /// What was being called
    kind: &'static str,
    /// Where the call starts
    span: Span,
  },
  /// The right side of `$` or `@` which isn't a name
  InvalidMemberName(Token),
  /// A function with two formals of the same name
  DuplicateFormal {
    /// The repeated name
    name: Name,
    /// The second use of the name
    token: Token,
  },
}
impl ParseError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> &'static str {
    match self {
      Self::Lex(error) => error.title(),
      Self::UnexpectedEndOfInput(_) => "Unexpected End of Input",
      Self::Expected { .. } => "Expected Token",
      Self::ExpectedExpression(_) => "Expected Expression",
      Self::UnexpectedToken(_) => "Unexpected Token",
      Self::ChainedComparison(_) => "Chained Comparison",
      Self::InvalidArgumentName(_) => "Invalid Argument Name",
      Self::InvalidCallHead { .. } => "Invalid Call Head",
      Self::InvalidMemberName(_) => "Invalid Member Name",
      Self::DuplicateFormal { .. } => "Duplicate Formal",
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::Lex(error) => error.message(),
      Self::UnexpectedEndOfInput(_) => "the source ended before the expression was complete".into(),
      Self::Expected { expected, received } => {
        format!("expected {expected} but got {}", received.kind)
      }
      Self::ExpectedExpression(token) => format!("expected expression but got {}", token.kind),
      Self::UnexpectedToken(token) => {
        format!("unexpected {}, expressions must be separated by a new line or `;`", token.kind)
      }
      Self::ChainedComparison(_) => {
        "comparisons can't be chained, use brackets to choose the order".into()
      }
      Self::InvalidArgumentName(_) => {
        "an argument can only be named by an identifier or a string".into()
      }
      Self::InvalidCallHead { kind, .. } => format!("a {kind} can't be called"),
      Self::InvalidMemberName(token) => {
        format!("expected a name after the operator but got {}", token.kind)
      }
      Self::DuplicateFormal { name, .. } => format!("formal `{name}` is declared more than once"),
    }
  }

  /// The location of the error
  pub fn span(&self) -> Span {
    match self {
      Self::Lex(error) => error.span(),
      Self::UnexpectedEndOfInput(token)
      | Self::ExpectedExpression(token)
      | Self::UnexpectedToken(token)
      | Self::ChainedComparison(token)
      | Self::InvalidMemberName(token)
      | Self::Expected {
        received: token, ..
      }
      | Self::DuplicateFormal { token, .. } => token.span(),
      Self::InvalidArgumentName(span) | Self::InvalidCallHead { span, .. } => *span,
    }
  }
}
impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
impl error::Error for ParseError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Self::Lex(error) => Some(error),
      _ => None,
    }
  }
}
impl From<LexError> for ParseError {
  fn from(error: LexError) -> Self {
    Self::Lex(error)
  }
}
