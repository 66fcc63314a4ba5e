use crate::span::Span;
use std::{error, fmt, iter};

/// Convert a string of source code into an [Iterator] of [Token]s
///
/// The iterator ends with a single [`TokenKind::EndOfFile`] token. If an error is found it is
/// returned, and the iterator then finishes. It is cheap to clone, so can be restarted or used
/// to look ahead.
#[derive(Clone, Debug)]
pub struct Tokeniser<'source> {
  /// The source code to tokenise
  source: &'source str,
  /// The current byte position in the source code
  position: usize,
  /// Has the end of file token (or an error) been returned?
  finished: bool,
}
impl<'source> From<&'source str> for Tokeniser<'source> {
  /// Create a new [Tokeniser] from a source code string
  ///
  /// # Panics
  /// Panics if the length of the source code is greater than `u32::MAX`
  fn from(source: &'source str) -> Self {
    assert!(source.len() < u32::MAX as usize);

    Self {
      source,
      position: 0,
      finished: false,
    }
  }
}
impl Tokeniser<'_> {
  /// The source code which has not yet been tokenised
  fn rest(&self) -> &str {
    &self.source[self.position..]
  }

  /// Get the next token from the source code, and its length in bytes
  fn next_token(&mut self) -> Result<(TokenKind, usize), LexError> {
    loop {
      let rest = self.rest();
      let mut characters = rest.chars();
      let Some(character) = characters.next() else {
        return Ok((TokenKind::EndOfFile, 0));
      };
      let next_character = characters.next();

      let token = match character {
        // Whitespace + Comments
        ' ' | '\t' | '\r' | '\u{c}' => {
          self.position += 1;
          continue;
        }
        '#' => {
          self.position += rest.find('\n').unwrap_or(rest.len());
          continue;
        }
        '\n' => (TokenKind::EndOfLine, 1),

        // Values
        '"' | '\'' => (TokenKind::String, self.quoted(character)?),
        '`' => self.quoted_identifier()?,
        '%' => self.custom_operator()?,
        '0'..='9' => self.number()?,
        '.' if next_character.is_some_and(|c| c.is_ascii_digit()) => self.number()?,
        c if c.is_alphabetic() || c == '.' => self.identifier(),

        // Brackets + Separators
        '(' => (TokenKind::LeftParen, 1),
        ')' => (TokenKind::RightParen, 1),
        '{' => (TokenKind::LeftCurly, 1),
        '}' => (TokenKind::RightCurly, 1),
        '[' if next_character == Some('[') => (TokenKind::LeftDoubleBracket, 2),
        '[' => (TokenKind::LeftBracket, 1),
        ']' => (TokenKind::RightBracket, 1),
        ',' => (TokenKind::Comma, 1),
        ';' => (TokenKind::Semicolon, 1),

        // Assignment
        '<' if rest.starts_with("<<-") => (TokenKind::LeftSuperAssign, 3),
        '<' if next_character == Some('-') => (TokenKind::LeftAssign, 2),
        '-' if rest.starts_with("->>") => (TokenKind::RightSuperAssign, 3),
        '-' if next_character == Some('>') => (TokenKind::RightAssign, 2),

        // Comparison
        '<' if next_character == Some('=') => (TokenKind::LessEqual, 2),
        '>' if next_character == Some('=') => (TokenKind::GreaterEqual, 2),
        '=' if next_character == Some('=') => (TokenKind::EqualEqual, 2),
        '!' if next_character == Some('=') => (TokenKind::BangEqual, 2),
        '<' => (TokenKind::Less, 1),
        '>' => (TokenKind::Greater, 1),
        '=' => (TokenKind::Equal, 1),

        // Logical
        '&' if next_character == Some('&') => (TokenKind::AndAnd, 2),
        '|' if next_character == Some('|') => (TokenKind::OrOr, 2),
        '&' => (TokenKind::And, 1),
        '|' => (TokenKind::Or, 1),
        '!' => (TokenKind::Bang, 1),

        // Arithmetic
        '+' => (TokenKind::Plus, 1),
        '-' => (TokenKind::Minus, 1),
        '*' if next_character == Some('*') => (TokenKind::Caret, 2),
        '*' => (TokenKind::Star, 1),
        '/' => (TokenKind::Slash, 1),
        '^' => (TokenKind::Caret, 1),
        ':' => (TokenKind::Colon, 1),
        '~' => (TokenKind::Tilde, 1),
        '$' => (TokenKind::Dollar, 1),
        '@' => (TokenKind::At, 1),

        character => {
          return Err(LexError::UnknownCharacter {
            offset: offset(self.position),
            character,
          });
        }
      };

      return Ok(token);
    }
  }

  /// Find the length of a quoted section, including both quotes
  ///
  /// Escape sequences are checked, but left in place.
  fn quoted(&self, quote: char) -> Result<usize, LexError> {
    let mut characters = self.rest().char_indices().skip(1);

    while let Some((index, character)) = characters.next() {
      match character {
        '\\' => match characters.next() {
          Some((_, escaped)) if is_escape(escaped) => {}
          Some((index, escaped)) => {
            return Err(LexError::InvalidEscape {
              offset: offset(self.position + index),
              character: escaped,
            });
          }
          None => break,
        },
        c if c == quote => return Ok(index + 1),
        _ => {}
      }
    }

    Err(LexError::UnterminatedString {
      offset: offset(self.position),
      quote,
    })
  }

  /// A name wrapped in backticks, which can contain any character
  fn quoted_identifier(&self) -> Result<(TokenKind, usize), LexError> {
    let length = self.quoted('`')?;

    if length == 2 {
      return Err(LexError::EmptyQuotedIdentifier {
        offset: offset(self.position),
      });
    }

    Ok((TokenKind::QuotedIdentifier, length))
  }

  /// A user defined infix operator, any characters on a single line between `%`
  fn custom_operator(&self) -> Result<(TokenKind, usize), LexError> {
    let rest = self.rest();

    match rest[1..].find(['%', '\n']) {
      Some(index) if rest.as_bytes()[index + 1] == b'%' => {
        Ok((TokenKind::CustomOperator, index + 2))
      }
      _ => Err(LexError::UnterminatedOperator {
        offset: offset(self.position),
      }),
    }
  }

  /// A number, either hexadecimal or decimal with optional fraction and exponent.
  /// An `L` suffix marks an integer.
  fn number(&self) -> Result<(TokenKind, usize), LexError> {
    let bytes = self.rest().as_bytes();
    let count = |start: usize, predicate: fn(&u8) -> bool| {
      bytes[start..].iter().take_while(|c| predicate(c)).count()
    };
    let invalid = || LexError::InvalidNumber {
      offset: offset(self.position),
    };

    let mut length;
    if bytes.len() > 1 && bytes[0] == b'0' && matches!(bytes[1], b'x' | b'X') {
      let digits = count(2, u8::is_ascii_hexdigit);
      if digits == 0 {
        return Err(invalid());
      }
      length = 2 + digits;
    } else {
      length = count(0, u8::is_ascii_digit);

      if bytes.get(length) == Some(&b'.') {
        length += 1 + count(length + 1, u8::is_ascii_digit);
      }

      if matches!(bytes.get(length), Some(b'e' | b'E')) {
        length += 1;
        if matches!(bytes.get(length), Some(b'+' | b'-')) {
          length += 1;
        }

        let digits = count(length, u8::is_ascii_digit);
        if digits == 0 {
          return Err(invalid());
        }
        length += digits;
      }
    }

    if bytes.get(length) == Some(&b'L') {
      length += 1;
    }

    Ok((TokenKind::Number, length))
  }

  /// Get an identifier or keyword token
  fn identifier(&self) -> (TokenKind, usize) {
    let rest = self.rest();
    let length = rest
      .char_indices()
      .find(|(_, c)| !(c.is_alphanumeric() || *c == '.' || *c == '_'))
      .map_or(rest.len(), |(index, _)| index);

    let kind = TokenKind::keyword(&rest[..length]).unwrap_or(TokenKind::Identifier);
    (kind, length)
  }
}
impl Iterator for Tokeniser<'_> {
  type Item = Result<Token, LexError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }

    let (kind, length) = match self.next_token() {
      Ok(token) => token,
      Err(error) => {
        self.finished = true;
        return Some(Err(error));
      }
    };

    if kind == TokenKind::EndOfFile {
      self.finished = true;
    }

    let start = self.position;
    self.position += length;

    Some(Ok(Token {
      kind,
      start: offset(start),
      length: offset(length),
    }))
  }
}
impl iter::FusedIterator for Tokeniser<'_> {}

#[allow(clippy::cast_possible_truncation, reason = "source.len() < u32::MAX")]
fn offset(position: usize) -> u32 {
  position as u32
}

/// Characters which can follow a backslash in a string or quoted identifier
fn is_escape(character: char) -> bool {
  matches!(
    character,
    'n' | 't' | 'r' | '0' | '\\' | '"' | '\'' | '`'
  )
}

/// Convert the body of a string or quoted identifier (without quotes) into its value
pub(crate) fn unescape(body: &str) -> String {
  let mut value = String::with_capacity(body.len());
  let mut characters = body.chars();

  while let Some(character) = characters.next() {
    if character != '\\' {
      value.push(character);
      continue;
    }

    match characters.next() {
      Some('n') => value.push('\n'),
      Some('t') => value.push('\t'),
      Some('r') => value.push('\r'),
      Some('0') => value.push('\0'),
      Some(other) => value.push(other),
      None => {}
    }
  }

  value
}

/// A Token of source code, a lexeme of the language
///
/// With the type of token, start position and length of the token in the source code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Token {
  /// The type of token
  pub kind: TokenKind,
  /// The byte offset of the start of the token
  pub start: u32,
  /// The length of the token in bytes
  pub length: u32,
}
impl Token {
  /// The location of the token
  pub fn span(self) -> Span {
    Span::new(self.start, self.start + self.length)
  }

  /// The source text of the token
  #[must_use]
  pub fn text(self, source: &str) -> &str {
    self.span().source_text(source)
  }
}
impl From<Token> for Span {
  fn from(token: Token) -> Self {
    token.span()
  }
}

/// How an operator token can be used
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorClass {
  /// Only between two operands, e.g. `*`
  Infix,
  /// Only before an operand, e.g. `!`
  Prefix,
  /// Either before an operand or between two, e.g. `-`
  PrefixOrInfix,
  /// A user defined operator between two operands, e.g. `%in%`
  CustomInfix,
  /// Not an operator
  None,
}

/// The type of a token
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
  // Brackets + Separators
  /// `(`
  LeftParen,
  /// `)`
  RightParen,
  /// `{`
  LeftCurly,
  /// `}`
  RightCurly,
  /// `[`
  LeftBracket,
  /// `[[`
  LeftDoubleBracket,
  /// `]`
  RightBracket,
  /// `,`
  Comma,
  /// `;`
  Semicolon,

  // Assignment
  /// `<-`
  LeftAssign,
  /// `<<-`
  LeftSuperAssign,
  /// `->`
  RightAssign,
  /// `->>`
  RightSuperAssign,
  /// `=`
  Equal,

  // Comparison
  /// `==`
  EqualEqual,
  /// `!=`
  BangEqual,
  /// `<`
  Less,
  /// `<=`
  LessEqual,
  /// `>`
  Greater,
  /// `>=`
  GreaterEqual,

  // Logical
  /// `!`
  Bang,
  /// `&`
  And,
  /// `&&`
  AndAnd,
  /// `|`
  Or,
  /// `||`
  OrOr,

  // Arithmetic
  /// `+`
  Plus,
  /// `-`
  Minus,
  /// `*`
  Star,
  /// `/`
  Slash,
  /// `^` or `**`
  Caret,
  /// `:`
  Colon,
  /// `~`
  Tilde,
  /// `$`
  Dollar,
  /// `@`
  At,
  /// A user defined infix operator, e.g. `%in%`
  CustomOperator,

  // Values
  /// An identifier, letters, digits, `.` and `_` starting with a letter or `.`
  Identifier,
  /// Any name wrapped in backticks, e.g. `` `my var` ``
  QuotedIdentifier,
  /// A number, e.g. `1`, `1.5e3`, `0xFF`, `5L`
  Number,
  /// A string between `'` or `"`
  String,

  // Keywords
  /// `break`
  Break,
  /// `else`
  Else,
  /// `FALSE`
  False,
  /// `for`
  For,
  /// `function`
  Function,
  /// `if`
  If,
  /// `in`
  In,
  /// `Inf`
  Inf,
  /// `NaN`
  NaN,
  /// `next`
  Next,
  /// `NULL`
  Null,
  /// `repeat`
  Repeat,
  /// `TRUE`
  True,
  /// `while`
  While,

  // Whitespace
  /// The end of a line, indicating a `\n`
  EndOfLine,
  /// A token to indicate the end of the file
  #[default]
  EndOfFile,
}
impl TokenKind {
  /// Get the keyword for a word, if it is reserved
  #[must_use]
  pub fn keyword(word: &str) -> Option<Self> {
    Some(match word {
      "break" => Self::Break,
      "else" => Self::Else,
      "FALSE" => Self::False,
      "for" => Self::For,
      "function" => Self::Function,
      "if" => Self::If,
      "in" => Self::In,
      "Inf" => Self::Inf,
      "NaN" => Self::NaN,
      "next" => Self::Next,
      "NULL" => Self::Null,
      "repeat" => Self::Repeat,
      "TRUE" => Self::True,
      "while" => Self::While,
      _ => return None,
    })
  }

  /// Is the token a reserved word?
  #[must_use]
  pub fn is_keyword(self) -> bool {
    matches!(
      self,
      Self::Break
        | Self::Else
        | Self::False
        | Self::For
        | Self::Function
        | Self::If
        | Self::In
        | Self::Inf
        | Self::NaN
        | Self::Next
        | Self::Null
        | Self::Repeat
        | Self::True
        | Self::While
    )
  }

  /// How the token can be used as an operator
  #[must_use]
  pub fn operator_class(self) -> OperatorClass {
    match self {
      Self::Plus | Self::Minus | Self::Tilde => OperatorClass::PrefixOrInfix,
      Self::Bang => OperatorClass::Prefix,
      Self::CustomOperator => OperatorClass::CustomInfix,
      Self::LeftAssign
      | Self::LeftSuperAssign
      | Self::RightAssign
      | Self::RightSuperAssign
      | Self::Equal
      | Self::EqualEqual
      | Self::BangEqual
      | Self::Less
      | Self::LessEqual
      | Self::Greater
      | Self::GreaterEqual
      | Self::And
      | Self::AndAnd
      | Self::Or
      | Self::OrOr
      | Self::Star
      | Self::Slash
      | Self::Caret
      | Self::Colon
      | Self::Dollar
      | Self::At => OperatorClass::Infix,
      _ => OperatorClass::None,
    }
  }
}
impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      Self::LeftParen => "(",
      Self::RightParen => ")",
      Self::LeftCurly => "{",
      Self::RightCurly => "}",
      Self::LeftBracket => "[",
      Self::LeftDoubleBracket => "[[",
      Self::RightBracket => "]",
      Self::Comma => ",",
      Self::Semicolon => ";",

      Self::LeftAssign => "<-",
      Self::LeftSuperAssign => "<<-",
      Self::RightAssign => "->",
      Self::RightSuperAssign => "->>",
      Self::Equal => "=",

      Self::EqualEqual => "==",
      Self::BangEqual => "!=",
      Self::Less => "<",
      Self::LessEqual => "<=",
      Self::Greater => ">",
      Self::GreaterEqual => ">=",

      Self::Bang => "!",
      Self::And => "&",
      Self::AndAnd => "&&",
      Self::Or => "|",
      Self::OrOr => "||",

      Self::Plus => "+",
      Self::Minus => "-",
      Self::Star => "*",
      Self::Slash => "/",
      Self::Caret => "^",
      Self::Colon => ":",
      Self::Tilde => "~",
      Self::Dollar => "$",
      Self::At => "@",
      Self::CustomOperator => "Custom Operator",

      Self::Identifier => "Identifier",
      Self::QuotedIdentifier => "Quoted Identifier",
      Self::Number => "Number",
      Self::String => "String",

      Self::Break => "break",
      Self::Else => "else",
      Self::False => "FALSE",
      Self::For => "for",
      Self::Function => "function",
      Self::If => "if",
      Self::In => "in",
      Self::Inf => "Inf",
      Self::NaN => "NaN",
      Self::Next => "next",
      Self::Null => "NULL",
      Self::Repeat => "repeat",
      Self::True => "TRUE",
      Self::While => "while",

      Self::EndOfLine => "New Line",
      Self::EndOfFile => "End of File",
    };

    f.write_str(text)
  }
}

/// An error found whilst tokenising
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexError {
  /// A string or quoted identifier without a closing quote
  UnterminatedString {
    /// Where the string starts
    offset: u32,
    /// The quote character which opened it
    quote: char,
  },
  /// A `%` operator without its closing `%` on the same line
  UnterminatedOperator {
    /// Where the operator starts
    offset: u32,
  },
  /// A character which can't start any token
  UnknownCharacter {
    /// Where the character is
    offset: u32,
    /// The character found
    character: char,
  },
  /// A backslash followed by a character which isn't an escape
  InvalidEscape {
    /// Where the escaped character is
    offset: u32,
    /// The character after the backslash
    character: char,
  },
  /// Backticks with nothing between them
  EmptyQuotedIdentifier {
    /// Where the identifier starts
    offset: u32,
  },
  /// A malformed number, such as `1e` or `0x`
  InvalidNumber {
    /// Where the number starts
    offset: u32,
  },
}
impl LexError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> &'static str {
    match self {
      Self::UnterminatedString { .. } => "Unterminated String",
      Self::UnterminatedOperator { .. } => "Unterminated Operator",
      Self::UnknownCharacter { .. } => "Unknown Character",
      Self::InvalidEscape { .. } => "Invalid Escape",
      Self::EmptyQuotedIdentifier { .. } => "Empty Quoted Identifier",
      Self::InvalidNumber { .. } => "Invalid Number",
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::UnterminatedString { quote, .. } => format!("missing closing {quote}"),
      Self::UnterminatedOperator { .. } => "missing closing % for operator".into(),
      Self::UnknownCharacter { character, .. } => format!("unexpected character {character:?}"),
      Self::InvalidEscape { character, .. } => {
        format!("'\\{character}' is not a recognised escape")
      }
      Self::EmptyQuotedIdentifier { .. } => "a name can't be empty".into(),
      Self::InvalidNumber { .. } => "number is missing digits".into(),
    }
  }

  /// The byte offset the error was found at
  #[must_use]
  pub fn offset(&self) -> u32 {
    match self {
      Self::UnterminatedString { offset, .. }
      | Self::UnterminatedOperator { offset }
      | Self::UnknownCharacter { offset, .. }
      | Self::InvalidEscape { offset, .. }
      | Self::EmptyQuotedIdentifier { offset }
      | Self::InvalidNumber { offset } => *offset,
    }
  }

  /// The location of the error
  pub fn span(&self) -> Span {
    let start = self.offset();
    match self {
      Self::UnknownCharacter { character, .. } | Self::InvalidEscape { character, .. } => {
        Span::new(start, start + offset(character.len_utf8()))
      }
      _ => Span::new(start, start + 1),
    }
  }
}
impl fmt::Display for LexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} at offset {}", self.message(), self.offset())
  }
}
impl error::Error for LexError {}
