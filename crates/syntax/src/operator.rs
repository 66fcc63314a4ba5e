//! # Operators
//!
//! The fixed table of operator precedence and associativity, shared by the parser and the
//! deparser so that both agree on how operators bind.

use crate::tokeniser::TokenKind;

/// How tightly an operator binds, from loosest to tightest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
  /// The loosest binding, a complete expression
  Lowest,
  /// `=`
  EqualAssign,
  /// `<-` `<<-`
  LeftAssign,
  /// `->` `->>`
  RightAssign,
  /// `~`
  Tilde,
  /// `|` `||`
  Or,
  /// `&` `&&`
  And,
  /// prefix `!`
  Not,
  /// `==` `!=` `<` `<=` `>` `>=`
  Comparison,
  /// `+` `-`
  Additive,
  /// `*` `/`
  Multiplicative,
  /// `%any%`
  Custom,
  /// `:`
  Sequence,
  /// prefix `-` `+`
  Unary,
  /// `^`
  Exponent,
  /// `$` `@`
  Member,
  /// calls and indexing, `f()` `x[]` `x[[]]`
  Postfix,
}
impl Precedence {
  /// The next tighter level of precedence
  #[must_use]
  pub fn next(self) -> Self {
    match self {
      Self::Lowest => Self::EqualAssign,
      Self::EqualAssign => Self::LeftAssign,
      Self::LeftAssign => Self::RightAssign,
      Self::RightAssign => Self::Tilde,
      Self::Tilde => Self::Or,
      Self::Or => Self::And,
      Self::And => Self::Not,
      Self::Not => Self::Comparison,
      Self::Comparison => Self::Additive,
      Self::Additive => Self::Multiplicative,
      Self::Multiplicative => Self::Custom,
      Self::Custom => Self::Sequence,
      Self::Sequence => Self::Unary,
      Self::Unary => Self::Exponent,
      Self::Exponent => Self::Member,
      Self::Member | Self::Postfix => Self::Postfix,
    }
  }
}

/// Which side repeated operators of the same precedence group on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
  /// `a - b - c` is `(a - b) - c`
  Left,
  /// `a ^ b ^ c` is `a ^ (b ^ c)`
  Right,
  /// `a < b < c` is not allowed
  None,
}

/// An operator placed between two operands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
  /// `=`
  EqualAssign,
  /// `<-`
  LeftAssign,
  /// `<<-`
  LeftSuperAssign,
  /// `~`
  Tilde,
  /// `|`
  Or,
  /// `||`
  OrOr,
  /// `&`
  And,
  /// `&&`
  AndAnd,
  /// `==`
  Equal,
  /// `!=`
  NotEqual,
  /// `<`
  Less,
  /// `<=`
  LessEqual,
  /// `>`
  Greater,
  /// `>=`
  GreaterEqual,
  /// `+`
  Add,
  /// `-`
  Subtract,
  /// `*`
  Multiply,
  /// `/`
  Divide,
  /// `%any%`, where the name is the full text including the `%`
  Custom,
  /// `:`
  Sequence,
  /// `^`
  Power,
  /// `$`
  Dollar,
  /// `@`
  At,
}
impl BinaryOperator {
  /// The binary operator a token represents.
  ///
  /// The right assignments (`->`, `->>`) are not included as they are rewritten into
  /// left assignments.
  #[must_use]
  pub fn from_token(kind: TokenKind) -> Option<Self> {
    Some(match kind {
      TokenKind::Equal => Self::EqualAssign,
      TokenKind::LeftAssign => Self::LeftAssign,
      TokenKind::LeftSuperAssign => Self::LeftSuperAssign,
      TokenKind::Tilde => Self::Tilde,
      TokenKind::Or => Self::Or,
      TokenKind::OrOr => Self::OrOr,
      TokenKind::And => Self::And,
      TokenKind::AndAnd => Self::AndAnd,
      TokenKind::EqualEqual => Self::Equal,
      TokenKind::BangEqual => Self::NotEqual,
      TokenKind::Less => Self::Less,
      TokenKind::LessEqual => Self::LessEqual,
      TokenKind::Greater => Self::Greater,
      TokenKind::GreaterEqual => Self::GreaterEqual,
      TokenKind::Plus => Self::Add,
      TokenKind::Minus => Self::Subtract,
      TokenKind::Star => Self::Multiply,
      TokenKind::Slash => Self::Divide,
      TokenKind::CustomOperator => Self::Custom,
      TokenKind::Colon => Self::Sequence,
      TokenKind::Caret => Self::Power,
      TokenKind::Dollar => Self::Dollar,
      TokenKind::At => Self::At,
      _ => return None,
    })
  }

  /// The binary operator which a function name is written as
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    Some(match name {
      "=" => Self::EqualAssign,
      "<-" => Self::LeftAssign,
      "<<-" => Self::LeftSuperAssign,
      "~" => Self::Tilde,
      "|" => Self::Or,
      "||" => Self::OrOr,
      "&" => Self::And,
      "&&" => Self::AndAnd,
      "==" => Self::Equal,
      "!=" => Self::NotEqual,
      "<" => Self::Less,
      "<=" => Self::LessEqual,
      ">" => Self::Greater,
      ">=" => Self::GreaterEqual,
      "+" => Self::Add,
      "-" => Self::Subtract,
      "*" => Self::Multiply,
      "/" => Self::Divide,
      ":" => Self::Sequence,
      "^" => Self::Power,
      "$" => Self::Dollar,
      "@" => Self::At,
      name if is_custom_operator(name) => Self::Custom,
      _ => return None,
    })
  }

  /// The canonical spelling of the operator, used as the name of the call's head.
  ///
  /// Custom operators return `None`, their spelling is their source text.
  #[must_use]
  pub fn as_str(self) -> Option<&'static str> {
    Some(match self {
      Self::EqualAssign => "=",
      Self::LeftAssign => "<-",
      Self::LeftSuperAssign => "<<-",
      Self::Tilde => "~",
      Self::Or => "|",
      Self::OrOr => "||",
      Self::And => "&",
      Self::AndAnd => "&&",
      Self::Equal => "==",
      Self::NotEqual => "!=",
      Self::Less => "<",
      Self::LessEqual => "<=",
      Self::Greater => ">",
      Self::GreaterEqual => ">=",
      Self::Add => "+",
      Self::Subtract => "-",
      Self::Multiply => "*",
      Self::Divide => "/",
      Self::Custom => return None,
      Self::Sequence => ":",
      Self::Power => "^",
      Self::Dollar => "$",
      Self::At => "@",
    })
  }

  /// How tightly the operator binds
  #[must_use]
  pub fn precedence(self) -> Precedence {
    match self {
      Self::EqualAssign => Precedence::EqualAssign,
      Self::LeftAssign | Self::LeftSuperAssign => Precedence::LeftAssign,
      Self::Tilde => Precedence::Tilde,
      Self::Or | Self::OrOr => Precedence::Or,
      Self::And | Self::AndAnd => Precedence::And,
      Self::Equal
      | Self::NotEqual
      | Self::Less
      | Self::LessEqual
      | Self::Greater
      | Self::GreaterEqual => Precedence::Comparison,
      Self::Add | Self::Subtract => Precedence::Additive,
      Self::Multiply | Self::Divide => Precedence::Multiplicative,
      Self::Custom => Precedence::Custom,
      Self::Sequence => Precedence::Sequence,
      Self::Power => Precedence::Exponent,
      Self::Dollar | Self::At => Precedence::Member,
    }
  }

  /// Which way repeated operators group
  #[must_use]
  pub fn associativity(self) -> Associativity {
    match self.precedence() {
      Precedence::EqualAssign | Precedence::LeftAssign | Precedence::Exponent => {
        Associativity::Right
      }
      Precedence::Comparison => Associativity::None,
      _ => Associativity::Left,
    }
  }

  /// The minimum precedence of the right hand operand
  #[must_use]
  pub fn right_precedence(self) -> Precedence {
    match self.associativity() {
      Associativity::Right => self.precedence(),
      Associativity::Left | Associativity::None => self.precedence().next(),
    }
  }

  /// Is the operator written with spaces around it?
  #[must_use]
  pub fn is_spaced(self) -> bool {
    !matches!(
      self,
      Self::Sequence | Self::Power | Self::Dollar | Self::At
    )
  }
}

/// An operator placed before its operand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
  /// `-`
  Negate,
  /// `+`
  Plus,
  /// `!`
  Not,
  /// `~`
  Tilde,
}
impl UnaryOperator {
  /// The unary operator a token represents
  #[must_use]
  pub fn from_token(kind: TokenKind) -> Option<Self> {
    match kind {
      TokenKind::Minus => Some(Self::Negate),
      TokenKind::Plus => Some(Self::Plus),
      TokenKind::Bang => Some(Self::Not),
      TokenKind::Tilde => Some(Self::Tilde),
      _ => None,
    }
  }

  /// The unary operator which a function name is written as
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "-" => Some(Self::Negate),
      "+" => Some(Self::Plus),
      "!" => Some(Self::Not),
      "~" => Some(Self::Tilde),
      _ => None,
    }
  }

  /// The canonical spelling of the operator
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Negate => "-",
      Self::Plus => "+",
      Self::Not => "!",
      Self::Tilde => "~",
    }
  }

  /// How tightly the operator binds
  #[must_use]
  pub fn precedence(self) -> Precedence {
    match self {
      Self::Negate | Self::Plus => Precedence::Unary,
      Self::Not => Precedence::Not,
      Self::Tilde => Precedence::Tilde,
    }
  }

  /// The minimum precedence of the operand
  #[must_use]
  pub fn operand_precedence(self) -> Precedence {
    self.precedence().next()
  }
}

/// Is the name a user defined operator, such as `%in%`?
#[must_use]
pub fn is_custom_operator(name: &str) -> bool {
  name.len() >= 2
    && name.starts_with('%')
    && name.ends_with('%')
    && !name[1..name.len() - 1].contains(['%', '\n'])
}
