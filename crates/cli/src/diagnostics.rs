use owo_colors::{OwoColorize, Style};
use sprig_syntax::{LineIndex, Span, TokenKind, tokenise};
use std::fmt;

#[derive(Debug)]
pub enum Severity {
  Error,
  Warning,
}
pub struct Message {
  pub title: String,
  pub body: String,
  pub hint: Option<String>,
  pub severity: Severity,
}
impl Message {
  pub fn error(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      hint: None,
      severity: Severity::Error,
    }
  }
  pub fn warning(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      hint: None,
      severity: Severity::Warning,
    }
  }
}
impl fmt::Display for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.severity {
      Severity::Error => write!(f, "{}", "✕ Error".bold().red()),
      Severity::Warning => write!(f, "{}", "⚠ Warning".bold().yellow()),
    }?;
    writeln!(f, "{} {}", ":".bold(), &self.title.bold())?;

    if !self.body.is_empty() {
      writeln!(f, "{}", &self.body)?;
    }

    if let Some(hint) = &self.hint {
      writeln!(f, "{} {}", "hint:".italic().cyan(), hint)?;
    }

    Ok(())
  }
}
impl From<&sprig_syntax::ParseError> for Message {
  fn from(error: &sprig_syntax::ParseError) -> Self {
    let hint = match error {
      sprig_syntax::ParseError::ChainedComparison(_) => Some("write `(a < b) < c`".to_owned()),
      _ => None,
    };

    Self {
      title: error.title().to_owned(),
      body: error.message(),
      hint,
      severity: Severity::Error,
    }
  }
}
impl From<&sprig_syntax::LexError> for Message {
  fn from(error: &sprig_syntax::LexError) -> Self {
    Self {
      title: error.title().to_owned(),
      body: error.message(),
      hint: None,
      severity: Severity::Error,
    }
  }
}
impl From<&sprig_deparser::StructuralError> for Message {
  fn from(error: &sprig_deparser::StructuralError) -> Self {
    Self {
      title: error.title().to_owned(),
      body: error.message(),
      hint: None,
      severity: Severity::Error,
    }
  }
}

pub struct CodeFrame<'a> {
  title: &'a str,
  source: &'a str,
  span: Span,

  lines: LineIndex,
}
impl<'a> CodeFrame<'a> {
  pub fn new(title: &'a str, source: &'a str, span: Span) -> Self {
    Self {
      title: display_name(title),
      source,
      span,
      lines: LineIndex::from_source(source),
    }
  }
}
impl fmt::Display for CodeFrame<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let last_line = self.lines.line_count();
    let start_line = self.lines.line(self.span).clamp(1, last_line);
    let end_line = self.lines.final_line(self.span).clamp(start_line, last_line);

    writeln!(
      f,
      "    {}{}{}{}{}",
      "╭─[".dimmed(),
      self.title,
      ":".dimmed(),
      start_line,
      "]".dimmed()
    )?;

    for line in start_line..=end_line {
      let line_text = self.lines.line_span(line).source_text(self.source);
      write!(f, "{line:>3} {}", "│".dimmed())?;
      if !line_text.is_empty() {
        write!(f, " ")?;
      }
      highlight_source(f, line_text)?;
      if !line_text.ends_with('\n') {
        writeln!(f)?;
      }
    }

    write!(f, "{}", "────╯".dimmed())
  }
}

/// The name to show for a file, where `-` is stdin
pub fn display_name(filename: &str) -> &str {
  if filename == "-" { "STDIN" } else { filename }
}

fn token_style(kind: TokenKind) -> Style {
  match kind {
    TokenKind::Number
    | TokenKind::True
    | TokenKind::False
    | TokenKind::Null
    | TokenKind::Inf
    | TokenKind::NaN => Style::new().blue(),
    TokenKind::String => Style::new().green(),
    TokenKind::Function => Style::new().magenta(),
    kind if kind.is_keyword() => Style::new().cyan(),
    _ => Style::new(),
  }
}

pub fn highlight_source(output: &mut dyn fmt::Write, source: &str) -> fmt::Result {
  let mut last = 0;
  for token in tokenise(source) {
    // the rest of a line which doesn't tokenise is left plain
    let Ok(token) = token else { break };

    // gaps between tokens are whitespace and comments
    let gap = Span::new(last, token.start).source_text(source);
    write!(output, "{}", gap.dimmed())?;

    write!(output, "{}", token.text(source).style(token_style(token.kind)))?;
    last = token.start + token.length;
  }

  write!(output, "{}", &source[(last as usize).min(source.len())..])
}
