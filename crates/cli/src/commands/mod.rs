use super::diagnostics::{CodeFrame, Message, Severity, display_name};

use sprig_deparser::{Config, StructuralError, deparse_all, deparse_with};
use sprig_syntax::{
  DriverError, Evaluator, Node, Outcome, ParseError, TokenKind, Tree, parse_single, tokenise,
};

use anstream::{eprintln, print, println};
use owo_colors::OwoColorize;
use std::fs;
use tracing::{debug, info};

pub enum CommandStatus {
  /// Command was successful, no errors or warnings occurred
  Success,
  /// Command ran, but found a problem with the file
  Failure,
}

const MAX_SIZE: usize = u32::MAX as usize;

fn read_file(filename: &str) -> Result<String, ()> {
  let source = if filename == "-" {
    read_stdin()?
  } else {
    match fs::read_to_string(filename) {
      Ok(file) => file,
      Err(_) => {
        eprintln!("{}", Message::error(format!("File not found `{filename}`")));
        return Err(());
      }
    }
  };

  if source.len() >= MAX_SIZE {
    eprintln!("{}", Message::error("File too large - max size 4GB".into()));
    return Err(());
  }
  if source.trim().is_empty() {
    let filename = display_name(filename);
    eprintln!("{}", Message::warning(format!("Empty file `{filename}`")));
  }

  debug!(file = display_name(filename), bytes = source.len(), "read source");
  Ok(source)
}

fn read_stdin() -> Result<String, ()> {
  use std::io::{self, Read};

  let mut buffer = Vec::new();
  if io::stdin().lock().read_to_end(&mut buffer).is_err() {
    eprintln!("{}", Message::error("Problem Reading from STDIN".into()));
    return Err(());
  }

  String::from_utf8(buffer).map_err(|_| {
    eprintln!("{}", Message::error("STDIN is not valid UTF-8".into()));
  })
}

fn report_parse_error(filename: &str, source: &str, error: &ParseError) {
  eprintln!("{}", Message::from(error));
  eprintln!("{}", CodeFrame::new(filename, source, error.span()));
}

fn parse(filename: &str, source: &str) -> Result<Vec<Node>, ()> {
  sprig_syntax::parse(source).map_err(|error| report_parse_error(filename, source, &error))
}

pub fn deparse(filename: &str, config: Config) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;
  let units = parse(filename, &source)?;

  match deparse_all(&units, config) {
    Ok(output) => {
      info!(units = units.len(), "deparsed");
      print!("{output}");
      Ok(CommandStatus::Success)
    }
    Err(error) => {
      eprintln!("{}", Message::from(&error));
      Ok(CommandStatus::Failure)
    }
  }
}

/// Deparses each unit, then checks it parses back into the same tree
struct RoundTrip {
  config: Config,
}

enum RoundTripError {
  Structural(StructuralError),
  Reparse { deparsed: String, error: ParseError },
  Mismatch { deparsed: String },
}

impl Evaluator for RoundTrip {
  type Environment = usize;
  type Value = usize;
  type Error = RoundTripError;

  fn evaluate(&mut self, unit: &Node, checked: &mut usize) -> Result<usize, RoundTripError> {
    let deparsed = deparse_with(unit, self.config).map_err(RoundTripError::Structural)?;

    match parse_single(&deparsed) {
      Ok(reparsed) if reparsed == *unit => {
        *checked += 1;
        Ok(*checked)
      }
      Ok(_) => Err(RoundTripError::Mismatch { deparsed }),
      Err(error) => Err(RoundTripError::Reparse { deparsed, error }),
    }
  }
}

pub fn check(filename: &str, config: Config) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;

  let mut checked = 0;
  let (unit, error) = match sprig_syntax::run(&source, &mut RoundTrip { config }, &mut checked) {
    Ok(Outcome::Empty | Outcome::Value(_)) => {
      println!("{} {checked} units round trip", "✓".green().bold());
      return Ok(CommandStatus::Success);
    }
    Err(DriverError::Parse(error)) => {
      report_parse_error(filename, &source, &error);
      return Err(());
    }
    Err(DriverError::Evaluation { unit, error }) => (unit, error),
  };

  let location = format!("unit {} of `{}`", unit + 1, display_name(filename));
  match error {
    RoundTripError::Structural(error) => {
      let mut message = Message::from(&error);
      message.hint = Some(format!("in {location}"));
      eprintln!("{message}");
    }
    RoundTripError::Reparse { deparsed, error } => {
      eprintln!("{}", Message {
        title: "Deparsed Source Does Not Parse".into(),
        body: format!("{location} was deparsed into source with an error: {}", error.message()),
        hint: None,
        severity: Severity::Error,
      });
      eprintln!("{}", CodeFrame::new("Deparsed", &deparsed, error.span()));
    }
    RoundTripError::Mismatch { deparsed } => {
      eprintln!("{}", Message {
        title: "Deparsed Source Changed The Tree".into(),
        body: format!("{location} parses back into a different tree"),
        hint: Some(format!("it was deparsed as `{deparsed}`")),
        severity: Severity::Error,
      });
    }
  }

  Ok(CommandStatus::Failure)
}

fn has_text(kind: TokenKind) -> bool {
  matches!(
    kind,
    TokenKind::Identifier
      | TokenKind::QuotedIdentifier
      | TokenKind::Number
      | TokenKind::String
      | TokenKind::CustomOperator
  )
}

pub fn print_tokens(filename: &str) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;

  println!("    ╭─[Tokens: {}]", display_name(filename));
  for token in tokenise(&source) {
    let token = match token {
      Ok(token) => token,
      Err(error) => {
        println!("────╯");
        eprintln!("{}", Message::from(&error));
        eprintln!("{}", CodeFrame::new(filename, &source, error.span()));
        return Ok(CommandStatus::Failure);
      }
    };

    print!("{:>3} │ {}", token.start, token.kind);
    if has_text(token.kind) {
      print!(" ({})", token.text(&source));
    }
    println!();
  }
  println!("────╯");

  Ok(CommandStatus::Success)
}

pub fn print_tree(filename: &str) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;
  let units = parse(filename, &source)?;

  println!("╭─[Tree: {}]", display_name(filename));
  print!("{}", Tree(&units));
  println!("╯");

  Ok(CommandStatus::Success)
}
