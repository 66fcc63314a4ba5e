//! # Sprig
//! Read a program into a tree of calls, and write it back out again.
//!
//! Prints the tokens and trees of source files, and deparses them into canonical source.

#![allow(clippy::print_stdout)]

mod commands;
mod diagnostics;

use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Args, Parser, Subcommand};
use commands::CommandStatus;
use owo_colors::*;
use std::{io, process};
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
  .usage(Style::new().italic())
  .header(AnsiColor::BrightGreen.on_default().bold());

const LOG_VARIABLE: &str = "SPRIG_LOG";

fn about() -> String {
  format!(
    "{} {}\nParse programs into trees of calls, and deparse them back into source.",
    "Sprig".green().bold(),
    "(v0.1.0)".italic().dimmed()
  )
}

#[derive(Parser)]
#[clap(
  name = "sprig",
  version,
  about = about(),
  styles = STYLES,
  disable_help_subcommand = true,
)]
struct App {
  /// Log what the parser is doing to stderr
  #[clap(long, short, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Writes the file back out as canonical source
  #[clap(alias = "fmt")]
  Deparse(DeparseOptions),

  /// Checks the file deparses to source which parses back into the same trees
  Check(DeparseOptions),

  /// Prints debugging information
  Print {
    #[command(subcommand)]
    command: PrintCommand,
  },
}

#[derive(Args)]
struct DeparseOptions {
  /// The file to read, `-` for stdin
  file: String,

  /// Maximum line width
  #[clap(long, default_value_t = 80, help_heading = "Deparse Config")]
  width: u16,
  /// Indentation size (spaces) to use. If 0 uses tabs
  #[clap(long, default_value_t = 4, help_heading = "Deparse Config")]
  indent: u16,
  /// Quote strings with single quotes
  #[clap(long, help_heading = "Deparse Config")]
  single_quotes: bool,
}
impl DeparseOptions {
  fn config(&self) -> sprig_deparser::Config {
    sprig_deparser::Config {
      print_width: self.width,
      indentation: self.indent.into(),
      single_quotes: self.single_quotes,
      ..sprig_deparser::Config::default()
    }
  }
}

#[derive(Subcommand)]
enum PrintCommand {
  /// Displays the tokens in the file
  Tokens {
    /// The file to print
    file: String,
  },
  /// Displays the tree of each unit in the file
  Tree {
    /// The file to print
    file: String,
  },
}

fn setup_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env(LOG_VARIABLE).unwrap_or_else(|_| EnvFilter::new("off"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .without_time()
    .init();
}

fn main() -> process::ExitCode {
  let args = App::parse();
  setup_logging(args.verbose);

  let result = match args.command {
    Command::Deparse(options) => commands::deparse(&options.file, options.config()),
    Command::Check(options) => commands::check(&options.file, options.config()),
    Command::Print { command } => match command {
      PrintCommand::Tokens { file } => commands::print_tokens(&file),
      PrintCommand::Tree { file } => commands::print_tree(&file),
    },
  };

  match result {
    Ok(CommandStatus::Success) => process::ExitCode::from(0),
    Ok(CommandStatus::Failure) => process::ExitCode::from(1),
    Err(()) => process::ExitCode::from(2),
  }
}
