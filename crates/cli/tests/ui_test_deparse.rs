//! # UI Tests for Deparsing and Checking
#![cfg(not(miri))]

use assert_cmd::Command;
use indoc::indoc;

fn run(args: &[&str], source: &str) -> (Option<i32>, String, String) {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(args)
    .write_stdin(source)
    .output()
    .unwrap();

  (
    output.status.code(),
    String::from_utf8(output.stdout).unwrap(),
    String::from_utf8(output.stderr).unwrap(),
  )
}

#[test]
fn deparse_canonical_source() {
  let (code, stdout, stderr) = run(&["deparse", "-"], "square<-function(x)x^2\nx->y\n");

  assert_eq!(code, Some(0));
  assert!(stderr.is_empty());
  assert_eq!(stdout, "square <- function(x) x^2\ny <- x\n");
}

#[test]
fn fmt_is_an_alias() {
  let (code, stdout, _) = run(&["fmt", "-"], "f(a,b)");

  assert_eq!(code, Some(0));
  assert_eq!(stdout, "f(a, b)\n");
}

#[test]
fn deparse_with_config() {
  let source = indoc! {r#"
    f <- function(x) { paste("value", x) }
  "#};
  let (code, stdout, _) = run(
    &["deparse", "--indent", "2", "--single-quotes", "-"],
    source,
  );

  assert_eq!(code, Some(0));
  let expected = indoc! {"
    f <- function(x) {
      paste('value', x)
    }
  "};
  assert_eq!(stdout, expected);
}

#[test]
fn deparse_narrow_width() {
  let (code, stdout, _) = run(
    &["deparse", "--width", "10", "-"],
    "list(alpha, beta)",
  );

  assert_eq!(code, Some(0));
  let expected = indoc! {"
    list(
        alpha,
        beta
    )
  "};
  assert_eq!(stdout, expected);
}

#[test]
fn deparse_parse_error() {
  let (code, stdout, stderr) = run(&["deparse", "-"], "a < b < c");

  assert_eq!(code, Some(2));
  assert!(stdout.is_empty());
  assert!(stderr.starts_with("✕ Error: Chained Comparison\n"));
}

#[test]
fn check_round_trips() {
  let source = indoc! {"
    x[, 1]
    if (a) b else c
    -(1:10)^2
    model <- y ~ x + log(z)
  "};
  let (code, stdout, stderr) = run(&["check", "-"], source);

  assert_eq!(code, Some(0));
  assert!(stderr.is_empty());
  assert_eq!(stdout, "✓ 4 units round trip\n");
}

#[test]
fn check_empty_file() {
  let (code, stdout, _) = run(&["check", "-"], "# only a comment\n");

  assert_eq!(code, Some(0));
  assert_eq!(stdout, "✓ 0 units round trip\n");
}

#[test]
fn check_parse_error() {
  let (code, stdout, stderr) = run(&["check", "-"], "f(");

  assert_eq!(code, Some(2));
  assert!(stdout.is_empty());
  assert!(stderr.starts_with("✕ Error: Unexpected End of Input\n"));
}

#[test]
fn verbose_logs_to_stderr() {
  let (code, stdout, stderr) = run(&["--verbose", "deparse", "-"], "a\nb");

  assert_eq!(code, Some(0));
  assert_eq!(stdout, "a\nb\n");
  assert!(stderr.contains("deparsed"));
  assert!(!stdout.contains("deparsed"));
}
