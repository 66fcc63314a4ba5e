//! # UI Tests for Parse Errors
#![cfg(not(miri))]

use assert_cmd::Command;
use indoc::indoc;

fn tree_stderr(file: &str) -> String {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(["print", "tree", "-"])
    .write_stdin(file)
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(2));
  assert!(output.stdout.is_empty());
  String::from_utf8(output.stderr).unwrap()
}

#[test]
fn expected() {
  let file = indoc! {"
    (5
    3
  "};
  let output = tree_stderr(file);
  let expected = indoc! {"
    ✕ Error: Expected Token
    expected ) but got Number

        ╭─[STDIN:2]
      2 │ 3
    ────╯
  "};
  assert_eq!(output, expected);
}

#[test]
fn only_first_error_is_reported() {
  let file = indoc! {"
    a <- 1
    b <- )
    c <- ]
  "};
  let output = tree_stderr(file);
  let expected = indoc! {"
    ✕ Error: Expected Expression
    expected expression but got )

        ╭─[STDIN:2]
      2 │ b <- )
    ────╯
  "};
  assert_eq!(output, expected);
}

#[test]
fn chained_comparison() {
  let output = tree_stderr("a < b < c\n");
  let expected = indoc! {"
    ✕ Error: Chained Comparison
    comparisons can't be chained, use brackets to choose the order
    hint: write `(a < b) < c`

        ╭─[STDIN:1]
      1 │ a < b < c
    ────╯
  "};
  assert_eq!(output, expected);
}

#[test]
fn unterminated_string() {
  let output = tree_stderr("x <- 'abc\n");
  let expected = indoc! {"
    ✕ Error: Unterminated String
    missing closing '

        ╭─[STDIN:1]
      1 │ x <- 'abc
    ────╯
  "};
  assert_eq!(output, expected);
}

#[test]
fn unexpected_end_of_input() {
  let output = tree_stderr("f(1,\n");
  let expected = indoc! {"
    ✕ Error: Unexpected End of Input
    the source ended before the expression was complete

  "};
  assert!(output.starts_with(expected), "{output}");
}

#[test]
fn two_expressions_on_a_line() {
  let output = tree_stderr("a b\n");
  let expected = indoc! {"
    ✕ Error: Unexpected Token
    unexpected Identifier, expressions must be separated by a new line or `;`

        ╭─[STDIN:1]
      1 │ a b
    ────╯
  "};
  assert_eq!(output, expected);
}
