//! # Round Trip Tests
//!
//! Check that deparsing a parsed program gives source which parses back into the same trees,
//! however narrow the print width.

use indoc::indoc;
use sprig_deparser::{Config, deparse, deparse_all};
use sprig_syntax::{Node, parse};

const PROGRAM: &str = indoc! {r#"
  square <- function(x) x^2
  compose <- function(f, g) function(...) f(g(...))
  total <- 0
  for (i in seq_len(10)) {
    if (i %% 2 == 0) next
    total <- total + square(i)
  }
  while (total > 100) total <- total / 2
  repeat {
    total <- total - 1
    if (total < 0) break
  }
  result <- list(a = 1, b = "two", c = c(TRUE, FALSE, NULL), `odd name` = 3L)
  result$a <- -result$a
  result[["b"]] <- NULL
  m[1, , drop = FALSE]
  x[-1]
  alist(y = , z = 2)
  model <- y ~ x + log(z)
  f <- function(x, ..., verbose = FALSE) {
    if (verbose) message("x is ", x) else invisible(x)
  }
  value <- if (a) b else if (c) d else e
  -(1:10)^2
  !is.null(x) && length(x) > 0
  (function() 42)()
  x -> y
  "quoted"(1)
  lapply(seq_along(items), function(i) items[[i]]$value * weights[i])
  options(digits = 3); Sys.time()
"#};

fn round_trip(units: &[Node], print_width: u16) -> String {
  let config = Config {
    print_width,
    ..Config::default()
  };
  let output = deparse_all(units, config).unwrap();
  let reparsed = parse(&output).unwrap();

  assert_eq!(reparsed, units, "width {print_width}:\n{output}");
  output
}

#[test]
fn program_round_trips() {
  let units = parse(PROGRAM).unwrap();
  assert_eq!(units.len(), 23);

  for width in [80, 40, 20, 1] {
    round_trip(&units, width);
  }
}

#[test]
fn deparsing_is_stable() {
  let units = parse(PROGRAM).unwrap();
  let first = round_trip(&units, 30);
  let second = round_trip(&parse(&first).unwrap(), 30);

  assert_eq!(first, second);
}

#[test]
fn canonical_text() {
  let units = parse("square<-function(x)x^2\nx->y").unwrap();

  assert_eq!(
    deparse_all(&units, Config::default()).unwrap(),
    "square <- function(x) x^2\ny <- x\n"
  );
}

#[test]
fn each_unit_on_its_own() {
  for unit in parse(PROGRAM).unwrap() {
    let output = deparse(&unit).unwrap();
    assert_eq!(parse(&output).unwrap(), [unit]);
  }
}
