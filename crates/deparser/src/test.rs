use super::config::{Config, Indentation, LineEnding};
use super::printer::{IR, Printer};
use super::{StructuralError, deparse, deparse_all, deparse_with};
use bumpalo::Bump as Allocator;
use indoc::indoc;
use sprig_syntax::{
  Argument, Constant, FormalList, Node, make_call, make_formal_list, missing_argument, parse,
  parse_single,
};

macro_rules! assert_deparse {
  ($source:expr, $expected:expr) => {
    let tree = parse_single($source).unwrap();
    let output = deparse(&tree).unwrap();
    assert_eq!(output, $expected);
    assert_eq!(parse_single(&output).unwrap(), tree);
  };
}

fn positional(node: Node) -> Argument {
  Argument::positional(node)
}

#[test]
fn constants() {
  assert_deparse!("TRUE", "TRUE");
  assert_deparse!("FALSE", "FALSE");
  assert_deparse!("NULL", "NULL");
  assert_deparse!("5L", "5L");
  assert_deparse!("0.1", "0.1");
  assert_deparse!("1e5", "100000");
  assert_deparse!("1e300", "1e+300");
  assert_deparse!("2.5e20", "2.5e+20");
  assert_deparse!("1e-5", "1e-5");
  assert_deparse!("1.5e-7", "1.5e-7");
  assert_deparse!("Inf", "Inf");
  assert_deparse!("NaN", "NaN");
  assert_deparse!("'hello'", "\"hello\"");
  assert_deparse!(r#""a\"b""#, r#""a\"b""#);
  assert_deparse!(r#""tab\there""#, r#""tab\there""#);
}

#[test]
fn symbols() {
  assert_deparse!("x", "x");
  assert_deparse!(".hidden", ".hidden");
  assert_deparse!("`my var`", "`my var`");
  assert_deparse!("`if`", "`if`");
}

#[test]
fn binary() {
  assert_deparse!("a+b", "a + b");
  assert_deparse!("a   *    b", "a * b");
  assert_deparse!("a%in%b", "a %in% b");
  assert_deparse!("y ~ x", "y ~ x");
  assert_deparse!("a ^ b", "a^b");
  assert_deparse!("1 : 10", "1:10");
  assert_deparse!("x $ y", "x$y");
  assert_deparse!("x @ y", "x@y");
  assert_deparse!("x$`a b`", "x$`a b`");
  assert_deparse!("x$'a'", "x$a");
}

#[test]
fn parentheses_follow_precedence() {
  assert_deparse!("(a + b) * c", "(a + b) * c");
  assert_deparse!("a + (b * c)", "a + b * c");
  assert_deparse!("a - (b - c)", "a - (b - c)");
  assert_deparse!("(a - b) - c", "a - b - c");
  assert_deparse!("(a^b)^c", "(a^b)^c");
  assert_deparse!("a^(b^c)", "a^b^c");
  assert_deparse!("-2^2", "-2^2");
  assert_deparse!("(-2)^2", "(-2)^2");
  assert_deparse!("a <- (b <- c)", "a <- b <- c");
  assert_deparse!("(a <- b) <- c", "(a <- b) <- c");
  assert_deparse!("(a + b)$c", "(a + b)$c");
  assert_deparse!("(-x)$y", "(-x)$y");
}

#[test]
fn comparisons_are_always_grouped() {
  assert_deparse!("(a == b) == c", "(a == b) == c");
  assert_deparse!("a == (b == c)", "a == (b == c)");
  assert_deparse!("(a < b) != (c > d)", "(a < b) != (c > d)");
}

#[test]
fn prefix_operators() {
  assert_deparse!("- a", "-a");
  assert_deparse!("!a", "!a");
  assert_deparse!("~ a + b", "~a + b");
  assert_deparse!("-a + b", "-a + b");
  assert_deparse!("!a == b", "!a == b");
  assert_deparse!("(!a) == b", "(!a) == b");
  assert_deparse!("a * !b", "a * !b");
  assert_deparse!("(a * !b) + c", "(a * !b) + c");
  assert_deparse!("!a & b", "!a & b");
  assert_deparse!("a^-b", "a^-b");
}

#[test]
fn right_assign_is_written_as_left_assign() {
  assert_deparse!("a -> b", "b <- a");
  assert_deparse!("a ->> b", "b <<- a");
}

#[test]
fn equals() {
  assert_deparse!("x = 1", "x = 1");
  assert_deparse!("x = y = 1", "x = y = 1");
  assert_deparse!("f((a = 1))", "f((a = 1))");
  assert_deparse!("if ((a = 1)) b", "if ((a = 1)) b");
  assert_deparse!("function(x = (y = 1)) x", "function(x = (y = 1)) x");
  assert_deparse!("f(function(x) (y = 1))", "f(function(x) (y = 1))");
  assert_deparse!("{ x = 1 }", "{\n    x = 1\n}");
}

#[test]
fn calls() {
  assert_deparse!("f()", "f()");
  assert_deparse!("f(a,b = 1)", "f(a, b = 1)");
  assert_deparse!("f(, 1)", "f(, 1)");
  assert_deparse!("f(a, )", "f(a, )");
  assert_deparse!("alist(x = )", "alist(x = )");
  assert_deparse!("f(`a b` = 1)", "f(`a b` = 1)");
  assert_deparse!("f('a b' = 1)", "f(`a b` = 1)");
  assert_deparse!("`my f`(1)", "`my f`(1)");
  assert_deparse!("'f'(1)", "f(1)");
  assert_deparse!("f(x)(y)", "f(x)(y)");
  assert_deparse!("x$a(1)", "x$a(1)");
  assert_deparse!("(a + b)(c)", "(a + b)(c)");
  assert_deparse!("(function(x) x)(1)", "(function(x) x)(1)");
}

#[test]
fn operators_without_operator_shape_are_prefix_calls() {
  assert_deparse!("`+`(a, b, c)", "`+`(a, b, c)");
  assert_deparse!("`+`(a = 1, b)", "`+`(a = 1, b)");
  assert_deparse!("`-`(a)", "-a");
  assert_deparse!("`+`(a, b)", "a + b");
  assert_deparse!("`if`(a)", "`if`(a)");
  assert_deparse!("`[`(x)", "`[`(x)");
  assert_deparse!("`$`(x, f(y))", "`$`(x, f(y))");
}

#[test]
fn index() {
  assert_deparse!("x[]", "x[]");
  assert_deparse!("x[1]", "x[1]");
  assert_deparse!("x[ , 1]", "x[, 1]");
  assert_deparse!("x[1, drop = FALSE]", "x[1, drop = FALSE]");
  assert_deparse!("x[[1]]", "x[[1]]");
  assert_deparse!("x[[y[1]]]", "x[[y[1]]]");
  assert_deparse!("x[1][2]", "x[1][2]");
  assert_deparse!("(-x)[1]", "(-x)[1]");
}

#[test]
fn functions() {
  assert_deparse!("function(x,y=2) x+y", "function(x, y = 2) x + y");
  assert_deparse!("function() NULL", "function() NULL");
  assert_deparse!("function(x = ) x", "function(x = ) x");
  assert_deparse!("function(...) list(...)", "function(...) list(...)");
  assert_deparse!("function(`a b`) 1", "function(`a b`) 1");
  assert_deparse!("(function(x) x) + 1", "(function(x) x) + 1");
  assert_deparse!("function(x) x + 1", "function(x) x + 1");
}

#[test]
fn control_flow() {
  assert_deparse!("if(a)b", "if (a) b");
  assert_deparse!("if (a) b else c", "if (a) b else c");
  assert_deparse!("if (a) (if (b) c) else d", "if (a) (if (b) c) else d");
  assert_deparse!("if (a) if (b) c else d", "if (a) if (b) c else d");
  assert_deparse!("(if (a) b) + 1", "(if (a) b) + 1");
  assert_deparse!("for(i in 1:10) print(i)", "for (i in 1:10) print(i)");
  assert_deparse!("while (TRUE) break", "while (TRUE) break");
  assert_deparse!("repeat next", "repeat next");
  assert_deparse!("(repeat next)(1)", "(repeat next)(1)");
}

#[test]
fn blocks() {
  assert_deparse!("{}", "{}");
  assert_deparse!("{a; b}", "{\n    a\n    b\n}");
  assert_deparse!(
    "function(x) { x + 1 }",
    indoc! {"
      function(x) {
          x + 1
      }"
    }
  );
  assert_deparse!(
    "if (a) { b } else { c }",
    indoc! {"
      if (a) {
          b
      } else {
          c
      }"
    }
  );
  assert_deparse!(
    "{ if (a) { b } }",
    indoc! {"
      {
          if (a) {
              b
          }
      }"
    }
  );
}

#[test]
fn long_argument_lists_break() {
  let config = Config {
    print_width: 20,
    ..Config::default()
  };

  let tree = parse_single("f(aaaaaaaaaa, bbbbbbbbbb)").unwrap();
  let output = deparse_with(&tree, config).unwrap();
  assert_eq!(
    output,
    indoc! {"
      f(
          aaaaaaaaaa,
          bbbbbbbbbb
      )"
    }
  );
  assert_eq!(parse_single(&output).unwrap(), tree);

  let tree = parse_single("f(g(aaaaaaaaaa), bbbbbbbbbb)").unwrap();
  let output = deparse_with(&tree, config).unwrap();
  assert_eq!(
    output,
    indoc! {"
      f(
          g(aaaaaaaaaa),
          bbbbbbbbbb
      )"
    }
  );
  assert_eq!(parse_single(&output).unwrap(), tree);

  let tree = parse_single("x[aaaaaaaaaa, bbbbbbbbbb]").unwrap();
  let output = deparse_with(&tree, config).unwrap();
  assert_eq!(output, "x[\n    aaaaaaaaaa,\n    bbbbbbbbbb\n]");
  assert_eq!(parse_single(&output).unwrap(), tree);
}

#[test]
fn short_argument_lists_stay_on_one_line() {
  let tree = parse_single("f(aaaaaaaaaa, bbbbbbbbbb)").unwrap();
  let config = Config {
    print_width: 26,
    ..Config::default()
  };
  assert_eq!(
    deparse_with(&tree, config).unwrap(),
    "f(aaaaaaaaaa, bbbbbbbbbb)"
  );
}

#[test]
fn config_indentation() {
  let tree = parse_single("f(a)").unwrap();
  let mut config = Config {
    print_width: 1,
    ..Config::default()
  };

  config.indentation = 2.into();
  assert_eq!(deparse_with(&tree, config).unwrap(), "f(\n  a\n)");
  config.indentation = Indentation::Space(4);
  assert_eq!(deparse_with(&tree, config).unwrap(), "f(\n    a\n)");
  config.indentation = 0.into();
  assert_eq!(deparse_with(&tree, config).unwrap(), "f(\n\ta\n)");
}

#[test]
fn config_quote() {
  let tree = parse_single(r#""it's""#).unwrap();
  let mut config = Config::default();

  assert_eq!(deparse_with(&tree, config).unwrap(), r#""it's""#);
  config.single_quotes = true;
  let output = deparse_with(&tree, config).unwrap();
  assert_eq!(output, r"'it\'s'");
  assert_eq!(parse_single(&output).unwrap(), tree);
}

#[test]
fn config_line_ending() {
  let units = parse("{a}\nb").unwrap();
  let config = Config {
    line_ending: LineEnding::CarriageReturnLineFeed,
    ..Config::default()
  };

  assert_eq!(
    deparse_all(&units, config).unwrap(),
    "{\r\n    a\r\n}\r\nb\r\n"
  );
}

#[test]
fn all_units() {
  let units = parse("a\nb <- 1; f(x)").unwrap();
  let output = deparse_all(&units, Config::default()).unwrap();

  assert_eq!(output, "a\nb <- 1\nf(x)\n");
  assert_eq!(parse(&output).unwrap(), units);
  assert_eq!(deparse_all(&[], Config::default()).unwrap(), "");
}

#[test]
fn constructed_trees() {
  let x = || Node::symbol("x");

  let sum = make_call("+", [positional(x()), positional(Node::symbol("y"))]).unwrap();
  assert_eq!(deparse(&sum).unwrap(), "x + y");

  let named = make_call("f", [Argument::named("x", missing_argument().clone())]).unwrap();
  assert_eq!(deparse(&named).unwrap(), "f(x = )");

  let string_member = make_call("$", [positional(x()), positional(Constant::from("a").into())]);
  assert_eq!(deparse(&string_member.unwrap()).unwrap(), "`$`(x, \"a\")");

  let not_a_function = make_call("function", [positional(x()), positional(x())]).unwrap();
  assert_eq!(deparse(&not_a_function).unwrap(), "`function`(x, x)");

  let formals = make_formal_list([("x", None), ("y", Some(Constant::Double(1.0).into()))]);
  assert_eq!(deparse(&formals.unwrap()).unwrap(), "x, y = 1");
}

#[test]
fn negative_constants() {
  let minus_one = Node::from(Constant::Double(-1.0));
  assert_eq!(deparse(&minus_one).unwrap(), "-1");
  assert_eq!(deparse(&Constant::Integer(-3).into()).unwrap(), "-3L");

  let power = make_call(
    "^",
    [positional(minus_one), positional(Constant::Double(2.0).into())],
  );
  assert_eq!(deparse(&power.unwrap()).unwrap(), "(-1)^2");
}

#[test]
fn structural_errors() {
  assert_eq!(
    deparse(missing_argument()),
    Err(StructuralError::MissingArgumentOutsideArgument { path: vec![] })
  );

  let lone = make_call("f", [Argument::missing()]).unwrap();
  assert_eq!(
    deparse(&lone),
    Err(StructuralError::LoneMissingArgument { path: vec![1] })
  );

  let empty = make_call("f", [positional(Node::symbol(""))]).unwrap();
  assert_eq!(
    deparse(&empty),
    Err(StructuralError::EmptySymbol { path: vec![1] })
  );

  let formals = make_call("f", [positional(FormalList::default().into())]).unwrap();
  let nested = make_call("g", [positional(Node::symbol("a")), positional(formals)]).unwrap();
  assert_eq!(
    deparse(&nested),
    Err(StructuralError::MisplacedFormalList { path: vec![2, 1] })
  );

  let units = [Node::symbol("a"), missing_argument().clone()];
  assert_eq!(
    deparse_all(&units, Config::default()),
    Err(StructuralError::MissingArgumentOutsideArgument { path: vec![1] })
  );
}

#[test]
fn error_messages() {
  let error = StructuralError::EmptySymbol { path: vec![2, 1] };
  assert_eq!(error.title(), "Empty Symbol");
  assert_eq!(error.message(), "a symbol must have a name (at [2, 1])");
  assert_eq!(error.path(), &[2, 1]);

  let error = StructuralError::MissingArgumentOutsideArgument { path: vec![] };
  assert_eq!(
    error.to_string(),
    "Missing Argument Outside Argument: the missing argument can only be an argument or a \
     default (at the root)"
  );
}

#[test]
fn printer_breaks_groups_which_do_not_fit() {
  let allocator = Allocator::new();
  let config = Config {
    print_width: 10,
    ..Config::default()
  };
  let printer = Printer::new(config, &allocator);

  assert_eq!(printer.print(&bracket(&printer, "short")), "[short]");
  assert_eq!(
    printer.print(&bracket(&printer, "much too long")),
    "[\n    much too long\n]"
  );

  let forced = printer.group([IR::Text("a"), IR::AlwaysLine, IR::Text("b")]);
  assert_eq!(printer.print(&forced), "a\nb");
}

fn bracket<'a>(printer: &Printer<'a>, text: &'a str) -> IR<'a> {
  printer.group([
    IR::Text("["),
    printer.indent([IR::Line, IR::Text(text)]),
    IR::Line,
    IR::Text("]"),
  ])
}
