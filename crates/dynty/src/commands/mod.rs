//! Handlers behind the `dynty` command line.
//!
//! Each handler takes the raw arguments of its command and returns what the
//! binary prints, leaving output and exit status to `main`.

use std::fmt::Write as _;

use dynty_lexer::{tokenize, TokenKind};
use dynty_parse::{parse, parse_with};
use dynty_value::{AliasRegistry, TypeFormatter, Value};

use crate::Error;

/// Result of a command: text to print and whether the answer was yes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn answer(success: bool) -> Self {
        Outcome {
            output: success.to_string(),
            success,
        }
    }

    fn text(output: String) -> Self {
        Outcome {
            output,
            success: true,
        }
    }
}

pub const USAGE: &str = "\
Usage: dynty <command> [args]

Commands:
  parse <type>               Parse a type expression and print it normalized
  check <type> <json>        Is the JSON document an instance of the type?
  assignable <type> <type>   Is every instance of the second type an instance of the first?
  lex <type>                 Print the tokens of a type expression

Exit status: 0 on success or true, 1 on false, 2 on error.
Set RUST_LOG (e.g. RUST_LOG=dynty_value=trace) for diagnostics.";

/// Dispatch `args` (without the program name).
pub fn run(args: &[String]) -> Result<Outcome, Error> {
    let Some((command, rest)) = args.split_first() else {
        return Err(usage("missing command"));
    };
    match command.as_str() {
        "parse" => parse_command(one_arg(command, rest)?),
        "check" => {
            let (t, json) = two_args(command, rest)?;
            check(t, json)
        }
        "assignable" => {
            let (a, b) = two_args(command, rest)?;
            assignable(a, b)
        }
        "lex" => lex(one_arg(command, rest)?),
        "help" | "--help" | "-h" => Ok(Outcome::text(USAGE.to_owned())),
        other => Err(usage(&format!("unknown command `{other}`"))),
    }
}

/// `dynty parse <type>`: the rendered type.
pub fn parse_command(text: &str) -> Result<Outcome, Error> {
    let t = parse(text)?;
    tracing::debug!(tag = ?t.tag(), "parsed");
    Ok(Outcome::text(t.to_string()))
}

/// `dynty check <type> <json>`: instance test of a JSON document.
pub fn check(type_text: &str, json_text: &str) -> Result<Outcome, Error> {
    let t = parse(type_text)?;
    let json: serde_json::Value = serde_json::from_str(json_text)?;
    let value = Value::from(json);
    Ok(Outcome::answer(t.instance(&value)))
}

/// `dynty assignable <a> <b>`: whether `b` is assignable to `a`.
///
/// Both expressions share one alias registry, so `b` may use aliases that
/// `a` declares.
pub fn assignable(a: &str, b: &str) -> Result<Outcome, Error> {
    let registry = AliasRegistry::new();
    let target = parse_with(a, &registry)?;
    let source = parse_with(b, &registry)?;
    let answer = target.assignable(&source);
    tracing::debug!(
        target = %TypeFormatter::with_aliases(&registry.snapshot()).format(&target),
        answer,
        "assignability checked"
    );
    Ok(Outcome::answer(answer))
}

/// `dynty lex <type>`: one line per token.
pub fn lex(text: &str) -> Result<Outcome, Error> {
    let mut output = String::new();
    for token in tokenize(text)? {
        if token.kind == TokenKind::Eof {
            break;
        }
        let _ = writeln!(output, "{:?} {} {:?}", token.span, token.kind, &*token.text);
    }
    Ok(Outcome::text(output.trim_end().to_owned()))
}

fn one_arg<'a>(command: &str, rest: &'a [String]) -> Result<&'a str, Error> {
    match rest {
        [arg] => Ok(arg),
        _ => Err(usage(&format!("`{command}` takes one argument"))),
    }
}

fn two_args<'a>(command: &str, rest: &'a [String]) -> Result<(&'a str, &'a str), Error> {
    match rest {
        [a, b] => Ok((a, b)),
        _ => Err(usage(&format!("`{command}` takes two arguments"))),
    }
}

fn usage(message: &str) -> Error {
    Error::Usage(format!("{message}\n\n{USAGE}"))
}
