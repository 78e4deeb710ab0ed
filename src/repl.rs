use crate::error_handling::*;
use crate::evaluating::*;
use crate::parsing::*;
use crate::reading::*;
use log::info;
use std::io::Write;

pub struct Options {
    pub prompt: String,
    pub show_tree: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self{prompt: "> ".into(), show_tree: true}
    }
}

/// Handles one line: prints its tree and value, or the reason it failed.
///
/// Returns whether the line both parsed and evaluated. Only failures to
/// write the output are returned as errors.
pub fn respond<W: Write>(line: &str, variables: &mut Variables, output: &mut W, options: &Options) -> Result<bool> {
    let outcome = parse(line).and_then(|tree| {
        if options.show_tree {
            write!(output, "{tree}")?;
        }
        evaluate(&tree, variables)
    });

    match outcome {
        Ok(value) => {
            writeln!(output, "{value}")?;
            Ok(true)
        },
        Err(error) if error.is_user_error() => {
            writeln!(output, "{error}")?;
            Ok(false)
        },
        Err(error) => Err(error),
    }
}

/// Reads and answers lines until the source runs dry.
pub fn run<S: LineSource, W: Write>(source: &mut S, output: &mut W, variables: &mut Variables, options: &Options) -> Result<()> {
    while let Some(line) = source.read_line(&options.prompt)? {
        if respond(&line, variables, output, options)? {
            source.add_history(&line)?;
        }
        output.flush()?;
    }
    info!("input ended with {} variables bound", variables.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn quiet() -> Options {
        Options{show_tree: false, ..Options::default()}
    }

    fn session(lines: &[&str]) -> (String, ScriptedLines, Variables) {
        let mut source = ScriptedLines::new(lines.iter().copied());
        let mut output = Vec::new();
        let mut variables = Variables::new();
        run(&mut source, &mut output, &mut variables, &quiet()).unwrap();
        (String::from_utf8(output).unwrap(), source, variables)
    }

    #[rstest]
    #[case("2+3*4", "14\n")]
    #[case("1/0", "divide by 0 error\n")]
    #[case("y+1", "undefined variable: 'y'\n")]
    #[case("2+", "syntax error...\n")]
    #[case("0.5*3", "1.5\n")]
    fn single_lines(#[case] line: &str, #[case] expected: &str) {
        let (output, _, _) = session(&[line]);
        assert_eq!(output, expected);
    }

    #[test]
    fn variables_persist_across_lines() {
        let (output, _, variables) = session(&["x=5", "x+1", "x=10", "x"]);
        assert_eq!(output, "5\n6\n10\n10\n");
        assert_eq!(variables.get("x"), Some(&10.0));
    }

    #[test]
    fn only_accepted_lines_reach_history() {
        let (_, source, _) = session(&["x=5", "(1+2", "1/0", "q", "x*2"]);
        assert_eq!(source.history, vec!["x=5".to_string(), "x*2".to_string()]);
    }

    #[test]
    fn syntax_errors_leave_variables_alone() {
        let (output, _, variables) = session(&["x=1", "x=2+", "x"]);
        assert_eq!(output, "1\nsyntax error...\n1\n");
        assert_eq!(variables.len(), 1);
    }

    #[test]
    fn tree_precedes_value() {
        let mut output = Vec::new();
        let accepted = respond("3*x", &mut Variables::from([("x".to_string(), 2.0)]), &mut output, &Options::default()).unwrap();
        assert!(accepted);
        let expected = "\
+ START[MULTITIVE]
  - PRIMARY[NUMBER] (3)
  - MULTITIVE_OPERATOR (*)
  + PRIMARY[VARIABLE]
    - IDENTIFIER (x)
6
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn tree_is_printed_before_runtime_errors() {
        let mut output = Vec::new();
        let accepted = respond("z", &mut Variables::new(), &mut output, &Options::default()).unwrap();
        assert!(!accepted);
        assert_eq!(String::from_utf8(output).unwrap(), "+ START[VARIABLE]\n  - IDENTIFIER (z)\nundefined variable: 'z'\n");
    }
}
