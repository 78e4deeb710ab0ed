#![allow(nonstandard_style)]

mod error_handling;
mod evaluating;
mod parsing;
mod reading;
mod repl;

use clap::Parser;
use error_handling::*;
use evaluating::*;
use reading::*;
use repl::*;

/// Interactive calculator with variables.
///
/// Each line is parsed, its syntax tree printed, and its value shown.
/// Ctrl-C or Ctrl-D ends the session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Text shown before each line of input.
    #[arg(long, default_value = "> ")]
    prompt: String,

    /// Print only values and errors, not syntax trees.
    #[arg(long)]
    no_tree: bool,

    /// Evaluate these lines in order and exit instead of starting a session.
    #[arg(allow_hyphen_values = true)]
    expressions: Vec<String>,
}

fn session(args: Args) -> Result<()> {
    let options = Options{prompt: args.prompt, show_tree: !args.no_tree};
    let mut variables = Variables::new();
    let mut output = std::io::stdout();

    if args.expressions.is_empty() {
        let mut editor = rustyline::DefaultEditor::new()?;
        run(&mut editor, &mut output, &mut variables, &options)
    } else {
        let mut source = ScriptedLines::new(args.expressions);
        run(&mut source, &mut output, &mut variables, &options)
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = session(Args::parse()) {
        eprintln!("Error, {e}");
        std::process::exit(1);
    }
}
