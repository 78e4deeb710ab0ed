use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("syntax error...")]
    syntax_error,

    #[error("divide by 0 error")]
    divide_by_zero,

    #[error("undefined variable: '{0}'")]
    undefined_variable(String),

    #[error("could not read input: {0}")]
    input(#[from] ReadlineError),

    #[error("could not write output: {0}")]
    output(#[from] std::io::Error),
}

impl CalcError {
    /// Errors caused by the line itself, as opposed to the terminal around it.
    pub fn is_user_error(&self) -> bool {
        use CalcError::*;
        matches!(self, syntax_error | divide_by_zero | undefined_variable(_))
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
