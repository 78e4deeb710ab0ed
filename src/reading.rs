use crate::error_handling::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;

/// Supplies one line of input per call and remembers accepted lines.
pub trait LineSource {
    /// `None` once input has ended.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
    fn add_history(&mut self, line: &str) -> Result<()>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn add_history(&mut self, line: &str) -> Result<()> {
        self.add_history_entry(line)?;
        Ok(())
    }
}

/// Lines fixed up front, e.g. expressions given on the command line.
pub struct ScriptedLines {
    lines: VecDeque<String>,
    pub history: Vec<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self{lines: lines.into_iter().map(Into::into).collect(), history: Vec::new()}
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn add_history(&mut self, line: &str) -> Result<()> {
        self.history.push(line.into());
        Ok(())
    }
}
