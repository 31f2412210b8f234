//! Operator input capability
//!
//! Deployers and the menu never read the terminal directly; they go
//! through [`InputSource`] so tests can script operator answers.

use std::io;

/// One line of operator input per call
pub trait InputSource {
    /// Prompt and read a single line. An `UnexpectedEof` error means the
    /// input stream ended (operator hung up); the menu treats it as exit.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Terminal-backed input using dialoguer
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleInput;

impl InputSource for ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let line: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| match e {
                dialoguer::Error::IO(io_err) => io_err,
            })?;
        Ok(line)
    }
}

/// Queue-backed input for tests
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input exhausted"))
    }
}
