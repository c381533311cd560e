//! Overwrite confirmation.
//!
//! The relocator only talks to [`Confirm`]; the binaries plug in [`StdinConfirm`],
//! tests pass closures with canned answers.

use std::io::{self, BufRead, Write};

pub trait Confirm {
    /// Show `prompt` and return whether the user agreed.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> io::Result<bool>,
{
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self(prompt)
    }
}

/// Only `y` / `Y` agrees; surrounding whitespace is ignored.
pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case("y")
}

/// Prompt on a writer and read one reply line from a reader.
#[derive(Debug)]
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        // EOF (0 bytes) reads as an empty reply, i.e. "no".
        self.input.read_line(&mut line)?;
        Ok(is_affirmative(&line))
    }
}

/// The terminal: prompt on stdout, answer on stdin.
pub type StdinConfirm = LineConfirm<io::StdinLock<'static>, io::Stdout>;

pub fn stdin_confirm() -> StdinConfirm {
    LineConfirm::new(io::stdin().lock(), io::stdout())
}
