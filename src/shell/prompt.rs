//! Console prompts
//!
//! Line-oriented input with the `-1` cancel sentinel.

use std::fmt::Display;
use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::catalog::parse_date;
use crate::error::{LibraryError, Result};

/// Input that abandons the current operation
pub const CANCEL: &str = "-1";

/// What a prompt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    /// The user supplied a usable value
    Value(T),

    /// The user entered the sentinel, or input ended
    Cancelled,
}

impl<T> Answer<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Answer<U> {
        match self {
            Answer::Value(v) => Answer::Value(f(v)),
            Answer::Cancelled => Answer::Cancelled,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Answer::Cancelled)
    }
}

/// Reads answers from `input` and writes prompts and messages to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print an empty line
    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Read one line without its line ending; `None` at end of input
    ///
    /// A line that is not valid UTF-8 is consumed and fails with
    /// `InputFormat`, so the caller can report it and ask again.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let mut line = String::from_utf8(raw).map_err(|_| {
            tracing::debug!("discarded a line that is not valid UTF-8");
            LibraryError::InputFormat("Input must be plain text. Try again.".to_string())
        })?;

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print `prompt` (no newline) and read the answer
    ///
    /// Unreadable lines are reported and the prompt is repeated.
    pub fn ask(&mut self, prompt: &str) -> Result<Answer<String>> {
        loop {
            write!(self.output, "{prompt}")?;

            match self.read_line() {
                Ok(Some(line)) if line.trim() != CANCEL => return Ok(Answer::Value(line)),
                Ok(_) => return Ok(Answer::Cancelled),
                Err(e @ LibraryError::InputFormat(_)) => self.report(&e)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Read a menu selection, reporting unreadable lines and asking again
    ///
    /// `None` at end of input.
    pub fn read_choice(&mut self) -> Result<Option<String>> {
        loop {
            match self.read_line() {
                Err(e @ LibraryError::InputFormat(_)) => self.report(&e)?,
                other => return other,
            }
        }
    }

    /// Ask for a date until one parses
    pub fn ask_date(&mut self, prompt: &str) -> Result<Answer<NaiveDate>> {
        loop {
            let line = match self.ask(prompt)? {
                Answer::Value(line) => line,
                Answer::Cancelled => return Ok(Answer::Cancelled),
            };

            match parse_date(&line) {
                Ok(date) => return Ok(Answer::Value(date)),
                Err(e) => self.report(&e)?,
            }
        }
    }

    /// Ask for a loan duration in `1..=max` months until one is given
    pub fn ask_months(&mut self, max: u32) -> Result<Answer<u32>> {
        loop {
            self.say(format!(
                "How many months are you taking this book for? (Maximum {max} months)"
            ))?;
            self.say("Enter -1 to go back.")?;
            self.blank()?;

            let line = match self.ask("")? {
                Answer::Value(line) => line,
                Answer::Cancelled => return Ok(Answer::Cancelled),
            };

            match parse_months(&line, max) {
                Ok(months) => return Ok(Answer::Value(months)),
                Err(e) => self.report(&e)?,
            }
        }
    }

    /// Print an error as a console message, framed by blank lines
    pub fn report(&mut self, error: &LibraryError) -> Result<()> {
        self.blank()?;
        self.say(error)?;
        self.blank()
    }

    /// Get the output sink
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Give back the input and output
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

fn parse_months(input: &str, max: u32) -> Result<u32> {
    let out_of_range =
        || LibraryError::InputFormat(format!("Enter a number of months from 1 to {max}."));

    let months: u32 = input.trim().parse().map_err(|_| out_of_range())?;
    if (1..=max).contains(&months) {
        Ok(months)
    } else {
        Err(out_of_range())
    }
}
