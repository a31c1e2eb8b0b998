//! Line-oriented terminal I/O for the menus.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{anyhow, Result};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Prompting console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        write!(self.output, "{}", CLEAR_SCREEN)?;
        Ok(())
    }

    /// Prompt for a line and return it trimmed of the line ending.
    ///
    /// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompt showing the current value; an empty answer keeps it.
    pub fn ask_or(&mut self, label: &str, current: &str) -> Result<String> {
        let answer = self.ask(&format!("{} [{}]", label, current))?;
        if answer.trim().is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Prompt for a number.
    pub fn ask_number<T: FromStr>(&mut self, label: &str) -> Result<T> {
        let answer = self.ask(label)?;
        parse_number(label, &answer)
    }

    /// Prompt for a number showing the current value; empty keeps it.
    pub fn ask_number_or<T: FromStr + Display>(&mut self, label: &str, current: T) -> Result<T> {
        let answer = self.ask(&format!("{} [{}]", label, current))?;
        if answer.trim().is_empty() {
            Ok(current)
        } else {
            parse_number(label, &answer)
        }
    }

    /// Yes/no question; anything but `y`/`yes` is a no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (y/n)", question))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    pub fn pause(&mut self) -> Result<()> {
        self.say("")?;
        self.ask("Press ENTER to continue...")?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

fn parse_number<T: FromStr>(label: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("{}: {:?} is not a valid number", label, raw.trim()))
}

/// True when `err` means the input stream ended.
pub fn is_input_closed(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}
