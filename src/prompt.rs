//! Interactive setup: asks for the worksheet configuration on a terminal and
//! keeps asking until the answers make a valid configuration.
//!
//! Generic over `BufRead`/`Write` so tests can script a session.

use std::io::{BufRead, ErrorKind, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, WorksheetError};
use crate::worksheet_engine::{
    batch::read_names,
    models::{Operation, WorksheetConfig},
};

/// Who the worksheets are for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Single { student: Option<String> },
    Batch { names_path: PathBuf, names: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveRun {
    pub config: WorksheetConfig,
    pub target: Target,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print `question` and read one trimmed line. End of input is an error,
    /// so a closed stdin can't spin the reprompt loops forever.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }

    fn complain(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "  {message}")?;
        Ok(())
    }

    fn ask_parsed<T: FromStr>(&mut self, question: &str, what: &str) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.complain(format!("'{answer}' is not {what}, try again."))?,
            }
        }
    }

    pub fn ask_int(&mut self, question: &str) -> Result<i32> {
        self.ask_parsed(question, "a whole number")
    }

    /// Blank answer means "none".
    pub fn ask_optional_int(&mut self, question: &str) -> Result<Option<i32>> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<i32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.complain(format!("'{answer}' is not a whole number, try again."))?,
            }
        }
    }

    /// Blank answer takes `default`.
    pub fn ask_count(&mut self, question: &str, default: usize) -> Result<usize> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(n),
                _ => self.complain(format!("'{answer}' is not a positive number, try again."))?,
            }
        }
    }

    pub fn ask_operation(&mut self) -> Result<Operation> {
        loop {
            let answer = self.ask(
                "Which operation? (addition, subtraction, multiplication, division): ",
            )?;
            match answer.parse::<Operation>() {
                Ok(op) => return Ok(op),
                Err(e) => self.complain(e)?,
            }
        }
    }

    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            let answer = self.ask(question)?.to_ascii_lowercase();
            match answer.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" | "" => return Ok(false),
                _ => self.complain("Please answer y or n.")?,
            }
        }
    }

    /// Ask for a name-list path until one can be read.
    pub fn ask_names_file(&mut self) -> Result<(PathBuf, Vec<String>)> {
        loop {
            let answer = self.ask("Path to the student name list: ")?;
            if answer.is_empty() {
                continue;
            }
            let path = PathBuf::from(answer);
            match read_names(&path) {
                Ok(names) => return Ok((path, names)),
                Err(e @ WorksheetError::FileNotFound { .. }) => self.complain(e)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask for range, operation, fixed factor and count; start over on an
    /// invalid combination.
    pub fn ask_config(&mut self, default_count: usize) -> Result<WorksheetConfig> {
        loop {
            let low = self.ask_int("Enter the lowest number: ")?;
            let high = self.ask_int("Enter the highest number: ")?;
            let operation = self.ask_operation()?;
            let fixed_factor = if operation.accepts_fixed_factor() {
                self.ask_optional_int("Fixed factor (blank for none): ")?
            } else {
                None
            };
            let problem_count =
                self.ask_count(&format!("How many problems? [{default_count}]: "), default_count)?;

            let config = WorksheetConfig { low, high, operation, problem_count, fixed_factor };
            match config.validate() {
                Ok(()) => return Ok(config),
                Err(e) => self.complain(e)?,
            }
        }
    }

    pub fn ask_run(&mut self, default_count: usize) -> Result<InteractiveRun> {
        let config = self.ask_config(default_count)?;
        let target = if self.ask_yes_no("Generate worksheets for a list of students? (y/n): ")? {
            let (names_path, names) = self.ask_names_file()?;
            Target::Batch { names_path, names }
        } else {
            let name = self.ask("Student name (blank for none): ")?;
            Target::Single { student: Some(name).filter(|n| !n.is_empty()) }
        };
        Ok(InteractiveRun { config, target })
    }
}
