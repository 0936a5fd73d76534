use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorksheetError};

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Lowercase name, as typed by the user and used in file names.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Addition       => "addition",
            Operation::Subtraction    => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division       => "division",
        }
    }

    /// Symbol printed in front of the second operand.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition       => "+",
            Operation::Subtraction    => "-",
            Operation::Multiplication => "×",
            Operation::Division       => "÷",
        }
    }

    /// Only times-table style drills can pin one operand.
    pub fn accepts_fixed_factor(self) -> bool {
        matches!(self, Operation::Multiplication | Operation::Division)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Addition       => "Addition",
            Operation::Subtraction    => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::Division       => "Division",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Operation {
    type Err = WorksheetError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| {
                WorksheetError::invalid(format!(
                    "unknown operation '{}' (expected addition, subtraction, multiplication or division)",
                    s.trim()
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to put on a worksheet. Built once, never mutated while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetConfig {
    pub low: i32,
    pub high: i32,
    pub operation: Operation,
    pub problem_count: usize,
    /// Pins one operand for multiplication (first) or division (divisor).
    pub fixed_factor: Option<i32>,
}

impl WorksheetConfig {
    /// Parse the operation name and validate the whole configuration.
    pub fn new(
        low: i32,
        high: i32,
        operation: &str,
        problem_count: usize,
        fixed_factor: Option<i32>,
    ) -> Result<Self> {
        let config = WorksheetConfig {
            low,
            high,
            operation: operation.parse()?,
            problem_count,
            fixed_factor,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.low > self.high {
            return Err(WorksheetError::invalid(format!(
                "lowest number {} is greater than highest number {}",
                self.low, self.high
            )));
        }
        if self.problem_count == 0 {
            return Err(WorksheetError::invalid("problem count must be at least 1"));
        }
        match self.operation {
            Operation::Subtraction if self.low < 0 => Err(WorksheetError::invalid(
                "subtraction needs a non-negative lowest number",
            )),
            Operation::Division => match self.fixed_factor {
                Some(0) => Err(WorksheetError::invalid("cannot divide by a fixed factor of 0")),
                None if self.high < 1 => Err(WorksheetError::invalid(
                    "division without a fixed factor needs a highest number of at least 1",
                )),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// The fixed factor, if this operation actually uses one.
    pub fn effective_fixed_factor(&self) -> Option<i32> {
        self.fixed_factor.filter(|_| self.operation.accepts_fixed_factor())
    }
}

// ---------------------------------------------------------------------------
// Problems
// ---------------------------------------------------------------------------

/// One printed problem: `a <symbol> b`.
///
/// Products are computed in `i64`, so any pair of `i32` bounds fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub a: i64,
    pub b: i64,
}

impl Problem {
    pub fn new(a: i64, b: i64) -> Self {
        Problem { a, b }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetRequest {
    pub config: WorksheetConfig,
    /// `Some(seed)` reproduces the same problem set; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl WorksheetRequest {
    /// Entropy-seeded request.
    pub fn new(config: WorksheetConfig) -> Self {
        WorksheetRequest { config, rng_seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}
