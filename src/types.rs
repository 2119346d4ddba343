//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The step budget used when the caller does not supply one.
pub const DEFAULT_MAX_STEPS: usize = 200;
/// The maximum allowed size for a definition source in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB
/// Everything from this character to the end of a DSL line is ignored.
pub const COMMENT_MARKER: char = '#';

/// Represents the possible directions the head can move.
///
/// In the structured format a direction is written as `"L"` or `"R"`,
/// in the DSL as `<` or `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell toward the lower end of the tape.
    #[serde(rename = "L")]
    Left,
    /// Move the head one cell toward the higher end of the tape.
    #[serde(rename = "R")]
    Right,
}

impl Direction {
    /// Single-letter form used in graph labels and the structured format.
    pub fn letter(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The lookup half of a transition-table entry: the current state and the symbol under the head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionKey {
    pub state: String,
    pub symbol: char,
}

/// The action half of a transition-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Symbol written over the one under the head.
    pub write: char,
    /// Direction the head moves after writing.
    pub direction: Direction,
    /// The state the machine enters.
    pub next_state: String,
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A transition matched and was applied.
    Continue,
    /// No transition matches the current state and symbol.
    Halt,
}

impl Step {
    pub fn is_halt(self) -> bool {
        self == Step::Halt
    }
}

/// How a computation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Halted in an accepting state.
    Accepted,
    /// Halted in a state that is not accepting.
    Rejected,
    /// The step budget ran out before the machine halted.
    Undecided,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::Rejected => write!(f, "rejected"),
            Verdict::Undecided => write!(f, "undecided"),
        }
    }
}

/// The result of running a machine on one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The full materialized tape after the last step.
    pub tape: String,
    /// Head position within `tape`.
    pub head: usize,
    /// The state the machine was in when it stopped.
    pub state: String,
    /// Number of `step` calls performed, including the one that found no transition.
    pub steps: usize,
    /// Whether a step actually found no matching transition.
    pub halted: bool,
    /// `halted` and the final state is accepting.
    pub accepted: bool,
    pub blank: char,
}

impl Outcome {
    pub fn verdict(&self) -> Verdict {
        match (self.halted, self.accepted) {
            (true, true) => Verdict::Accepted,
            (true, false) => Verdict::Rejected,
            (false, _) => Verdict::Undecided,
        }
    }

    /// Returns the tape with leading and trailing blanks removed.
    pub fn trimmed_tape(&self) -> &str {
        self.tape.trim_matches(self.blank)
    }
}

/// One observation of a traced computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of steps taken so far; the first snapshot is step 0.
    pub step: usize,
    pub state: String,
    pub tape: String,
    pub head: usize,
}

/// Describes which one-shot setting of a definition was assigned twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("blank symbol {attempted:?} given but blank symbol is already {existing:?}")]
    Blank { existing: char, attempted: char },
    #[error("start state {attempted:?} given but start state is already {existing:?}")]
    Start { existing: String, attempted: String },
}

/// Represents various errors that can occur while building, loading, or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// The blank symbol or the start state was set a second time.
    #[error("Construction conflict: {0}")]
    ConstructionConflict(#[from] Conflict),
    /// A collection of the definition was queried before anything was added to it.
    #[error("Definition has no {0}")]
    EmptyDefinition(&'static str),
    /// A DSL line could not be understood.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },
    /// The definition source could not be read.
    #[error("Definition source unavailable: {0}")]
    SourceUnavailable(String),
    /// A structured definition document is malformed.
    #[error("Malformed definition document: {0}")]
    FormatError(String),
    /// The definition is structurally incomplete or inconsistent.
    #[error("Definition validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::FormatError(error.to_string())
    }
}
