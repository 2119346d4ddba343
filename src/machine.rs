//! This module defines the `TuringMachine` struct, which executes a `Definition` on an input.
//! It owns the mutable runtime state of one computation (current state and tape) and borrows
//! the definition read-only, so many machines may share one definition across threads.

use crate::analyzer::analyze;
use crate::definition::Definition;
use crate::tape::Tape;
use crate::types::{Outcome, Snapshot, Step, TuringMachineError};
use tracing::{debug, trace};

/// Executes a single-tape deterministic machine.
///
/// A machine is created once per definition and reset for every input.
pub struct TuringMachine<'a> {
    definition: &'a Definition,
    start: &'a str,
    state: String,
    tape: Tape,
}

impl<'a> TuringMachine<'a> {
    /// Creates a machine for `definition`, positioned on an empty tape.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::ValidationError)` if the definition has no start state
    ///   or no blank symbol, since neither reset nor tape growth is possible without them.
    pub fn new(definition: &'a Definition) -> Result<Self, TuringMachineError> {
        let start = definition.start_state().ok_or_else(|| {
            TuringMachineError::ValidationError("Definition has no start state".to_string())
        })?;
        let blank = definition.blank_symbol().ok_or_else(|| {
            TuringMachineError::ValidationError("Definition has no blank symbol".to_string())
        })?;

        Ok(Self {
            definition,
            start,
            state: start.to_string(),
            tape: Tape::new("", blank),
        })
    }

    /// Puts the machine in the start state with `input` loaded and the head on the first cell.
    pub fn reset(&mut self, input: &str) {
        self.state.clear();
        self.state.push_str(self.start);
        self.tape = Tape::new(input, self.tape.blank());
    }

    /// Executes a single step.
    ///
    /// # Returns
    ///
    /// * `Step::Halt` if no transition matches the current state and the symbol under the
    ///   head. Nothing is changed in that case.
    /// * `Step::Continue` after writing, moving, and entering the next state.
    pub fn step(&mut self) -> Step {
        let definition = self.definition;
        let symbol = self.tape.read();
        let Some(transition) = definition.transition(&self.state, symbol) else {
            return Step::Halt;
        };

        trace!(
            state = %self.state,
            read = %symbol,
            write = %transition.write,
            direction = %transition.direction,
            next = %transition.next_state,
            "step"
        );

        self.tape.write(transition.write);
        self.tape.shift(transition.direction);
        self.state.clear();
        self.state.push_str(&transition.next_state);

        Step::Continue
    }

    /// Runs `input` until the machine halts or `max_steps` steps have been taken.
    ///
    /// A budget of zero performs no steps and reports the computation as undecided.
    pub fn compute(&mut self, input: &str, max_steps: usize) -> Outcome {
        self.reset(input);
        let (steps, halted) = self.advance(max_steps, |_| {});
        self.outcome(steps, halted)
    }

    /// Like [`compute`](Self::compute) but also records a snapshot before the first step
    /// and after every step, including the one that finds no transition.
    pub fn trace(&mut self, input: &str, max_steps: usize) -> Trace {
        self.reset(input);

        let mut snapshots = vec![self.snapshot(0)];
        let (steps, halted) = self.advance(max_steps, |machine| {
            snapshots.push(machine.snapshot(snapshots.len()))
        });

        Trace {
            outcome: self.outcome(steps, halted),
            snapshots,
        }
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn definition(&self) -> &'a Definition {
        self.definition
    }

    /// Steps until halt or budget exhaustion, calling `observe` after every step.
    fn advance(&mut self, max_steps: usize, mut observe: impl FnMut(&Self)) -> (usize, bool) {
        let mut steps = 0;
        let mut halted = false;

        while steps < max_steps && !halted {
            steps += 1;
            halted = self.step().is_halt();
            observe(self);
        }

        (steps, halted)
    }

    fn snapshot(&self, step: usize) -> Snapshot {
        Snapshot {
            step,
            state: self.state.clone(),
            tape: self.tape.to_string(),
            head: self.tape.head(),
        }
    }

    fn outcome(&self, steps: usize, halted: bool) -> Outcome {
        let accepted = halted && self.definition.is_accepting(&self.state);
        debug!(steps, halted, accepted, state = %self.state, "computation finished");

        Outcome {
            tape: self.tape.to_string(),
            head: self.tape.head(),
            state: self.state.clone(),
            steps,
            halted,
            accepted,
            blank: self.tape.blank(),
        }
    }
}

/// The record of a traced computation: the final outcome plus one snapshot per step.
///
/// The snapshots can be walked once by consuming the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub outcome: Outcome,
    snapshots: Vec<Snapshot>,
}

impl Trace {
    /// Number of snapshots, which is the number of steps taken plus one.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl IntoIterator for Trace {
    type Item = Snapshot;
    type IntoIter = std::vec::IntoIter<Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}

/// Validates `definition` once, then computes every input against it.
///
/// Each input runs on a freshly reset machine; results are returned in input order.
pub fn run<S: AsRef<str>>(
    definition: &Definition,
    inputs: &[S],
    max_steps: usize,
) -> Result<Vec<Outcome>, TuringMachineError> {
    analyze(definition)?;
    let mut machine = TuringMachine::new(definition)?;

    Ok(inputs
        .iter()
        .map(|input| machine.compute(input.as_ref(), max_steps))
        .collect())
}

/// Validates `definition` once, then traces every input against it.
pub fn run_traced<S: AsRef<str>>(
    definition: &Definition,
    inputs: &[S],
    max_steps: usize,
) -> Result<Vec<Trace>, TuringMachineError> {
    analyze(definition)?;
    let mut machine = TuringMachine::new(definition)?;

    Ok(inputs
        .iter()
        .map(|input| machine.trace(input.as_ref(), max_steps))
        .collect())
}
