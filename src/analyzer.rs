//! This module provides functions for analyzing machine definitions before execution.
//! Structural problems (no blank symbol, no start state, an input alphabet that is not part of
//! the tape alphabet) are errors; reachability findings are only reported.

use crate::definition::Definition;
use crate::types::TuringMachineError;
use std::collections::HashSet;
use tracing::warn;

/// Represents the problems that can be found while analyzing a definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// No blank symbol was declared.
    MissingBlankSymbol,
    /// No start state was declared.
    MissingStartState,
    /// The input alphabet contains symbols the tape alphabet lacks.
    ForeignInputSymbols(Vec<char>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::MissingBlankSymbol => {
                TuringMachineError::ValidationError("Missing blank symbol".to_string())
            }
            AnalysisError::MissingStartState => {
                TuringMachineError::ValidationError("Missing start state".to_string())
            }
            AnalysisError::ForeignInputSymbols(symbols) => {
                TuringMachineError::ValidationError(format!(
                    "Input alphabet contains symbols missing from the tape alphabet: {:?}",
                    symbols
                ))
            }
        }
    }
}

/// Analyzes a `Definition` for structural errors.
///
/// Runs every check and returns the first failure. States that cannot be reached from the
/// start state are logged as a warning but do not fail the analysis.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` if any check fails.
pub fn analyze(definition: &Definition) -> Result<(), TuringMachineError> {
    let errors = [check_blank_symbol, check_start_state, check_input_alphabet]
        .iter()
        .filter_map(|f| f(definition).err())
        .collect::<Vec<_>>();

    if let Some(first_error) = errors.into_iter().next() {
        return Err(first_error.into());
    }

    let unreachable = unreachable_states(definition);
    if !unreachable.is_empty() {
        warn!(states = ?unreachable, "unreachable states detected");
    }

    Ok(())
}

fn check_blank_symbol(definition: &Definition) -> Result<(), AnalysisError> {
    definition
        .blank_symbol()
        .map(|_| ())
        .ok_or(AnalysisError::MissingBlankSymbol)
}

fn check_start_state(definition: &Definition) -> Result<(), AnalysisError> {
    definition
        .start_state()
        .map(|_| ())
        .ok_or(AnalysisError::MissingStartState)
}

/// Checks that every input symbol is also a tape symbol.
fn check_input_alphabet(definition: &Definition) -> Result<(), AnalysisError> {
    let symbols = definition.symbols().ok();

    let mut foreign: Vec<char> = definition
        .input_alphabet()
        .iter()
        .filter(|&symbol| !symbols.is_some_and(|symbols| symbols.contains(symbol)))
        .copied()
        .collect();

    if !foreign.is_empty() {
        foreign.sort(); // Sort for deterministic output
        return Err(AnalysisError::ForeignInputSymbols(foreign));
    }

    Ok(())
}

/// Returns the states, sorted, that no sequence of transitions leads to from the start state.
///
/// Without a start state every state is unreachable.
pub fn unreachable_states(definition: &Definition) -> Vec<String> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: Vec<&str> = definition.start_state().into_iter().collect();

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for (_, transition) in definition.transitions_from(state) {
            if !visited.contains(transition.next_state.as_str()) {
                queue.push(&transition.next_state);
            }
        }
    }

    let mut unreachable: Vec<String> = definition
        .states()
        .map(|states| {
            states
                .iter()
                .filter(|state| !visited.contains(state.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    unreachable.sort();
    unreachable
}
