//! This module defines `Definition`, the formal description of a single-tape machine:
//! its tape alphabet, blank symbol, states, start and accepting states, and transition table.
//!
//! A definition is assembled once through its builder methods and only read afterwards.
//! Because nothing mutates it during execution, one definition can back any number of
//! concurrently running executors.

use crate::types::{Conflict, Direction, Transition, TransitionKey, TuringMachineError};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    description: String,
    symbols: HashSet<char>,
    blank: Option<char>,
    alphabet: HashSet<char>,
    states: HashSet<String>,
    start: Option<String>,
    accepting: HashSet<String>,
    /// Keyed by state first so a lookup during execution needs no allocation.
    rules: HashMap<String, HashMap<char, Transition>>,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Adds a symbol to the tape alphabet.
    pub fn add_symbol(&mut self, symbol: char) {
        self.symbols.insert(symbol);
    }

    /// Sets the blank symbol and adds it to the tape alphabet.
    ///
    /// The blank symbol may be set only once; any second call is a
    /// `ConstructionConflict`, even when it repeats the same symbol.
    pub fn set_blank_symbol(&mut self, symbol: char) -> Result<(), TuringMachineError> {
        if let Some(existing) = self.blank {
            return Err(Conflict::Blank {
                existing,
                attempted: symbol,
            }
            .into());
        }

        self.add_symbol(symbol);
        self.blank = Some(symbol);
        Ok(())
    }

    /// Adds a symbol to the input alphabet. Input symbols are informational and
    /// must also belong to the tape alphabet for the definition to validate.
    pub fn add_input_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    pub fn add_state(&mut self, state: &str) {
        if !self.states.contains(state) {
            self.states.insert(state.to_string());
        }
    }

    /// Sets the start state and registers it. A second call is a `ConstructionConflict`.
    pub fn set_start_state(&mut self, state: &str) -> Result<(), TuringMachineError> {
        if let Some(existing) = &self.start {
            return Err(Conflict::Start {
                existing: existing.clone(),
                attempted: state.to_string(),
            }
            .into());
        }

        self.add_state(state);
        self.start = Some(state.to_string());
        Ok(())
    }

    /// Registers `state` and marks it as accepting.
    pub fn add_end_state(&mut self, state: &str) {
        self.add_state(state);
        self.accepting.insert(state.to_string());
    }

    /// Adds a transition, registering both states and both symbols it mentions.
    ///
    /// The table is a partial function: declaring a key that already has an entry
    /// replaces the earlier entry (last write wins) and returns it.
    pub fn add_transition(
        &mut self,
        state: &str,
        read: char,
        write: char,
        direction: Direction,
        next_state: &str,
    ) -> Option<Transition> {
        self.add_state(state);
        self.add_state(next_state);
        self.add_symbol(read);
        self.add_symbol(write);

        self.rules.entry(state.to_string()).or_default().insert(
            read,
            Transition {
                write,
                direction,
                next_state: next_state.to_string(),
            },
        )
    }

    /// Returns the tape alphabet, or `EmptyDefinition` if no symbol has been added.
    pub fn symbols(&self) -> Result<&HashSet<char>, TuringMachineError> {
        if self.symbols.is_empty() {
            return Err(TuringMachineError::EmptyDefinition("symbols"));
        }
        Ok(&self.symbols)
    }

    /// Returns the set of known states, or `EmptyDefinition` if no state has been added.
    pub fn states(&self) -> Result<&HashSet<String>, TuringMachineError> {
        if self.states.is_empty() {
            return Err(TuringMachineError::EmptyDefinition("states"));
        }
        Ok(&self.states)
    }

    pub fn input_alphabet(&self) -> &HashSet<char> {
        &self.alphabet
    }

    pub fn blank_symbol(&self) -> Option<char> {
        self.blank
    }

    pub fn start_state(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn accepting_states(&self) -> &HashSet<String> {
        &self.accepting
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting.contains(state)
    }

    /// Looks up the transition for `state` reading `symbol`.
    pub fn transition(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.rules.get(state)?.get(&symbol)
    }

    /// Transitions leaving `state`, in no particular order.
    pub fn transitions_from(&self, state: &str) -> impl Iterator<Item = (char, &Transition)> {
        self.rules
            .get(state)
            .into_iter()
            .flat_map(|row| row.iter().map(|(symbol, t)| (*symbol, t)))
    }

    /// All transition-table entries sorted by key.
    pub fn transitions(&self) -> Vec<(TransitionKey, &Transition)> {
        let mut entries: Vec<_> = self
            .rules
            .iter()
            .flat_map(|(state, row)| {
                row.iter().map(move |(symbol, t)| {
                    (
                        TransitionKey {
                            state: state.clone(),
                            symbol: *symbol,
                        },
                        t,
                    )
                })
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn transition_count(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    /// Returns `items` as a sorted vector, for output that must not depend on hash order.
    pub(crate) fn sorted<T: Ord + Clone>(items: &HashSet<T>) -> Vec<T> {
        let mut items: Vec<T> = items.iter().cloned().collect();
        items.sort();
        items
    }
}
