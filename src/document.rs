//! This module provides the structured (JSON) definition format.
//!
//! ```json
//! {
//!   "description": "Binary increment",
//!   "states": "ABCD",
//!   "symbols": "01 ",
//!   "blank": " ",
//!   "alphabet": "01",
//!   "start-state": "A",
//!   "final-states": "D",
//!   "transitions": [
//!     { "current-state": "A", "current-symbol": "0", "next-symbol": "0", "next-state": "A", "movement": "R" }
//!   ]
//! }
//! ```
//!
//! `states` and `final-states` concatenate single-character state ids. When an id is longer
//! than one character the list is written comma separated instead (a lone id as `"done,"`),
//! and a field containing a comma is read that way. A later transition with the same current state and symbol replaces
//! an earlier one.

use crate::analyzer::analyze;
use crate::definition::Definition;
use crate::types::{Direction, TuringMachineError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

const ID_SEPARATOR: &str = ",";

/// The persisted form of a `Definition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefinitionDocument {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub states: String,
    #[serde(default)]
    pub symbols: String,
    pub blank: char,
    #[serde(default)]
    pub alphabet: String,
    #[serde(default)]
    pub start_state: String,
    #[serde(default)]
    pub final_states: String,
    #[serde(default)]
    pub transitions: Vec<TransitionRecord>,
}

/// One entry of the `transitions` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransitionRecord {
    pub current_state: String,
    pub current_symbol: char,
    pub next_symbol: char,
    pub next_state: String,
    pub movement: Direction,
}

/// Reads a structured document and returns the validated definition it describes.
///
/// # Returns
///
/// * `Err(TuringMachineError::FormatError)` if the JSON is malformed, a symbol field holds
///   more or fewer than one character, or a movement is neither `L` nor `R`.
/// * `Err(TuringMachineError::ValidationError)` if the described definition is incomplete.
pub fn from_json(content: &str) -> Result<Definition, TuringMachineError> {
    let document: DefinitionDocument = serde_json::from_str(content)?;
    let definition = Definition::try_from(document)?;
    analyze(&definition)?;
    Ok(definition)
}

/// Writes `definition` as a pretty-printed structured document.
pub fn to_json(definition: &Definition) -> Result<String, TuringMachineError> {
    let document = DefinitionDocument::try_from(definition)?;
    Ok(serde_json::to_string_pretty(&document)?)
}

impl TryFrom<DefinitionDocument> for Definition {
    type Error = TuringMachineError;

    fn try_from(document: DefinitionDocument) -> Result<Self, Self::Error> {
        let mut definition = Definition::new();
        definition.set_description(document.description);

        document
            .symbols
            .chars()
            .for_each(|symbol| definition.add_symbol(symbol));
        definition.set_blank_symbol(document.blank)?;
        document
            .alphabet
            .chars()
            .for_each(|symbol| definition.add_input_symbol(symbol));

        for state in split_ids(&document.states) {
            definition.add_state(&state);
        }
        if !document.start_state.is_empty() {
            definition.set_start_state(&document.start_state)?;
        }
        for state in split_ids(&document.final_states) {
            definition.add_end_state(&state);
        }

        for record in document.transitions {
            let replaced = definition.add_transition(
                &record.current_state,
                record.current_symbol,
                record.next_symbol,
                record.movement,
                &record.next_state,
            );
            if replaced.is_some() {
                debug!(
                    state = %record.current_state,
                    symbol = ?record.current_symbol,
                    "later transition replaces an earlier one"
                );
            }
        }

        Ok(definition)
    }
}

impl TryFrom<&Definition> for DefinitionDocument {
    type Error = TuringMachineError;

    fn try_from(definition: &Definition) -> Result<Self, Self::Error> {
        let blank = definition.blank_symbol().ok_or_else(|| {
            TuringMachineError::ValidationError("Missing blank symbol".to_string())
        })?;

        let states = definition.states().cloned().unwrap_or_default();
        let symbols = definition.symbols().cloned().unwrap_or_default();

        let transitions = definition
            .transitions()
            .into_iter()
            .map(|(key, transition)| TransitionRecord {
                current_state: key.state,
                current_symbol: key.symbol,
                next_symbol: transition.write,
                next_state: transition.next_state.clone(),
                movement: transition.direction,
            })
            .collect();

        Ok(Self {
            description: definition.description().to_string(),
            states: join_ids(&states),
            symbols: Definition::sorted(&symbols).into_iter().collect(),
            blank,
            alphabet: Definition::sorted(definition.input_alphabet())
                .into_iter()
                .collect(),
            start_state: definition.start_state().unwrap_or_default().to_string(),
            final_states: join_ids(definition.accepting_states()),
            transitions,
        })
    }
}

/// Splits a state-id field: comma separated if it holds a comma, else one id per character.
fn split_ids(field: &str) -> Vec<String> {
    if field.contains(ID_SEPARATOR) {
        field
            .split(ID_SEPARATOR)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        field.chars().map(String::from).collect()
    }
}

/// Joins state ids in sorted order, using the comma form only when an id is longer than one
/// character. A lone id in comma form keeps a trailing separator so it reads back whole.
fn join_ids(ids: &HashSet<String>) -> String {
    let ids = Definition::sorted(ids);
    if ids.iter().all(|id| id.chars().count() == 1) {
        return ids.concat();
    }

    let mut joined = ids.join(ID_SEPARATOR);
    if ids.len() == 1 {
        joined.push_str(ID_SEPARATOR);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransitionKey;
    use std::collections::HashMap;

    const INCREMENT: &str = r#"{
  "description": "Adds one to a binary number",
  "states": "ABC",
  "symbols": "01 ",
  "blank": " ",
  "alphabet": "01",
  "start-state": "A",
  "final-states": "C",
  "transitions": [
    { "current-state": "A", "current-symbol": "0", "next-symbol": "0", "next-state": "A", "movement": "R" },
    { "current-state": "A", "current-symbol": "1", "next-symbol": "1", "next-state": "A", "movement": "R" },
    { "current-state": "A", "current-symbol": " ", "next-symbol": " ", "next-state": "B", "movement": "L" },
    { "current-state": "B", "current-symbol": "0", "next-symbol": "1", "next-state": "C", "movement": "L" },
    { "current-state": "B", "current-symbol": "1", "next-symbol": "0", "next-state": "B", "movement": "L" },
    { "current-state": "B", "current-symbol": " ", "next-symbol": "1", "next-state": "C", "movement": "L" }
  ]
}"#;

    fn table(definition: &Definition) -> HashMap<TransitionKey, (char, Direction, String)> {
        definition
            .transitions()
            .into_iter()
            .map(|(key, t)| (key, (t.write, t.direction, t.next_state.clone())))
            .collect()
    }

    #[test]
    fn test_from_json() {
        let definition = from_json(INCREMENT).unwrap();

        assert_eq!(definition.description(), "Adds one to a binary number");
        assert_eq!(definition.blank_symbol(), Some(' '));
        assert_eq!(definition.start_state(), Some("A"));
        assert!(definition.is_accepting("C"));
        assert_eq!(definition.accepting_states().len(), 1);
        assert_eq!(definition.states().unwrap().len(), 3);
        assert_eq!(definition.symbols().unwrap().len(), 3);
        assert_eq!(definition.input_alphabet().len(), 2);
        assert_eq!(definition.transition_count(), 6);

        let transition = definition.transition("B", ' ').unwrap();
        assert_eq!(transition.write, '1');
        assert_eq!(transition.direction, Direction::Left);
        assert_eq!(transition.next_state, "C");
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let content = r#"{
  "blank": "_",
  "start-state": "A",
  "transitions": [
    { "current-state": "A", "current-symbol": "a", "next-symbol": "b", "next-state": "A", "movement": "R" },
    { "current-state": "A", "current-symbol": "a", "next-symbol": "c", "next-state": "B", "movement": "L" }
  ]
}"#;
        let definition = from_json(content).unwrap();
        assert_eq!(definition.transition_count(), 1);

        let transition = definition.transition("A", 'a').unwrap();
        assert_eq!(transition.write, 'c');
        assert_eq!(transition.direction, Direction::Left);
        assert_eq!(transition.next_state, "B");
    }

    #[test]
    fn test_round_trip_preserves_table() {
        let original = from_json(INCREMENT).unwrap();
        let json = to_json(&original).unwrap();
        let restored = from_json(&json).unwrap();

        assert_eq!(table(&restored), table(&original));
        assert_eq!(restored, original);
    }

    #[test]
    fn test_long_state_ids_use_commas() {
        let mut definition = Definition::new();
        definition.set_blank_symbol('_').unwrap();
        definition.set_start_state("scan").unwrap();
        definition.add_end_state("done");
        definition.add_end_state("ok");
        definition.add_transition("scan", '1', '1', Direction::Right, "done");

        let document = DefinitionDocument::try_from(&definition).unwrap();
        assert_eq!(document.states, "done,ok,scan");
        assert_eq!(document.final_states, "done,ok");

        let restored = from_json(&to_json(&definition).unwrap()).unwrap();
        assert_eq!(restored, definition);
    }

    #[test]
    fn test_lone_long_state_id_survives_round_trip() {
        let mut definition = Definition::new();
        definition.set_blank_symbol('_').unwrap();
        definition.set_start_state("scan").unwrap();
        definition.add_end_state("done");
        definition.add_transition("scan", '1', '1', Direction::Right, "scan");
        definition.add_transition("scan", '_', '_', Direction::Left, "done");

        let document = DefinitionDocument::try_from(&definition).unwrap();
        assert_eq!(document.final_states, "done,");
        assert_eq!(document.states, "done,scan");

        let restored = from_json(&to_json(&definition).unwrap()).unwrap();
        assert_eq!(restored, definition);
        assert!(restored.is_accepting("done"));
        assert_eq!(restored.accepting_states().len(), 1);
        assert_eq!(restored.states().unwrap().len(), 2);
    }

    #[test]
    fn test_single_char_ids_are_concatenated() {
        let document = DefinitionDocument::try_from(&from_json(INCREMENT).unwrap()).unwrap();
        assert_eq!(document.states, "ABC");
        assert_eq!(document.symbols, " 01");
        assert_eq!(document.final_states, "C");
        assert_eq!(document.transitions.len(), 6);
        assert_eq!(document.transitions[0].current_state, "A");
        assert_eq!(document.transitions[0].current_symbol, ' ');
    }

    #[test]
    fn test_malformed_documents() {
        let cases = [
            "not json",
            r#"{ "start-state": "A" }"#,
            r#"{ "blank": "ab", "start-state": "A" }"#,
            r#"{ "blank": " ", "start-state": "A", "transitions": [
                { "current-state": "A", "current-symbol": "0", "next-symbol": "0", "next-state": "A", "movement": "S" }
            ] }"#,
        ];

        for content in cases {
            assert!(
                matches!(from_json(content), Err(TuringMachineError::FormatError(_))),
                "expected a format error for {content}"
            );
        }
    }

    #[test]
    fn test_missing_start_state_fails_validation() {
        let result = from_json(r#"{ "blank": " " }"#);
        assert_eq!(
            result,
            Err(TuringMachineError::ValidationError(
                "Missing start state".to_string()
            ))
        );
    }

    #[test]
    fn test_serialization_requires_blank() {
        let mut definition = Definition::new();
        definition.set_start_state("A").unwrap();
        assert!(matches!(
            to_json(&definition),
            Err(TuringMachineError::ValidationError(_))
        ));
    }

    #[test]
    fn test_split_ids() {
        assert_eq!(split_ids("AB"), vec!["A", "B"]);
        assert_eq!(split_ids("q0, q1,"), vec!["q0", "q1"]);
        assert_eq!(split_ids("done,"), vec!["done"]);
        assert!(split_ids("").is_empty());
    }
}
