//! This module provides the parser for the machine definition language, utilizing the `pest` crate.
//!
//! A definition is read line by line. After comments and surrounding whitespace are stripped,
//! every non-empty line must be one of, tried in this order:
//!
//! * a blank-symbol line: `' '`
//! * a state line: `name`, optionally followed by `.` (accepting) and/or `*` (start)
//! * a transition line: `'read' 'write' > target`, with `<` moving left and `>` moving right
//!
//! A transition line belongs to the closest state line above it.

use crate::{
    analyzer::analyze,
    definition::Definition,
    types::{Direction, TuringMachineError, COMMENT_MARKER},
};
use pest::{iterators::Pairs, Parser as PestParser};
use pest_derive::Parser as PestParser;
use tracing::debug;

/// Derives a `PestParser` for the definition grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DefinitionParser;

/// Parses the given source into a validated `Definition`.
///
/// Parsing stops at the first offending line.
///
/// # Returns
///
/// * `Ok(Definition)` if every line is recognized and the result validates.
/// * `Err(TuringMachineError::ParseError)` with the 1-based line number of an unrecognized
///   line, or of a transition line that precedes every state line.
/// * `Err(TuringMachineError::ConstructionConflict)` on a second blank-symbol line or a
///   second start marker.
/// * `Err(TuringMachineError::ValidationError)` if the definition is incomplete.
pub fn parse(input: &str) -> Result<Definition, TuringMachineError> {
    let mut definition = Definition::new();
    let mut scope: Option<String> = None;

    for (index, raw) in input.lines().enumerate() {
        let number = index + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let parse_error = |message: String| TuringMachineError::ParseError {
            line: number,
            message,
        };

        match parse_line(line).map_err(parse_error)? {
            Line::Blank(symbol) => definition.set_blank_symbol(symbol)?,
            Line::State {
                name,
                accepting,
                start,
            } => {
                definition.add_state(&name);
                if accepting {
                    definition.add_end_state(&name);
                }
                if start {
                    definition.set_start_state(&name)?;
                }
                scope = Some(name);
            }
            Line::Transition {
                read,
                write,
                direction,
                target,
            } => {
                let state = scope.as_deref().ok_or_else(|| {
                    parse_error("Transition appears before any state".to_string())
                })?;
                definition.add_transition(state, read, write, direction, &target);
            }
        }
    }

    analyze(&definition)?;

    debug!(
        transitions = definition.transition_count(),
        accepting = definition.accepting_states().len(),
        "parsed definition"
    );

    Ok(definition)
}

/// One recognized line of a definition.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Blank(char),
    State {
        name: String,
        accepting: bool,
        start: bool,
    },
    Transition {
        read: char,
        write: char,
        direction: Direction,
        target: String,
    },
}

/// Removes everything from the comment marker to the end of the line.
fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT_MARKER)
        .map_or(line, |(content, _)| content)
}

/// Matches a stripped, non-empty line against the three line forms in priority order.
fn parse_line(line: &str) -> Result<Line, String> {
    if let Ok(pairs) = DefinitionParser::parse(Rule::blank_line, line) {
        return parse_blank_line(pairs);
    }

    if let Ok(pairs) = DefinitionParser::parse(Rule::state_line, line) {
        return parse_state_line(pairs);
    }

    if let Ok(pairs) = DefinitionParser::parse(Rule::transition_line, line) {
        return parse_transition_line(pairs);
    }

    Err(format!(
        "Expected a blank symbol, state, or transition, found {line:?}"
    ))
}

fn parse_blank_line(pairs: Pairs<Rule>) -> Result<Line, String> {
    let symbol = pairs
        .flatten()
        .find(|p| p.as_rule() == Rule::symbol)
        .and_then(|p| parse_symbol(p.as_str()))
        .ok_or("Missing blank symbol")?;

    Ok(Line::Blank(symbol))
}

fn parse_state_line(pairs: Pairs<Rule>) -> Result<Line, String> {
    let mut name = None;
    let mut accepting = false;
    let mut start = false;

    for pair in pairs.flatten() {
        let flag = match pair.as_rule() {
            Rule::identifier => {
                name = Some(pair.as_str().to_string());
                continue;
            }
            Rule::accepting => &mut accepting,
            Rule::start => &mut start,
            _ => continue,
        };

        if *flag {
            return Err(format!("Duplicate {:?} marker", pair.as_str()));
        }
        *flag = true;
    }

    Ok(Line::State {
        name: name.ok_or("Missing state name")?,
        accepting,
        start,
    })
}

fn parse_transition_line(pairs: Pairs<Rule>) -> Result<Line, String> {
    let mut symbols = Vec::with_capacity(2);
    let mut direction = None;
    let mut target = None;

    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::symbol => symbols.extend(parse_symbol(pair.as_str())),
            Rule::left => direction = Some(Direction::Left),
            Rule::right => direction = Some(Direction::Right),
            Rule::identifier => target = Some(pair.as_str().to_string()),
            _ => {}
        }
    }

    match (symbols.as_slice(), direction, target) {
        (&[read, write], Some(direction), Some(target)) => Ok(Line::Transition {
            read,
            write,
            direction,
            target,
        }),
        _ => Err("Incomplete transition".to_string()),
    }
}

/// Extracts the character from a quoted symbol such as `'a'`.
fn parse_symbol(quoted: &str) -> Option<char> {
    quoted.chars().nth(1)
}
