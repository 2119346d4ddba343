//! Renders a definition as a Graphviz (DOT) digraph.
//!
//! The output depends only on the definition: an entry point with an edge into the start
//! state, a double circle per accepting state, a circle per other state, and one labeled
//! edge per transition-table entry. States and edges are emitted in sorted order so the same
//! definition always renders to the same text.

use crate::definition::Definition;

/// Node id of the synthetic entry point. DSL state ids never start with a digit.
const ENTRY_NODE: &str = "0";

/// Returns the DOT description of `definition`.
///
/// The entry node and its edge are omitted when no start state is set.
pub fn to_dot(definition: &Definition) -> String {
    let states = definition
        .states()
        .map(Definition::sorted)
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str("digraph machine {\n");
    out.push_str("\trankdir=LR;\n");
    out.push_str("\tsize=\"8,5\";\n");
    out.push('\n');

    if definition.start_state().is_some() {
        out.push_str(&format!("\tnode [shape = point]; {ENTRY_NODE};\n"));
    }

    for state in states.iter().filter(|s| definition.is_accepting(s)) {
        out.push_str(&format!("\tnode [shape = doublecircle]; {};\n", quote(state)));
    }

    out.push_str("\tnode [shape = circle];");
    for state in states.iter().filter(|s| !definition.is_accepting(s)) {
        out.push_str(&format!(" {};", quote(state)));
    }
    out.push('\n');

    if let Some(start) = definition.start_state() {
        out.push_str(&format!("\t{ENTRY_NODE} -> {};\n", quote(start)));
    }

    for (key, transition) in definition.transitions() {
        let label = format!(
            "'{}', '{}', '{}'",
            key.symbol, transition.write, transition.direction
        );
        out.push_str(&format!(
            "\t{} -> {} [ label = {} ];\n",
            quote(&key.state),
            quote(&transition.next_state),
            quote(&label)
        ));
    }

    out.push_str("}\n");
    out
}

/// Quotes `text` as a DOT string.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
