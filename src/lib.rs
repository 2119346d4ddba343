//! This crate provides the core logic for a deterministic single-tape Turing machine simulator.
//! It includes the definition model, a growable tape, an executor with compute and trace modes,
//! a parser for the line-oriented definition language, a structured JSON format, Graphviz
//! export, and a small catalog of built-in machines.

pub mod analyzer;
pub mod definition;
pub mod document;
pub mod graph;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `Definition` struct from the definition module.
pub use definition::Definition;
/// Re-exports the structured format functions from the document module.
pub use document::{from_json, to_json};
/// Re-exports the Graphviz export function from the graph module.
pub use graph::to_dot;
/// Re-exports the `DefinitionLoader` struct and `SourceFormat` enum from the loader module.
pub use loader::{DefinitionLoader, SourceFormat};
/// Re-exports the executor and batch runners from the machine module.
pub use machine::{run, run_traced, Trace, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `Machine`, `MachineCatalog`, and `MACHINES` from the programs module.
pub use programs::{Machine, MachineCatalog, MACHINES};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Conflict, Direction, Outcome, Snapshot, Step, Transition, TransitionKey, TuringMachineError,
    Verdict, DEFAULT_MAX_STEPS, MAX_DEFINITION_SIZE,
};
