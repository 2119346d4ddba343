use crate::definition::Definition;
use crate::loader::{DefinitionLoader, SourceFormat};
use crate::types::TuringMachineError;
use tracing::warn;

// Embedded machines: name, source text, format
const MACHINE_SOURCES: [(&str, &str, SourceFormat); 4] = [
    (
        "Binary duplication",
        include_str!("../machines/binary-duplication.tm"),
        SourceFormat::Dsl,
    ),
    (
        "Binary increment",
        include_str!("../machines/binary-increment.json"),
        SourceFormat::Json,
    ),
    (
        "Even number of ones",
        include_str!("../machines/even-ones.tm"),
        SourceFormat::Dsl,
    ),
    (
        "Left marker",
        include_str!("../machines/left-marker.tm"),
        SourceFormat::Dsl,
    ),
];

lazy_static::lazy_static! {
    /// The built-in machines, parsed on first access.
    pub static ref MACHINES: Vec<Machine> = load_machines();
}

/// A named built-in machine together with the source it was parsed from.
#[derive(Debug, Clone)]
pub struct Machine {
    pub name: &'static str,
    pub source: &'static str,
    pub format: SourceFormat,
    pub definition: Definition,
}

fn load_machines() -> Vec<Machine> {
    MACHINE_SOURCES
        .iter()
        .filter_map(|&(name, source, format)| {
            match DefinitionLoader::load_from_str(source, format) {
                Ok(definition) => Some(Machine {
                    name,
                    source,
                    format,
                    definition,
                }),
                Err(e) => {
                    warn!(machine = name, error = %e, "failed to parse built-in machine");
                    None
                }
            }
        })
        .collect()
}

pub struct MachineCatalog;

impl MachineCatalog {
    /// Get the number of available machines
    pub fn count() -> usize {
        MACHINES.len()
    }

    /// Get a machine by its index
    pub fn get_by_index(index: usize) -> Result<&'static Machine, TuringMachineError> {
        MACHINES.get(index).ok_or_else(|| {
            TuringMachineError::SourceUnavailable(format!("Machine index {} out of range", index))
        })
    }

    /// Get a machine by its name, ignoring case
    pub fn get_by_name(name: &str) -> Result<&'static Machine, TuringMachineError> {
        MACHINES
            .iter()
            .find(|machine| machine.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                TuringMachineError::SourceUnavailable(format!("Machine '{}' not found", name))
            })
    }

    /// List all machine names
    pub fn names() -> Vec<&'static str> {
        MACHINES.iter().map(|machine| machine.name).collect()
    }

    /// Search for machines by name
    pub fn search(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        MACHINES
            .iter()
            .enumerate()
            .filter(|(_, machine)| machine.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}
