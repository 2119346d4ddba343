//! This module provides the `DefinitionLoader` struct, responsible for loading machine
//! definitions from files, directories, and strings in either supported format.

use crate::definition::Definition;
use crate::document::from_json;
use crate::parser::parse;
use crate::types::{TuringMachineError, MAX_DEFINITION_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of the line-oriented definition language.
pub const DSL_EXTENSION: &str = "tm";
/// File extension of the structured definition document.
pub const JSON_EXTENSION: &str = "json";

/// The two formats a definition can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// The line-oriented definition language.
    Dsl,
    /// The structured JSON document.
    Json,
}

impl SourceFormat {
    /// Picks the format from a file extension: `.json` is structured, anything else is DSL.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext == JSON_EXTENSION => SourceFormat::Json,
            _ => SourceFormat::Dsl,
        }
    }
}

/// `DefinitionLoader` is a utility struct for loading machine definitions.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Loads a single definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Definition)` if the file is read and its content forms a valid definition.
    /// * `Err(TuringMachineError::SourceUnavailable)` if the file cannot be read or exceeds
    ///   `MAX_DEFINITION_SIZE`.
    /// * Any parse, format, conflict, or validation error from the content itself.
    pub fn load(path: &Path) -> Result<Definition, TuringMachineError> {
        let unavailable = |e: std::io::Error| {
            TuringMachineError::SourceUnavailable(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))
        };

        let size = fs::metadata(path).map_err(unavailable)?.len();
        if size > MAX_DEFINITION_SIZE as u64 {
            return Err(TuringMachineError::SourceUnavailable(format!(
                "File {} is {} bytes, larger than the {} byte limit",
                path.display(),
                size,
                MAX_DEFINITION_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(unavailable)?;
        debug!(path = %path.display(), bytes = content.len(), "loading definition");

        Self::load_from_str(&content, SourceFormat::from_path(path))
    }

    /// Loads a single definition from string content in the given format.
    pub fn load_from_str(
        content: &str,
        format: SourceFormat,
    ) -> Result<Definition, TuringMachineError> {
        match format {
            SourceFormat::Dsl => parse(content),
            SourceFormat::Json => from_json(content),
        }
    }

    /// Loads every definition file (`.tm` or `.json`) in a directory.
    ///
    /// Directories and files with other extensions are skipped. Each file yields its own
    /// result so one broken definition does not hide the others.
    pub fn load_dir(directory: &Path) -> Vec<Result<(PathBuf, Definition), TuringMachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::SourceUnavailable(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::SourceUnavailable(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let is_definition = path
                    .extension()
                    .is_some_and(|ext| ext == DSL_EXTENSION || ext == JSON_EXTENSION);
                if path.is_dir() || !is_definition {
                    return None;
                }

                Some(Self::load(&path).map(|definition| (path, definition)))
            })
            .collect();

        // Directory order is platform dependent.
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });
        results
    }
}
