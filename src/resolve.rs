//! Definition resolution.
//!
//! Maps a queried text token (the word under a cursor, or any
//! caller-supplied string) to the source location of the entity defining
//! it. Pure lookup over an index snapshot: no I/O, no re-scan, no fuzzy
//! matching, no kind filtering. A miss is an explicit `None`, never a
//! fault.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::index::EntityIndex;

/// Where a queried name is defined. `line` and `column` are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

/// Resolve `token` against the current index snapshot.
pub fn resolve(index: &EntityIndex, token: &str) -> Option<Definition> {
    index.lookup(token).map(|entity| Definition {
        file: entity.source_file.clone(),
        line: entity.location.line,
        column: entity.location.column,
    })
}

/// `kdx resolve <name>`: build the index and print where the name is
/// defined, as `file:line:column` (1-based) or JSON.
pub fn run_resolve(config: &Config, token: &str, json: bool) -> Result<()> {
    let (index, _) = EntityIndex::build(config)?;

    match resolve(&index, token) {
        Some(definition) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&definition)?);
            } else {
                println!(
                    "{}:{}:{}",
                    definition.file.display(),
                    definition.line + 1,
                    definition.column + 1
                );
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                println!("no definition found for '{}'", token);
            }
        }
    }
    Ok(())
}
