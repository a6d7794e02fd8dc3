//! Core data models used throughout kindex.
//!
//! These types represent the entities extracted from YAML manifests and the
//! telemetry produced by a full index rebuild.

use serde::Serialize;
use std::path::PathBuf;

/// Source span of an entity's `name: <name>` declaration.
///
/// `line` and `column` are zero-based; `column` is the byte offset of the
/// `name:` substring within the line, and `length` is the byte length of the
/// entity name itself. CLI output renders these 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

/// A named, kinded record indexed from one YAML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub name: String,
    /// String tag from the document's `kind` field; empty when absent.
    pub kind: String,
    /// Absolute path of the originating manifest file.
    pub source_file: PathBuf,
    pub location: Location,
    /// Names this entity points to, in reference-field declaration order.
    pub references: Vec<String>,
}

/// Counters accumulated over one full rebuild.
///
/// Per-file and per-entity failures never abort a rebuild; they land here
/// so the CLI can report how lossy the pass was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Candidate manifest files visited by the scanner.
    pub files_scanned: usize,
    /// Files that could not be read (permissions, I/O).
    pub files_unreadable: usize,
    /// Files whose YAML failed to parse.
    pub parse_failures: usize,
    /// Documents successfully loaded across all files.
    pub documents_loaded: usize,
    /// Entities that made it into the index.
    pub entities_indexed: usize,
    /// Entities dropped because their name was not found in the source text.
    pub location_misses: usize,
}
