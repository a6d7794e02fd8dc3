//! Entity extraction from parsed YAML documents.
//!
//! Turns each document of a manifest file into at most one [`Entity`]:
//! `kind` and `metadata.name` come from the parsed value, the source
//! location is recovered by scanning the original file text for the
//! `name: <name>` declaration, and outbound references are collected from a
//! fixed set of `spec.*` fields. Everything else in the document is opaque.

use serde_yaml::Value;
use std::path::Path;
use tracing::warn;

use crate::models::{Entity, Location};

/// `spec.*` fields holding cross-entity references, in the order their
/// values are appended to [`Entity::references`].
pub const REFERENCE_FIELDS: &[&str] = &[
    "component",
    "component_instance",
    "target_component_instance",
    "dependency",
    "target_service",
];

/// Entities extracted from one file, plus how many were dropped because
/// their name declaration could not be located in the source text.
#[derive(Debug, Default)]
pub struct Extracted {
    pub entities: Vec<Entity>,
    pub location_misses: usize,
}

/// Extract indexable entities from one file's documents.
///
/// `docs` must be the documents [`crate::loader::load_documents`] produced
/// from `text`, in order; location recovery scans `text` itself, not the
/// parsed structure.
pub fn extract_entities(path: &Path, text: &str, docs: &[Value]) -> Extracted {
    let lines: Vec<&str> = text.lines().collect();
    let spans = document_spans(&lines, docs.len());

    let mut out = Extracted::default();
    for (doc_idx, doc) in docs.iter().enumerate() {
        let Some(name) = entity_name(doc) else {
            continue;
        };
        let kind = doc
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let span = spans.as_ref().map(|s| s[doc_idx]);
        let Some(location) = recover_location(&lines, span, name) else {
            warn!(
                file = %path.display(),
                name,
                "entity name not found in source text, skipping"
            );
            out.location_misses += 1;
            continue;
        };

        out.entities.push(Entity {
            name: name.to_string(),
            kind,
            source_file: path.to_path_buf(),
            location,
            references: extract_references(doc),
        });
    }
    out
}

/// Non-empty `metadata.name`, or `None` if this document is not an entity.
fn entity_name(doc: &Value) -> Option<&str> {
    let name = doc.get("metadata")?.get("name")?.as_str()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Find the source span of the `name: <name>` declaration.
///
/// Scans for the first line containing the literal substring `name: <name>`;
/// the column is the byte index of that substring within the line. The scan
/// is restricted to the entity's own document span when one is known, then
/// falls back to the whole file; duplicate substrings within a span still
/// resolve to the first match.
fn recover_location(lines: &[&str], span: Option<(usize, usize)>, name: &str) -> Option<Location> {
    let needle = format!("name: {name}");
    let hit = span
        .and_then(|(start, end)| find_needle(lines, start, end, &needle))
        .or_else(|| find_needle(lines, 0, lines.len(), &needle))?;
    Some(Location {
        line: hit.0,
        column: hit.1,
        length: name.len(),
    })
}

fn find_needle(lines: &[&str], start: usize, end: usize, needle: &str) -> Option<(usize, usize)> {
    lines[start..end.min(lines.len())]
        .iter()
        .enumerate()
        .find_map(|(offset, line)| line.find(needle).map(|col| (start + offset, col)))
}

/// Collect non-empty string values of the fixed reference fields, in
/// [`REFERENCE_FIELDS`] order regardless of their physical order in the
/// source text.
fn extract_references(doc: &Value) -> Vec<String> {
    let Some(spec) = doc.get("spec") else {
        return Vec::new();
    };
    REFERENCE_FIELDS
        .iter()
        .filter_map(|field| spec.get(*field).and_then(Value::as_str))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Partition file lines into per-document spans by splitting on `---`
/// separator lines, dropping segments that hold no content (leading or
/// trailing separators). Returns `None` when the segment count does not
/// match the parsed document count, in which case callers scan the whole
/// file instead.
fn document_spans(lines: &[&str], doc_count: usize) -> Option<Vec<(usize, usize)>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (idx, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            spans.push((start, idx));
            start = idx + 1;
        }
    }
    spans.push((start, lines.len()));

    spans.retain(|&(s, e)| {
        lines[s..e]
            .iter()
            .any(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
    });

    if spans.len() == doc_count {
        Some(spans)
    } else {
        None
    }
}
