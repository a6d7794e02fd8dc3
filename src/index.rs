//! The entity index and the full-rebuild pipeline.
//!
//! Coordinates the whole indexing flow: scanner → loader → extractor →
//! record set. The index exclusively owns its records; a rebuild constructs
//! the replacement set to completion before swapping it in, so readers never
//! observe a cleared-but-unfilled index. There is deliberately no
//! incremental path: any qualifying file event means a full rebuild.

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::extract;
use crate::loader;
use crate::models::{Entity, IndexStats};
use crate::scanner;

/// The current set of indexed entities for one workspace.
#[derive(Debug, Default)]
pub struct EntityIndex {
    entities: Vec<Entity>,
}

impl EntityIndex {
    /// Run the full pipeline over the configured workspace root and return
    /// a freshly built index.
    pub fn build(config: &Config) -> Result<(Self, IndexStats)> {
        let (entities, stats) = build_entities(config)?;
        Ok((Self { entities }, stats))
    }

    /// Full rebuild: discard the current record set and re-derive it from
    /// the file tree.
    ///
    /// The new set is built to completion first and swapped in afterwards;
    /// on error the previous records are kept.
    pub fn rebuild(&mut self, config: &Config) -> Result<IndexStats> {
        let (entities, stats) = build_entities(config)?;
        self.entities = entities;
        Ok(stats)
    }

    /// First record whose name equals `name` exactly. Case-sensitive, no
    /// normalization, no transitive reference resolution.
    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Snapshot of the current record set, in index order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn build_entities(config: &Config) -> Result<(Vec<Entity>, IndexStats)> {
    let paths = scanner::scan_workspace(config)?;

    let mut entities = Vec::new();
    let mut stats = IndexStats::default();

    for path in &paths {
        stats.files_scanned += 1;

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "unreadable manifest, skipping");
                stats.files_unreadable += 1;
                continue;
            }
        };

        let docs = match loader::load_documents(&text) {
            Ok(docs) => docs,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "manifest failed to parse, skipping");
                stats.parse_failures += 1;
                continue;
            }
        };
        stats.documents_loaded += docs.len();

        let extracted = extract::extract_entities(path, &text, &docs);
        stats.location_misses += extracted.location_misses;
        debug!(
            file = %path.display(),
            documents = docs.len(),
            entities = extracted.entities.len(),
            "indexed manifest"
        );
        entities.extend(extracted.entities);
    }

    stats.entities_indexed = entities.len();
    Ok((entities, stats))
}

/// `kdx index`: run one full build and report what it found.
pub fn run_index(config: &Config, json: bool) -> Result<()> {
    let (_, stats) = EntityIndex::build(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("index {}", config.workspace.root.display());
    println!("  files scanned: {}", stats.files_scanned);
    println!("  documents loaded: {}", stats.documents_loaded);
    println!("  entities indexed: {}", stats.entities_indexed);
    if stats.files_unreadable > 0 {
        println!("  unreadable files: {}", stats.files_unreadable);
    }
    if stats.parse_failures > 0 {
        println!("  parse failures: {}", stats.parse_failures);
    }
    if stats.location_misses > 0 {
        println!("  entities skipped (no location): {}", stats.location_misses);
    }
    println!("ok");
    Ok(())
}
