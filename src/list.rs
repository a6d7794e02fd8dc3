use anyhow::Result;

use crate::config::Config;
use crate::index::EntityIndex;

/// `kdx entities`: tabular dump of the current index, optionally filtered
/// to entities whose references include a given name.
pub fn list_entities(config: &Config, referencing: Option<&str>) -> Result<()> {
    let (index, _) = EntityIndex::build(config)?;

    println!("{:<24} {:<24} LOCATION", "NAME", "KIND");
    let mut shown = 0usize;
    for entity in index.entities() {
        if let Some(target) = referencing {
            if !entity.references.iter().any(|r| r == target) {
                continue;
            }
        }
        println!(
            "{:<24} {:<24} {}:{}:{}",
            entity.name,
            if entity.kind.is_empty() {
                "-"
            } else {
                entity.kind.as_str()
            },
            entity.source_file.display(),
            entity.location.line + 1,
            entity.location.column + 1
        );
        shown += 1;
    }
    println!("{} entities", shown);

    Ok(())
}
