//! Re-index trigger.
//!
//! Subscribes to file-system notifications for the workspace root and runs
//! a full rebuild whenever a manifest is created, modified, or deleted.
//! Events are consumed strictly in delivery order; anything that arrives
//! while a rebuild is running queues in the channel, and a drained backlog
//! collapses into a single rebuild. There is no diffing: the file tree is
//! the single source of truth and every qualifying event re-derives the
//! whole index from it.

use anyhow::{Context, Result};
use globset::GlobSet;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;
use crate::index::EntityIndex;
use crate::scanner;

/// True when the event should trigger a rebuild: a create / modify / delete
/// touching at least one non-excluded manifest path.
pub fn qualifies(event: &Event, excludes: &GlobSet) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| scanner::is_manifest_path(p) && !excludes.is_match(p))
}

/// `kdx watch`: build the index, then rebuild it on every qualifying
/// file-system event until interrupted.
pub fn run_watch(config: &Config) -> Result<()> {
    let excludes = scanner::exclusion_set(config)?;
    let root = &config.workspace.root;

    let (mut index, stats) = EntityIndex::build(config)?;
    println!(
        "watching {} ({} entities indexed)",
        root.display(),
        stats.entities_indexed
    );

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;
    watcher
        .watch(root, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", root.display()))?;

    loop {
        let first = match rx.recv() {
            Ok(result) => result,
            Err(_) => break, // watcher dropped
        };
        let mut pending = event_qualifies(first, &excludes);

        // Coalesce whatever queued up while we were idle or rebuilding.
        while let Ok(more) = rx.try_recv() {
            pending |= event_qualifies(more, &excludes);
        }
        if !pending {
            continue;
        }

        match index.rebuild(config) {
            Ok(stats) => {
                info!(
                    entities = stats.entities_indexed,
                    files = stats.files_scanned,
                    "index rebuilt"
                );
            }
            Err(err) => {
                // Keep the previous records and keep watching.
                warn!(error = %err, "rebuild failed, keeping previous index");
            }
        }
    }

    Ok(())
}

fn event_qualifies(result: notify::Result<Event>, excludes: &GlobSet) -> bool {
    match result {
        Ok(event) => qualifies(&event, excludes),
        Err(err) => {
            warn!(error = %err, "watch error");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
    use std::path::PathBuf;

    fn excludes() -> GlobSet {
        scanner::exclusion_set(&Config::with_root(PathBuf::from("/ws"))).unwrap()
    }

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_manifest_create_modify_delete_qualify() {
        let excludes = excludes();
        for kind in [
            EventKind::Create(CreateKind::File),
            EventKind::Modify(ModifyKind::Any),
            EventKind::Remove(RemoveKind::File),
        ] {
            assert!(qualifies(&event(kind, "/ws/app.yaml"), &excludes));
        }
    }

    #[test]
    fn test_non_manifest_paths_do_not_qualify() {
        let excludes = excludes();
        let kind = EventKind::Modify(ModifyKind::Any);
        assert!(!qualifies(&event(kind, "/ws/readme.md"), &excludes));
        assert!(!qualifies(&event(kind, "/ws/app.yaml.swp"), &excludes));
    }

    #[test]
    fn test_excluded_directories_do_not_qualify() {
        let excludes = excludes();
        let kind = EventKind::Modify(ModifyKind::Any);
        assert!(!qualifies(&event(kind, "/ws/.git/app.yaml"), &excludes));
        assert!(!qualifies(
            &event(kind, "/ws/node_modules/pkg/dep.yml"),
            &excludes
        ));
    }

    #[test]
    fn test_access_events_do_not_qualify() {
        let excludes = excludes();
        assert!(!qualifies(
            &event(EventKind::Access(AccessKind::Any), "/ws/app.yaml"),
            &excludes
        ));
    }
}
