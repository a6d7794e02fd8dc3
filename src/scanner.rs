//! Workspace scanner.
//!
//! Recursively enumerates candidate manifest files under the workspace
//! root: every file with a recognized suffix (`.yaml` / `.yml`) that does
//! not sit inside an excluded directory. Output is sorted by path so a
//! rebuild over an unchanged tree is deterministic.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;

/// File suffixes recognized as entity manifests.
pub const MANIFEST_SUFFIXES: &[&str] = &[".yaml", ".yml"];

/// Directories never descended into, on top of any configured excludes.
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/.hg/**",
    "**/.svn/**",
    "**/node_modules/**",
    "**/target/**",
];

/// True when the file name ends in one of the recognized manifest suffixes.
pub fn is_manifest_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| MANIFEST_SUFFIXES.iter().any(|s| n.ends_with(s)))
        .unwrap_or(false)
}

/// Build the exclusion matcher: defaults plus configured extra globs.
pub fn exclusion_set(config: &Config) -> Result<GlobSet> {
    let mut patterns: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
    patterns.extend(config.scanner.exclude_globs.clone());
    build_globset(&patterns)
}

/// Enumerate candidate manifest files under the workspace root.
///
/// Visits every non-excluded file exactly once; fails only when the root
/// itself is missing. Unreadable directory entries are logged and skipped
/// so the rest of the tree still gets scanned.
pub fn scan_workspace(config: &Config) -> Result<Vec<PathBuf>> {
    let root = &config.workspace.root;
    if !root.exists() {
        bail!("workspace root does not exist: {}", root.display());
    }

    let exclude_set = exclusion_set(config)?;

    let mut paths = Vec::new();
    let walker = WalkDir::new(root).follow_links(config.scanner.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_manifest_path(path) {
            continue;
        }
        if exclude_set.is_match(path) {
            continue;
        }
        paths.push(path.to_path_buf());
    }

    // Sort for deterministic ordering
    paths.sort();

    Ok(paths)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
