use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkspaceConfig {
    /// Root directory of the manifest tree to index.
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScannerConfig {
    /// Extra exclusion globs on top of the built-in defaults
    /// (version-control metadata, `node_modules`, `target`).
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Config {
    /// A config-file-free configuration rooted at `root`.
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            workspace: WorkspaceConfig { root },
            scanner: ScannerConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.workspace.root.as_os_str().is_empty() {
        anyhow::bail!("workspace.root must not be empty");
    }

    Ok(config)
}
