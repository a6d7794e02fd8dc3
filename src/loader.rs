//! Multi-document YAML loader.
//!
//! A manifest file may hold zero, one, or many YAML documents separated by
//! `---` lines. The loader parses the raw text into an ordered sequence of
//! [`serde_yaml::Value`]s, preserving document order. A parse error anywhere
//! in the file fails the whole file; callers log and skip it so one broken
//! manifest never aborts a workspace rebuild.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_yaml::Value;

/// Parse raw manifest text into its documents, in document order.
pub fn load_documents(text: &str) -> Result<Vec<Value>> {
    let mut docs = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document).context("invalid YAML document")?;
        docs.push(value);
    }
    Ok(docs)
}
