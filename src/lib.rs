//! # kindex
//!
//! A workspace indexer and go-to-definition resolver for YAML entity
//! manifests.
//!
//! kindex walks a tree of (possibly multi-document) YAML files describing
//! named, kinded entities, extracts each entity's declaration site and its
//! cross-entity references, and answers "where is the definition of name X"
//! queries by exact name match. Only `kind`, `metadata.name`, and a fixed
//! set of `spec.*` reference fields are interpreted; everything else in a
//! manifest is opaque.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌─────────────┐
//! │ Scanner   │──▶│  Loader   │──▶│ Extractor  │──▶│ EntityIndex │
//! │ walk tree │   │ YAML docs │   │ records    │   │ lookup      │
//! └──────────┘   └──────────┘   └───────────┘   └──────┬──────┘
//!       ▲                                              │
//!       │ full rebuild                                 ▼
//! ┌──────────┐                                   ┌──────────┐
//! │  Watcher  │◀── create/modify/delete          │ Resolver  │
//! └──────────┘                                   └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`loader`] | Multi-document YAML loading |
//! | [`scanner`] | Recursive manifest discovery |
//! | [`extract`] | Entity and reference extraction |
//! | [`index`] | The entity index and full rebuild |
//! | [`resolve`] | Exact-name definition resolution |
//! | [`watch`] | File-change driven re-indexing |
//! | [`list`] | Entity listing command |

pub mod config;
pub mod extract;
pub mod index;
pub mod list;
pub mod loader;
pub mod models;
pub mod resolve;
pub mod scanner;
pub mod watch;
