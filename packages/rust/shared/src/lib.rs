//! Shared types, error model, and configuration for docmirror.
//!
//! This crate is the foundation depended on by all other docmirror crates.
//! It provides:
//! - [`DocMirrorError`], the unified error type
//! - The document [`Manifest`] and its entry types
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod manifest;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, DefaultsConfig, SourceConfig, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{DocMirrorError, Result};
pub use manifest::Manifest;
pub use types::{DocumentEntry, LinkTarget, SyncEntry};
