//! Sync orchestration and manifest-level logic for docmirror.
//!
//! Ties the manifest, source-root discovery and the Markdown transformer
//! together into the end-to-end `sync` workflow, and provides navigation
//! grouping for the site.

pub mod root;
pub mod sections;
pub mod sync;
