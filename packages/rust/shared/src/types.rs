//! Core domain types for mirrored documentation entries.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DocumentEntry
// ---------------------------------------------------------------------------

/// One logical document tracked by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Unique logical identifier; doubles as the site route (`/docs/<id>`).
    /// May contain `/` to nest pages (e.g. `core/memory`).
    pub id: String,
    /// Display title written into the page metadata block.
    pub title: String,
    /// Source file path, relative to the resolved source root.
    pub source_path: String,
    /// Authored directly in the site: never synced, still a link target.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub local: bool,
    /// Navigation group label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

// ---------------------------------------------------------------------------
// SyncEntry / LinkTarget
// ---------------------------------------------------------------------------

/// The subset of a [`DocumentEntry`] needed to mirror one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    pub id: String,
    pub title: String,
    pub source_path: String,
}

impl From<&DocumentEntry> for SyncEntry {
    fn from(entry: &DocumentEntry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            source_path: entry.source_path.clone(),
        }
    }
}

/// The subset of a [`DocumentEntry`] used to resolve cross-document links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub id: String,
    pub source_path: String,
}

impl From<&DocumentEntry> for LinkTarget {
    fn from(entry: &DocumentEntry) -> Self {
        Self {
            id: entry.id.clone(),
            source_path: entry.source_path.clone(),
        }
    }
}

impl From<&SyncEntry> for LinkTarget {
    fn from(entry: &SyncEntry) -> Self {
        Self {
            id: entry.id.clone(),
            source_path: entry.source_path.clone(),
        }
    }
}
