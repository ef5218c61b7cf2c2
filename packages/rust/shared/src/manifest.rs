//! The document manifest: an ordered, validated list of [`DocumentEntry`].
//!
//! Loaded once from `docs-manifest.toml` (a list of `[[entries]]` tables) and
//! then passed around by reference. The manifest is never mutated after
//! validation.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DocMirrorError, Result};
use crate::types::{DocumentEntry, LinkTarget, SyncEntry};

/// On-disk shape of the manifest file.
#[derive(Debug, Serialize, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    entries: Vec<DocumentEntry>,
}

/// Validated, immutable collection of document entries.
#[derive(Debug, Clone)]
pub struct Manifest {
    entries: Vec<DocumentEntry>,
}

impl Manifest {
    /// Build a manifest from entries, rejecting duplicate ids and empty fields.
    pub fn new(entries: Vec<DocumentEntry>) -> Result<Self> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    /// Parse and validate a manifest from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ManifestFile = toml::from_str(content)
            .map_err(|e| DocMirrorError::parse(format!("invalid manifest: {e}")))?;
        Self::new(file.entries)
    }

    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocMirrorError::io(path, e))?;

        let manifest = toml::from_str::<ManifestFile>(&content)
            .map_err(|e| {
                DocMirrorError::parse(format!("failed to parse {}: {e}", path.display()))
            })
            .and_then(|file| Self::new(file.entries))?;

        debug!(?path, entries = manifest.len(), "manifest loaded");
        Ok(manifest)
    }

    /// All entries in manifest order.
    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&DocumentEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries mirrored from the source tree (everything not marked `local`).
    pub fn synced_entries(&self) -> Vec<SyncEntry> {
        self.entries
            .iter()
            .filter(|e| !e.local)
            .map(SyncEntry::from)
            .collect()
    }

    /// Number of entries marked `local`.
    pub fn local_count(&self) -> usize {
        self.entries.iter().filter(|e| e.local).count()
    }

    /// Link targets for the whole manifest, local entries included.
    pub fn link_targets(&self) -> Vec<LinkTarget> {
        self.entries.iter().map(LinkTarget::from).collect()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_entries(entries: &[DocumentEntry]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        if entry.id.trim().is_empty() {
            return Err(DocMirrorError::validation(format!(
                "entry #{index} has an empty id"
            )));
        }
        if entry.title.trim().is_empty() {
            return Err(DocMirrorError::validation(format!(
                "entry '{}' has an empty title",
                entry.id
            )));
        }
        if entry.source_path.trim().is_empty() {
            return Err(DocMirrorError::validation(format!(
                "entry '{}' has an empty source_path",
                entry.id
            )));
        }
        validate_id_segments(&entry.id)?;

        if !seen.insert(entry.id.as_str()) {
            return Err(DocMirrorError::validation(format!(
                "duplicate entry id '{}'",
                entry.id
            )));
        }
    }

    Ok(())
}

/// Ids become directory paths under the output root, so every segment must be
/// a plain name.
fn validate_id_segments(id: &str) -> Result<()> {
    let bad_segment = id
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == ".." || seg.contains('\\'));

    if bad_segment {
        return Err(DocMirrorError::validation(format!(
            "entry id '{id}' must be '/'-separated plain path segments"
        )));
    }
    Ok(())
}
