//! Navigation grouping of manifest entries.
//!
//! Used by the site's sidebar; the sync pipeline never calls it.

use std::collections::HashMap;

use serde::Serialize;

use docmirror_shared::DocumentEntry;

/// Label for entries that have no `group`.
pub const FALLBACK_GROUP: &str = "Other";

/// One navigation group and its entries, in manifest order.
#[derive(Debug, Clone, Serialize)]
pub struct SectionGroup<'a> {
    pub label: String,
    pub items: Vec<&'a DocumentEntry>,
}

/// Partition entries by group label.
///
/// Groups appear in the order their label is first seen; entries keep their
/// relative order within a group. Unlabelled entries share [`FALLBACK_GROUP`],
/// placed where the first of them occurs.
pub fn group_by_label(entries: &[DocumentEntry]) -> Vec<SectionGroup<'_>> {
    let mut groups: Vec<SectionGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let label = entry.group.as_deref().unwrap_or(FALLBACK_GROUP);
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push(SectionGroup {
                label: label.to_string(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(entry);
    }

    groups
}
