//! Cross-document link rewriting.
//!
//! Documents in the source tree link to siblings as `[text](./other.md)`.
//! On the site those files live at `/docs/<id>`, so such links are rewritten
//! through a [`LinkTable`] built from the manifest.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use docmirror_shared::LinkTarget;

/// Route prefix every mirrored page is served under.
pub const DOCS_ROUTE_PREFIX: &str = "/docs";

/// Lookup from source file base name to logical id.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    by_file_name: HashMap<String, String>,
}

impl LinkTable {
    /// Build the lookup. A later target with the same base name replaces an
    /// earlier one.
    pub fn new<'a>(targets: impl IntoIterator<Item = &'a LinkTarget>) -> Self {
        let mut by_file_name = HashMap::new();
        for target in targets {
            by_file_name.insert(file_name(&target.source_path).to_string(), target.id.clone());
        }
        Self { by_file_name }
    }

    /// Logical id for a source base name such as `guide.md`.
    pub fn resolve(&self, file_name: &str) -> Option<&str> {
        self.by_file_name.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_file_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file_name.is_empty()
    }

    /// Rewrite every `](./<name>.md)` destination whose base name is known.
    ///
    /// Only single-segment `./` references with a `.md` extension are
    /// considered. Unknown names are left exactly as written.
    pub fn rewrite(&self, text: &str) -> String {
        static SIBLING_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"\]\(\./([A-Za-z0-9_-]+\.md)\)").expect("valid regex")
        });

        SIBLING_LINK_RE
            .replace_all(text, |caps: &Captures| match self.resolve(&caps[1]) {
                Some(id) => format!("]({})", route_for(id)),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Site route for a logical id.
pub fn route_for(id: &str) -> String {
    format!("{DOCS_ROUTE_PREFIX}/{id}")
}

/// Rewrite sibling `.md` links in `text` using `targets` as the lookup.
pub fn rewrite_cross_links(text: &str, targets: &[LinkTarget]) -> String {
    LinkTable::new(targets).rewrite(text)
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
