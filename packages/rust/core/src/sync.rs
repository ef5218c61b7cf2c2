//! Sync engine: manifest entries → transformed `+page.md` files.
//!
//! Entries are processed strictly in order. A missing source file is counted
//! as skipped; any other I/O failure aborts the run and leaves pages already
//! written in place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use docmirror_markdown::LinkTable;
use docmirror_shared::{DocMirrorError, LinkTarget, Result, SyncEntry};

/// Directory under the output root that holds every mirrored page.
pub const DOCS_DIR: &str = "docs";

/// File name of each page artifact.
pub const PAGE_FILE_NAME: &str = "+page.md";

/// Input for one sync run.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Resolved root the entries' `source_path`s are relative to.
    pub source_root: PathBuf,
    /// Root under which `docs/<id>/+page.md` files are written.
    pub output_root: PathBuf,
    /// Entries to mirror, in order.
    pub entries: Vec<SyncEntry>,
    /// Link table for the whole manifest. Falls back to `entries` when `None`.
    pub link_table: Option<Vec<LinkTarget>>,
}

/// Aggregate result of a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Pages written.
    pub written: usize,
    /// Entries whose source file does not exist.
    pub skipped: usize,
}

/// Progress callback for reporting sync status.
pub trait SyncProgress: Send + Sync {
    /// Called after a page has been written.
    fn entry_written(&self, id: &str, path: &Path, current: usize, total: usize);
    /// Called when an entry's source file is missing.
    fn entry_skipped(&self, id: &str, source: &Path, current: usize, total: usize);
    /// Called once the run completes.
    fn done(&self, outcome: &SyncOutcome);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn entry_written(&self, _id: &str, _path: &Path, _current: usize, _total: usize) {}
    fn entry_skipped(&self, _id: &str, _source: &Path, _current: usize, _total: usize) {}
    fn done(&self, _outcome: &SyncOutcome) {}
}

/// Output location for an entry id: `<output_root>/docs/<id segments>/+page.md`.
pub fn page_path(output_root: &Path, id: &str) -> PathBuf {
    let mut path = output_root.join(DOCS_DIR);
    for segment in id.split('/') {
        path.push(segment);
    }
    path.push(PAGE_FILE_NAME);
    path
}

/// Mirror every entry of `request`, returning written/skipped counts.
#[instrument(skip_all, fields(
    entries = request.entries.len(),
    source_root = %request.source_root.display(),
    output_root = %request.output_root.display()
))]
pub async fn sync(request: &SyncRequest, progress: &dyn SyncProgress) -> Result<SyncOutcome> {
    let links = match &request.link_table {
        Some(targets) => LinkTable::new(targets),
        None => {
            let targets: Vec<LinkTarget> = request.entries.iter().map(LinkTarget::from).collect();
            LinkTable::new(&targets)
        }
    };

    info!(link_targets = links.len(), "starting sync");

    let total = request.entries.len();
    let mut outcome = SyncOutcome::default();

    for (i, entry) in request.entries.iter().enumerate() {
        let source = request.source_root.join(&entry.source_path);

        let Some(raw) = read_source(&source).await? else {
            warn!(id = %entry.id, source = %source.display(), "source file missing, skipping");
            outcome.skipped += 1;
            progress.entry_skipped(&entry.id, &source, i + 1, total);
            continue;
        };

        let page = docmirror_markdown::render_page(&entry.title, &raw, &links);
        let out_path = page_path(&request.output_root, &entry.id);
        write_page(&out_path, &page).await?;

        debug!(id = %entry.id, path = %out_path.display(), bytes = page.len(), "wrote page");
        outcome.written += 1;
        progress.entry_written(&entry.id, &out_path, i + 1, total);
    }

    info!(
        written = outcome.written,
        skipped = outcome.skipped,
        "sync complete"
    );
    progress.done(&outcome);

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a source document. `Ok(None)` means the file does not exist, including
/// when a parent component of the path is a regular file.
async fn read_source(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(DocMirrorError::io(path, e)),
    }
}

async fn write_page(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DocMirrorError::io(parent, e))?;
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|e| DocMirrorError::io(path, e))
}
