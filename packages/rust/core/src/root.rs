//! Source-root discovery.
//!
//! The sync engine only ever receives a resolved root; all searching happens
//! here. Resolution order:
//! 1. explicit override (CLI flag / `DOCMIRROR_SOURCE_ROOT`)
//! 2. `[source] root` from `docmirror.toml`
//! 3. the first ancestor of the project root containing
//!    `<sibling_dir>/<marker_file>`
//! 4. `<project_root>/../<sibling_dir>`

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use docmirror_shared::SourceConfig;

/// Where a resolved source root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOrigin {
    Override,
    Config,
    Discovered,
    Fallback,
}

impl std::fmt::Display for RootOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Override => "override",
            Self::Config => "config",
            Self::Discovered => "discovered",
            Self::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// A resolved source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    pub path: PathBuf,
    pub origin: RootOrigin,
}

/// Resolve the directory mirrored documents are read from.
#[instrument(skip_all, fields(project_root = %project_root.display()))]
pub fn resolve_source_root(
    project_root: &Path,
    config: &SourceConfig,
    override_root: Option<&Path>,
) -> SourceRoot {
    if let Some(path) = override_root {
        return SourceRoot {
            path: project_root.join(path),
            origin: RootOrigin::Override,
        };
    }

    if let Some(root) = config.root.as_deref() {
        return SourceRoot {
            path: project_root.join(root),
            origin: RootOrigin::Config,
        };
    }

    let mut dir = project_root.to_path_buf();
    for _ in 0..config.search_depth {
        let Some(parent) = dir.parent().map(Path::to_path_buf) else {
            break;
        };
        let candidate = parent.join(&config.sibling_dir);
        if candidate.join(&config.marker_file).exists() {
            debug!(path = %candidate.display(), "found sibling source project");
            return SourceRoot {
                path: candidate,
                origin: RootOrigin::Discovered,
            };
        }
        dir = parent;
    }

    let fallback = project_root.join("..").join(&config.sibling_dir);
    debug!(path = %fallback.display(), "no sibling project found, using fallback");
    SourceRoot {
        path: fallback,
        origin: RootOrigin::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_tree() -> PathBuf {
        let base = std::env::temp_dir().join(format!("dm-root-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&base).unwrap();
        base
    }

    fn config() -> SourceConfig {
        SourceConfig {
            sibling_dir: "upstream".into(),
            ..SourceConfig::default()
        }
    }

    #[test]
    fn override_wins() {
        let base = temp_tree();
        let root = resolve_source_root(&base, &config(), Some(Path::new("/abs/docs")));
        assert_eq!(root.path, PathBuf::from("/abs/docs"));
        assert_eq!(root.origin, RootOrigin::Override);

        let root = resolve_source_root(&base, &config(), Some(Path::new("rel")));
        assert_eq!(root.path, base.join("rel"));
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn config_root_beats_discovery() {
        let base = temp_tree();
        let mut cfg = config();
        cfg.root = Some("../elsewhere".into());

        let root = resolve_source_root(&base, &cfg, None);
        assert_eq!(root.path, base.join("../elsewhere"));
        assert_eq!(root.origin, RootOrigin::Config);
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn discovers_sibling_in_ancestor() {
        let base = temp_tree();
        let project = base.join("work/site");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::create_dir_all(base.join("upstream")).unwrap();
        std::fs::write(base.join("upstream/README.md"), "# upstream").unwrap();

        let root = resolve_source_root(&project, &config(), None);
        assert_eq!(root.path, base.join("upstream"));
        assert_eq!(root.origin, RootOrigin::Discovered);
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn sibling_without_marker_is_ignored() {
        let base = temp_tree();
        let project = base.join("site");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::create_dir_all(base.join("upstream")).unwrap();

        let root = resolve_source_root(&project, &config(), None);
        assert_eq!(root.origin, RootOrigin::Fallback);
        assert_eq!(root.path, project.join("..").join("upstream"));
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn search_depth_limits_walk() {
        let base = temp_tree();
        let project = base.join("a/b/c");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::create_dir_all(base.join("upstream")).unwrap();
        std::fs::write(base.join("upstream/README.md"), "").unwrap();

        let mut cfg = config();
        cfg.search_depth = 2;
        assert_eq!(resolve_source_root(&project, &cfg, None).origin, RootOrigin::Fallback);

        cfg.search_depth = 3;
        assert_eq!(resolve_source_root(&project, &cfg, None).origin, RootOrigin::Discovered);
        let _ = std::fs::remove_dir_all(&base);
    }
}
