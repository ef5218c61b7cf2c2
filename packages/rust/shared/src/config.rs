//! Application configuration for docmirror.
//!
//! Project config lives at `<project_root>/docmirror.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocMirrorError, Result};

/// Config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "docmirror.toml";

// ---------------------------------------------------------------------------
// Config structs (matching docmirror.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Where the mirrored documents live.
    #[serde(default)]
    pub source: SourceConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Manifest file, relative to the project root.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Output root; pages land under `<output_root>/docs/`.
    #[serde(default = "default_output_root")]
    pub output_root: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
            output_root: default_output_root(),
        }
    }
}

fn default_manifest_path() -> String {
    "docs-manifest.toml".into()
}
fn default_output_root() -> String {
    "src/routes".into()
}

/// `[source]` section: how the source root is discovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Explicit source root (relative paths resolve against the project root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Name of the sibling project directory holding the documents.
    #[serde(default = "default_sibling_dir")]
    pub sibling_dir: String,

    /// File whose presence identifies the sibling project.
    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    /// How many ancestor directories to search for the sibling project.
    #[serde(default = "default_search_depth")]
    pub search_depth: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: None,
            sibling_dir: default_sibling_dir(),
            marker_file: default_marker_file(),
            search_depth: default_search_depth(),
        }
    }
}

fn default_sibling_dir() -> String {
    "project-docs".into()
}
fn default_marker_file() -> String {
    "README.md".into()
}
fn default_search_depth() -> u32 {
    5
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config file (`<project_root>/docmirror.toml`).
pub fn config_file_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Load the project config. Returns defaults if the file does not exist.
pub fn load_config(project_root: &Path) -> Result<AppConfig> {
    let path = config_file_path(project_root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocMirrorError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocMirrorError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file into the project root.
/// Refuses to overwrite an existing file. Returns the path written.
pub fn init_config(project_root: &Path) -> Result<PathBuf> {
    let path = config_file_path(project_root);
    if path.exists() {
        return Err(DocMirrorError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    std::fs::create_dir_all(project_root).map_err(|e| DocMirrorError::io(project_root, e))?;

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocMirrorError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocMirrorError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("manifest_path"));
        assert!(toml_str.contains("project-docs"));
        assert!(toml_str.contains("output_root = \"src/routes\""));
        assert!(
            !toml_str.lines().any(|l| l.trim_start().starts_with("root =")),
            "unset root should be omitted"
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[source]
root = "../upstream"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.source.root.as_deref(), Some("../upstream"));
        assert_eq!(config.source.marker_file, "README.md");
        assert_eq!(config.source.search_depth, 5);
        assert_eq!(config.defaults.output_root, "src/routes");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = std::env::temp_dir().join(format!("dm-config-{}", uuid::Uuid::now_v7()));
        let config = load_config(&dir).expect("defaults");
        assert_eq!(config.defaults.manifest_path, "docs-manifest.toml");
    }

    #[test]
    fn init_then_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("dm-config-{}", uuid::Uuid::now_v7()));
        let path = init_config(&dir).expect("init config");
        assert!(path.ends_with(CONFIG_FILE_NAME));

        let config = load_config(&dir).expect("load written config");
        assert_eq!(config.source.sibling_dir, "project-docs");

        // Second init must not clobber the file.
        assert!(init_config(&dir).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_config_is_config_error() {
        let dir = std::env::temp_dir().join(format!("dm-config-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "[defaults\n").unwrap();

        let err = load_config(&dir).unwrap_err();
        assert!(matches!(err, DocMirrorError::Config { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
