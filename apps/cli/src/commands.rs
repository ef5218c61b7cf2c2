//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use docmirror_core::root::resolve_source_root;
use docmirror_core::sections::group_by_label;
use docmirror_core::sync::{SyncOutcome, SyncProgress, SyncRequest};
use docmirror_shared::{AppConfig, Manifest, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docmirror: mirror external Markdown docs into a statically rendered site.
#[derive(Parser)]
#[command(
    name = "docmirror",
    version,
    about = "Mirror external Markdown documents into a documentation site's routes.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Site project root (defaults to the current directory).
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Mirror every non-local manifest entry into `<out>/docs/<id>/+page.md`.
    Sync {
        /// Manifest file (defaults to `[defaults] manifest_path`).
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Output root (defaults to `[defaults] output_root`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Directory the manifest's source paths are relative to.
        #[arg(long, env = "DOCMIRROR_SOURCE_ROOT")]
        source_root: Option<PathBuf>,
    },

    /// Load and validate the manifest.
    Check {
        /// Manifest file (defaults to `[defaults] manifest_path`).
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Print manifest entries grouped for navigation.
    Sections {
        /// Manifest file (defaults to `[defaults] manifest_path`).
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Emit JSON instead of an indented listing.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write `docmirror.toml` with defaults into the project root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["docmirror_cli", "docmirror_core", "docmirror_markdown", "docmirror_shared"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let project_root = match cli.project_root {
        Some(p) => p,
        None => std::env::current_dir().wrap_err("cannot determine working directory")?,
    };

    match cli.command {
        Command::Sync {
            manifest,
            out,
            source_root,
        } => cmd_sync(&project_root, manifest, out, source_root).await,
        Command::Check { manifest } => cmd_check(&project_root, manifest),
        Command::Sections { manifest, json } => cmd_sections(&project_root, manifest, json),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&project_root),
            ConfigAction::Show => cmd_config_show(&project_root),
        },
    }
}

/// Load the manifest named on the command line, or the configured default.
fn load_manifest(
    project_root: &Path,
    config: &AppConfig,
    manifest: Option<PathBuf>,
) -> Result<Manifest> {
    let path = project_root.join(
        manifest.unwrap_or_else(|| PathBuf::from(&config.defaults.manifest_path)),
    );
    let manifest = Manifest::load(&path)
        .wrap_err_with(|| format!("failed to load manifest {}", path.display()))?;
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_sync(
    project_root: &Path,
    manifest: Option<PathBuf>,
    out: Option<PathBuf>,
    source_root: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(project_root)?;
    let manifest = load_manifest(project_root, &config, manifest)?;

    let source = resolve_source_root(project_root, &config.source, source_root.as_deref());
    let output_root = project_root.join(
        out.unwrap_or_else(|| PathBuf::from(&config.defaults.output_root)),
    );

    println!("Source root: {} ({})", source.path.display(), source.origin);

    let entries = manifest.synced_entries();
    println!(
        "Syncing {} entries ({} local entries skipped)",
        entries.len(),
        manifest.local_count()
    );

    info!(
        source_root = %source.path.display(),
        output_root = %output_root.display(),
        "syncing documentation"
    );

    let request = SyncRequest {
        source_root: source.path,
        output_root,
        entries,
        link_table: Some(manifest.link_targets()),
    };

    let reporter = CliProgress::new(request.entries.len());
    let outcome = docmirror_core::sync::sync(&request, &reporter).await?;

    println!("Synced {} docs, skipped {}", outcome.written, outcome.skipped);
    Ok(())
}

fn cmd_check(project_root: &Path, manifest: Option<PathBuf>) -> Result<()> {
    let config = load_config(project_root)?;
    let manifest = load_manifest(project_root, &config, manifest)?;

    let groups = group_by_label(manifest.entries());
    println!(
        "Manifest OK: {} entries ({} local), {} groups",
        manifest.len(),
        manifest.local_count(),
        groups.len()
    );
    Ok(())
}

fn cmd_sections(project_root: &Path, manifest: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_config(project_root)?;
    let manifest = load_manifest(project_root, &config, manifest)?;
    let groups = group_by_label(manifest.entries());

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    for group in &groups {
        println!("{}", group.label);
        for entry in &group.items {
            let marker = if entry.local { " (local)" } else { "" };
            println!("  {}  {}{marker}", entry.id, entry.title);
        }
    }
    Ok(())
}

fn cmd_config_init(project_root: &Path) -> Result<()> {
    let path = init_config(project_root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(project_root: &Path) -> Result<()> {
    let config = load_config(project_root)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }
}

impl SyncProgress for CliProgress {
    fn entry_written(&self, id: &str, _path: &Path, current: usize, _total: usize) {
        self.bar.set_position(current as u64);
        self.bar.set_message(id.to_string());
    }

    fn entry_skipped(&self, id: &str, source: &Path, current: usize, _total: usize) {
        self.bar.set_position(current as u64);
        self.bar
            .println(format!("  skipped {id}: {} not found", source.display()));
    }

    fn done(&self, _outcome: &SyncOutcome) {
        self.bar.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sync_flags() {
        let cli = Cli::try_parse_from([
            "docmirror",
            "--project-root",
            "/site",
            "-v",
            "sync",
            "--manifest",
            "docs.toml",
            "--out",
            "build/routes",
        ])
        .expect("parse");

        assert_eq!(cli.project_root, Some(PathBuf::from("/site")));
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Sync { manifest, out, .. } => {
                assert_eq!(manifest, Some(PathBuf::from("docs.toml")));
                assert_eq!(out, Some(PathBuf::from("build/routes")));
            }
            _ => panic!("expected sync command"),
        }
    }

    #[test]
    fn parses_sections_json() {
        let cli = Cli::try_parse_from(["docmirror", "sections", "--json"]).expect("parse");
        assert!(matches!(cli.command, Command::Sections { json: true, .. }));
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["docmirror", "--log-format", "xml", "check"]).is_err());
    }
}
