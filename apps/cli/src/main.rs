//! docmirror CLI: mirror external Markdown documents into a site's routes.
//!
//! Reads a document manifest, locates each source file, makes it safe for the
//! page templates, rewrites cross-document links and writes `+page.md` files.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
