//! Text transformation for mirrored Markdown documents.
//!
//! Raw source text is made safe for the site's page templates in two passes:
//! 1. [`neutralize_markup`] escapes bare `<` characters outside fenced code
//! 2. [`rewrite_cross_links`] turns `./sibling.md` links into `/docs/<id>` routes
//!
//! [`render_page`] runs both passes and prepends the page metadata block.

mod escape;
mod links;

use tracing::{debug, instrument};

pub use escape::neutralize_markup;
pub use links::{DOCS_ROUTE_PREFIX, LinkTable, rewrite_cross_links, route_for};

/// Transform raw source text into a page body.
pub fn transform(text: &str, links: &LinkTable) -> String {
    let body = neutralize_markup(text);
    links.rewrite(&body)
}

/// Render the complete page artifact: metadata block, blank line, body.
#[instrument(skip(text, links), fields(len = text.len()))]
pub fn render_page(title: &str, text: &str, links: &LinkTable) -> String {
    let body = transform(text, links);
    let page = format!("{}\n{body}", build_frontmatter(title));
    debug!(final_len = page.len(), "page rendered");
    page
}

/// Build the YAML frontmatter block for a page.
///
/// The title goes in verbatim; titles must not contain `"`.
pub fn build_frontmatter(title: &str) -> String {
    format!("---\ntitle: \"{title}\"\n---\n")
}
