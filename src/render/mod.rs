//! Markdown to HTML rendering.
//!
//! This module handles:
//! - Parsing markdown with comrak (GFM extensions enabled)
//! - Delegating fenced code blocks to [`crate::highlight`]
//! - Extracting a block outline from the same parse for paged export
//!
//! Raw HTML embedded in the markdown is passed through unsanitized. The
//! document is always self-supplied, so the output is only as trustworthy as
//! its input.

mod outline;

pub use outline::{Block, BlockKind};

use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use comrak::adapters::SyntaxHighlighterAdapter;
use comrak::{Arena, Options, Plugins, format_html_with_plugins, parse_document};

use crate::document::Document;
use crate::highlight;

/// HTML and block outline derived from a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedOutput {
    html: String,
    blocks: Vec<Block>,
}

impl RenderedOutput {
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Block outline in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Render a document to HTML.
///
/// # Errors
///
/// Returns an error if the HTML formatter fails to write its output.
pub fn render(document: &Document) -> Result<RenderedOutput> {
    render_markdown(document.source())
}

/// Render markdown source to HTML.
///
/// # Example
///
/// ```
/// let out = mdshare::render::render_markdown("# Hello").unwrap();
/// assert!(out.html().contains("Hello</h1>"));
/// ```
///
/// # Errors
///
/// Returns an error if the HTML formatter fails to write its output.
pub fn render_markdown(source: &str) -> Result<RenderedOutput> {
    if source.is_empty() {
        return Ok(RenderedOutput::default());
    }

    let arena = Arena::new();
    let mut options = Options::default();
    configure_options(&mut options);
    let root = parse_document(&arena, source, &options);

    let adapter = SyntectAdapter;
    let mut plugins = Plugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);

    let mut out = Vec::with_capacity(source.len() * 2);
    format_html_with_plugins(root, &options, &mut out, &plugins)
        .context("Failed to format HTML")?;
    let html = String::from_utf8(out).context("Rendered HTML is not UTF-8")?;

    let blocks = outline::collect(root);
    tracing::debug!(bytes = html.len(), blocks = blocks.len(), "rendered document");

    Ok(RenderedOutput { html, blocks })
}

fn configure_options(options: &mut Options) {
    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.shortcodes = true;

    options.extension.header_ids = Some(String::new());

    // Inline HTML is emitted as written
    options.render.unsafe_ = true;
}

/// Routes comrak's code fences through syntect.
struct SyntectAdapter;

impl SyntaxHighlighterAdapter for SyntectAdapter {
    fn write_highlighted(
        &self,
        output: &mut dyn Write,
        lang: Option<&str>,
        code: &str,
    ) -> io::Result<()> {
        output.write_all(highlight::highlight_html(lang, code).as_bytes())
    }

    fn write_pre_tag(
        &self,
        output: &mut dyn Write,
        _attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        write!(
            output,
            "<pre class=\"hljs\" style=\"background-color:{};color:{}\">",
            highlight::background_css(),
            highlight::foreground_css()
        )
    }

    fn write_code_tag(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        let class = attributes.get("class").map(String::as_str).unwrap_or("");
        let lang = class.strip_prefix("language-");
        if class.is_empty() {
            return output.write_all(b"<code class=\"hljs\">");
        }
        write!(output, "<code class=\"hljs {}\"", highlight::escape_html(class))?;
        if let Some(name) = highlight::language_name(lang) {
            write!(output, " data-language=\"{}\"", highlight::escape_html(name))?;
        }
        output.write_all(b">")
    }
}
