//! Markdown document loading.
//!
//! This module handles:
//! - Restricting input to markdown files
//! - Reading file content as text (lossy UTF-8, like a browser text read)
//! - Holding the raw source that every other component derives from

mod types;

pub use types::Document;

use std::path::Path;

use anyhow::{Context, Result, bail};

/// File extensions accepted by the loader.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Returns true if the file extension is a recognized markdown format.
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

impl Document {
    /// Read a markdown file into a document.
    ///
    /// No size or encoding validation is done: invalid UTF-8 sequences are
    /// replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not have a markdown extension or
    /// cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !is_markdown_file(path) {
            bail!("Not a markdown file: {}", path.display());
        }
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let source = String::from_utf8_lossy(&bytes).into_owned();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document");
        Ok(Self::new(source, file_name))
    }
}
