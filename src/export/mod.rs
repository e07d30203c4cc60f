//! Downloadable copies of the current document.
//!
//! Every format is a pure function of already derived state: the raw
//! [`Document`] for markdown, the [`RenderedOutput`] for HTML and PDF.

mod html;
mod pdf;

pub use html::standalone_html;
pub use pdf::write_pdf;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::Document;
use crate::render::RenderedOutput;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: no document loaded")]
    EmptyDocument,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build PDF: {0}")]
    Pdf(String),
}

/// Output formats offered in the download menu.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[value(alias = "md")]
    Markdown,
    Html,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Markdown, Self::Html, Self::Pdf];

    /// Fixed output file name for this format.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Markdown => "document.md",
            Self::Html => "document.html",
            Self::Pdf => "document.pdf",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
            Self::Pdf => "PDF",
        })
    }
}

/// Write the document in `format` into `out_dir` and return the file path.
///
/// # Errors
///
/// Returns [`ExportError::EmptyDocument`] when nothing is loaded, or an I/O
/// or PDF error if the file cannot be produced.
pub fn export(
    format: ExportFormat,
    document: &Document,
    rendered: &RenderedOutput,
    out_dir: &Path,
) -> Result<PathBuf, ExportError> {
    if document.is_empty() {
        return Err(ExportError::EmptyDocument);
    }
    let path = out_dir.join(format.file_name());
    match format {
        ExportFormat::Markdown => write_file(&path, document.source().as_bytes())?,
        ExportFormat::Html => {
            let page = standalone_html(rendered.html(), document.title());
            write_file(&path, page.as_bytes())?;
        }
        ExportFormat::Pdf => write_pdf(rendered, &path)?,
    }
    tracing::info!(format = %format, path = %path.display(), "exported document");
    Ok(path)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use tempfile::tempdir;

    fn sample() -> (Document, RenderedOutput) {
        let doc = Document::from_text("# Notes\n\nSome **bold** text.\n");
        let rendered = render(&doc).unwrap();
        (doc, rendered)
    }

    #[test]
    fn test_markdown_export_is_verbatim() {
        let dir = tempdir().unwrap();
        let (doc, rendered) = sample();
        let path = export(ExportFormat::Markdown, &doc, &rendered, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "document.md");
        assert_eq!(std::fs::read_to_string(path).unwrap(), doc.source());
    }

    #[test]
    fn test_html_export_wraps_rendered_output() {
        let dir = tempdir().unwrap();
        let (doc, rendered) = sample();
        let path = export(ExportFormat::Html, &doc, &rendered, dir.path()).unwrap();
        let page = std::fs::read_to_string(path).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Notes</title>"));
        assert!(page.contains("<strong>bold</strong>"));
        assert!(page.contains("<style>"));
    }

    #[test]
    fn test_export_empty_document_fails() {
        let dir = tempdir().unwrap();
        let err = export(
            ExportFormat::Markdown,
            &Document::empty(),
            &RenderedOutput::default(),
            dir.path(),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::EmptyDocument));
    }

    #[test]
    fn test_export_into_missing_directory_reports_path() {
        let dir = tempdir().unwrap();
        let (doc, rendered) = sample();
        let missing = dir.path().join("nope");
        let err = export(ExportFormat::Markdown, &doc, &rendered, &missing).unwrap_err();
        assert!(err.to_string().contains("document.md"));
    }

    #[test]
    fn test_format_parse_accepts_aliases() {
        assert_eq!(ExportFormat::parse("md"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::parse("PDF"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::parse("docx"), None);
    }
}
