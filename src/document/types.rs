//! Core document type.

/// The raw markdown text currently loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Original source text
    source: String,
    /// Name of the file the text was read from, if any
    file_name: Option<String>,
}

impl Document {
    /// Create a document from source text and an optional file name.
    pub const fn new(source: String, file_name: Option<String>) -> Self {
        Self { source, file_name }
    }

    /// Create an empty document.
    pub const fn empty() -> Self {
        Self {
            source: String::new(),
            file_name: None,
        }
    }

    /// Create a document from text that did not come from a file.
    pub fn from_text(source: impl Into<String>) -> Self {
        Self::new(source.into(), None)
    }

    /// Get the original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// An empty document is treated as "nothing loaded".
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Text of the first ATX heading, used as a page title.
    pub fn title(&self) -> Option<&str> {
        self.source.lines().find_map(|line| {
            let trimmed = line.trim_start();
            let rest = trimmed.trim_start_matches('#');
            let level = trimmed.len() - rest.len();
            if (1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' ')) {
                let text = rest.trim().trim_end_matches('#').trim();
                (!text.is_empty()).then_some(text)
            } else {
                None
            }
        })
    }
}
