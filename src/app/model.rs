use crate::config::DEFAULT_ORIGIN;
use crate::document::Document;
use crate::link::ShareLink;
use crate::render::{self, RenderedOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The boolean flags
/// are independent of each other.
#[derive(Debug, Clone)]
pub struct Model {
    /// The loaded markdown document (empty when nothing is loaded)
    pub document: Document,
    /// HTML derived from `document`
    pub rendered: RenderedOutput,
    /// Link derived from `document` and the password settings
    pub share_link: Option<ShareLink>,
    /// Cached result of the last successful shortening
    pub short_link: Option<String>,
    /// Last shortening request failed
    pub short_link_error: bool,
    /// A shortening request is in flight
    pub shortening: bool,
    /// Generation the in-flight request was dispatched for
    pub(super) shorten_ticket: Option<u64>,
    /// Whether social share links are listed
    pub share_menu_open: bool,
    /// Whether export formats are listed
    pub download_menu_open: bool,
    /// Whether generated links carry the password segment
    pub password_protected: bool,
    pub password: String,
    /// Set after a successful copy, cleared by the next action
    pub copied: bool,
    /// A protected link was opened with the wrong password
    pub invalid_link: bool,
    /// Whether the full HTML is printed under the preview panel
    pub preview_visible: bool,
    pub help_visible: bool,
    /// Base URL of generated links
    pub origin: String,
    /// Bumped whenever the share link changes
    pub generation: u64,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl Model {
    /// Create an empty model producing links under `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            document: Document::empty(),
            rendered: RenderedOutput::default(),
            share_link: None,
            short_link: None,
            short_link_error: false,
            shortening: false,
            shorten_ticket: None,
            share_menu_open: false,
            download_menu_open: false,
            password_protected: false,
            password: String::new(),
            copied: false,
            invalid_link: false,
            preview_visible: false,
            help_visible: false,
            origin: origin.into(),
            generation: 0,
            toast: None,
            should_quit: false,
        }
    }

    /// Replace the document and recompute everything derived from it.
    pub fn set_document(&mut self, document: Document) {
        self.document = document;
        self.invalid_link = false;
        self.refresh_rendered();
        self.refresh_link();
    }

    /// Drop the document and all derived state (the "delete" action).
    pub fn clear_document(&mut self) {
        self.set_document(Document::empty());
        self.share_menu_open = false;
        self.download_menu_open = false;
        self.preview_visible = false;
    }

    /// A protected link was opened with the wrong password: nothing is shown
    /// except the invalid banner.
    pub fn mark_invalid(&mut self) {
        self.set_document(Document::empty());
        self.invalid_link = true;
    }

    /// Password to embed in links, if protection is on and one is set.
    pub fn active_password(&self) -> Option<&str> {
        (self.password_protected && !self.password.is_empty()).then_some(self.password.as_str())
    }

    /// Link offered for sharing: the short one when available.
    pub fn share_target(&self) -> Option<&str> {
        self.short_link
            .as_deref()
            .or_else(|| self.share_link.as_ref().map(ShareLink::as_str))
    }

    pub const fn has_share_panel(&self) -> bool {
        self.share_link.is_some()
    }

    pub fn has_preview(&self) -> bool {
        !self.invalid_link && !self.rendered.is_empty()
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
        });
    }

    pub const fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub const fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    fn refresh_rendered(&mut self) {
        self.rendered = match render::render(&self.document) {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::error!(%err, "failed to render document");
                self.show_toast(ToastLevel::Error, format!("Render failed: {err}"));
                RenderedOutput::default()
            }
        };
    }

    /// Rebuild the share link; a changed link invalidates the short link and
    /// any shortening still in flight.
    pub(super) fn refresh_link(&mut self) {
        let link = if self.document.is_empty() {
            None
        } else {
            match ShareLink::build(&self.origin, self.document.source(), self.active_password()) {
                Ok(link) => Some(link),
                Err(err) => {
                    tracing::error!(%err, "failed to build share link");
                    self.show_toast(ToastLevel::Error, format!("Link failed: {err}"));
                    None
                }
            }
        };
        if link == self.share_link {
            return;
        }
        self.share_link = link;
        self.generation += 1;
        self.short_link = None;
        self.short_link_error = false;
        self.shortening = false;
        self.shorten_ticket = None;
        self.copied = false;
    }
}
