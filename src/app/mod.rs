//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Line-driven session loop

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use input::parse_command;
pub use model::{Model, Toast, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DEFAULT_ORIGIN;
use crate::share::{
    Clipboard, DEFAULT_SHARE_MESSAGE, Shortener, SystemClipboard, TinyUrl, open_external_link,
};

/// Opens a URL outside the application (the system browser by default).
pub type LinkOpener = fn(&str) -> std::io::Result<()>;

/// Main application struct that owns the collaborators and runs the session.
pub struct App {
    origin: String,
    out_dir: PathBuf,
    share_message: String,
    shortener: Arc<dyn Shortener>,
    clipboard: Box<dyn Clipboard>,
    link_opener: LinkOpener,
    initial: Option<Message>,
}

impl App {
    /// Create an application producing links under `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            out_dir: PathBuf::from("."),
            share_message: DEFAULT_SHARE_MESSAGE.to_string(),
            shortener: Arc::new(TinyUrl::default()),
            clipboard: Box::new(SystemClipboard),
            link_opener: open_external_link,
            initial: None,
        }
    }

    /// Directory exports are written to.
    pub fn with_out_dir(mut self, dir: PathBuf) -> Self {
        self.out_dir = dir;
        self
    }

    /// Message placed in front of the link on social networks.
    pub fn with_share_message(mut self, message: impl Into<String>) -> Self {
        self.share_message = message.into();
        self
    }

    pub fn with_shortener(mut self, shortener: Arc<dyn Shortener>) -> Self {
        self.shortener = shortener;
        self
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.link_opener = opener;
        self
    }

    /// Message dispatched before the first command is read, typically
    /// [`Message::LoadFile`] or [`Message::OpenLink`].
    pub fn with_initial_message(mut self, msg: Option<Message>) -> Self {
        self.initial = msg;
        self
    }

    /// A fresh model carrying this application's settings.
    pub fn initial_model(&self) -> Model {
        Model::new(self.origin.clone())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

#[cfg(test)]
mod tests;
