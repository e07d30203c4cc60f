use std::path::PathBuf;

use crate::app::{Model, ToastLevel};
use crate::document::Document;
use crate::export::ExportFormat;
use crate::share::SocialPlatform;

/// All possible events and actions in the application.
///
/// These represent user commands, background completions, and internal
/// actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Loading
    /// Load a markdown file from disk
    LoadFile(PathBuf),
    /// Decode a share link (prompting for its password when needed)
    OpenLink(String),
    /// Replace the current document
    DocumentLoaded(Document),
    /// Drop the document and everything derived from it
    Delete,

    // Panels
    /// Toggle the social share menu
    ToggleShareMenu,
    /// Toggle the export format menu
    ToggleDownloadMenu,
    /// Toggle printing the full HTML preview
    TogglePreview,
    /// Toggle help overlay
    ToggleHelp,

    // Password
    /// Turn password protection on or off
    SetPasswordProtection(bool),
    /// Set the password and turn protection on
    SetPassword(String),

    // Sharing
    /// Copy the long link
    CopyLink,
    /// Copy the short link
    CopyShortLink,
    /// Ask the shortener for a short link
    RequestShorten,
    /// A shortening request finished
    ShortenFinished {
        generation: u64,
        result: Result<String, String>,
    },
    /// Open a social network's share page
    ShareTo(SocialPlatform),

    // Export
    /// Write the document in the given format
    Export(ExportFormat),

    // Application
    /// Quit
    Quit,
}

/// Pure function that computes the next state.
///
/// Anything touching the outside world (files, prompts, clipboard, network,
/// browser) happens in the side-effect pass that runs after this.
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::CopyLink | Message::CopyShortLink) {
        model.copied = false;
    }

    match msg {
        Message::LoadFile(_)
        | Message::OpenLink(_)
        | Message::CopyLink
        | Message::CopyShortLink
        | Message::ShareTo(_) => {}

        Message::DocumentLoaded(document) => model.set_document(document),
        Message::Delete => {
            model.clear_document();
            model.show_toast(ToastLevel::Info, "Document deleted");
        }

        Message::ToggleShareMenu => model.share_menu_open = !model.share_menu_open,
        Message::ToggleDownloadMenu => model.download_menu_open = !model.download_menu_open,
        Message::TogglePreview => model.preview_visible = !model.preview_visible,
        Message::ToggleHelp => model.help_visible = !model.help_visible,

        Message::SetPasswordProtection(enabled) => {
            model.password_protected = enabled;
            model.refresh_link();
        }
        Message::SetPassword(password) => {
            model.password = password;
            model.password_protected = true;
            model.refresh_link();
        }

        Message::RequestShorten => request_shorten(&mut model),
        Message::ShortenFinished { generation, result } => {
            finish_shorten(&mut model, generation, result);
        }

        Message::Export(_) => model.download_menu_open = false,

        Message::Quit => model.should_quit = true,
    }

    model
}

fn request_shorten(model: &mut Model) {
    if model.share_link.is_none() {
        model.show_toast(ToastLevel::Warning, "Nothing to shorten");
    } else if model.shortening {
        tracing::debug!("shortening already in flight");
    } else if model.short_link.is_some() {
        model.show_toast(ToastLevel::Info, "Short link already generated");
    } else {
        model.shortening = true;
        model.short_link_error = false;
    }
}

fn finish_shorten(model: &mut Model, generation: u64, result: Result<String, String>) {
    if generation != model.generation || model.shorten_ticket != Some(generation) {
        tracing::debug!(
            generation,
            current = model.generation,
            "dropping stale shortening result"
        );
        return;
    }
    model.shortening = false;
    model.shorten_ticket = None;
    match result {
        Ok(short) => {
            model.short_link = Some(short);
            model.short_link_error = false;
        }
        Err(err) => {
            tracing::warn!(%err, "failed to shorten link");
            model.short_link_error = true;
            model.show_toast(ToastLevel::Error, "Failed to generate short link");
        }
    }
}
