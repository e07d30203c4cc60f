use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::app::event_loop::Event;
use crate::app::{App, Message, Model, ToastLevel};
use crate::document::Document;
use crate::export;
use crate::link::{self, PasswordPrompt};

impl App {
    pub(super) fn handle_message_side_effects(
        &self,
        model: &mut Model,
        prompt: &mut dyn PasswordPrompt,
        events: &Sender<Event>,
        msg: &Message,
    ) {
        match msg {
            Message::LoadFile(path) => match Document::load(path) {
                Ok(document) => {
                    let name = document.file_name().unwrap_or("document").to_string();
                    model.set_document(document);
                    model.show_toast(ToastLevel::Info, format!("Loaded {name}"));
                }
                Err(err) => {
                    tracing::error!(path = %path.display(), "{err:#}");
                    model.show_toast(ToastLevel::Error, format!("Load failed: {err:#}"));
                }
            },
            Message::OpenLink(input) => Self::open_link(model, prompt, input),
            Message::RequestShorten => self.dispatch_shorten(model, events),
            Message::CopyLink => {
                let link = model.share_link.as_ref().map(|l| l.as_str().to_string());
                self.copy_link(model, link.as_deref());
            }
            Message::CopyShortLink => {
                let link = model.short_link.clone();
                self.copy_link(model, link.as_deref());
            }
            Message::ShareTo(platform) => {
                let Some(target) = model.share_target() else {
                    model.show_toast(ToastLevel::Warning, "Nothing to share");
                    return;
                };
                let url = platform.share_url(&self.share_message, target);
                match (self.link_opener)(&url) {
                    Ok(()) => model.show_toast(ToastLevel::Info, format!("Opened {url}")),
                    Err(err) => {
                        tracing::warn!(%err, %url, "failed to open share page");
                        model.show_toast(ToastLevel::Info, format!("Share on {platform}: {url}"));
                    }
                }
            }
            Message::Export(format) => {
                match export::export(*format, &model.document, &model.rendered, &self.out_dir) {
                    Ok(path) => {
                        model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
                    }
                    Err(err) => {
                        tracing::error!(%err, format = %format, "export failed");
                        model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                    }
                }
            }
            _ => {}
        }
    }

    fn open_link(model: &mut Model, prompt: &mut dyn PasswordPrompt, input: &str) {
        match link::decode_link(input, prompt) {
            Ok(text) => model.set_document(Document::from_text(text)),
            Err(err) if err.is_access_denied() => {
                tracing::warn!(%err, "rejected protected link");
                model.mark_invalid();
            }
            Err(err) => {
                tracing::error!(%err, "failed to decode content");
                model.set_document(Document::empty());
            }
        }
    }

    fn dispatch_shorten(&self, model: &mut Model, events: &Sender<Event>) {
        if !model.shortening || model.shorten_ticket.is_some() {
            return;
        }
        let Some(link) = model.share_link.as_ref().map(|l| l.as_str().to_string()) else {
            return;
        };
        let generation = model.generation;
        model.shorten_ticket = Some(generation);

        let shortener = Arc::clone(&self.shortener);
        let events = events.clone();
        thread::spawn(move || {
            let result = shortener.shorten(&link).map_err(|err| err.to_string());
            // The receiver is gone once the session has ended.
            let _ = events.send(Event::Message(Message::ShortenFinished { generation, result }));
        });
    }

    fn copy_link(&self, model: &mut Model, link: Option<&str>) {
        let Some(link) = link else {
            model.show_toast(ToastLevel::Warning, "No link to copy");
            return;
        };
        match self.clipboard.copy(link) {
            Ok(()) => model.copied = true,
            Err(err) => tracing::warn!(%err, "failed to copy link"),
        }
    }
}
