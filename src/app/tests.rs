use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use crate::document::Document;
use crate::export::ExportFormat;
use crate::link::{FixedPassword, PasswordPrompt, ShareLink};
use crate::share::{Clipboard, ShortenError, Shortener, SocialPlatform};

use super::event_loop::{ChannelPrompt, Event, EventQueue};
use super::{App, Message, Model, ToastLevel, update};

const ORIGIN: &str = "http://localhost:5173";

/// Answers with queued results, then fails with HTTP 503.
#[derive(Default)]
struct ScriptedShortener {
    responses: Mutex<VecDeque<Result<String, ShortenError>>>,
    calls: AtomicUsize,
}

impl ScriptedShortener {
    fn new(responses: Vec<Result<String, ShortenError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        })
    }
}

impl Shortener for ScriptedShortener {
    fn shorten(&self, _link: &str) -> Result<String, ShortenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ShortenError::Status(503)))
    }
}

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl Clipboard for RecordingClipboard {
    fn copy(&self, text: &str) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::other("no clipboard"));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn noop_opener(_url: &str) -> std::io::Result<()> {
    Ok(())
}

fn failing_opener(_url: &str) -> std::io::Result<()> {
    Err(std::io::Error::other("no browser"))
}

fn create_test_app(shortener: Arc<dyn Shortener>, clipboard: RecordingClipboard) -> App {
    App::new(ORIGIN)
        .with_shortener(shortener)
        .with_clipboard(Box::new(clipboard))
        .with_link_opener(noop_opener)
}

fn create_loaded_model(text: &str) -> Model {
    let mut model = Model::new(ORIGIN);
    model.set_document(Document::from_text(text));
    model
}

/// Run one message through update and its side effects.
fn apply(
    app: &App,
    model: Model,
    msg: Message,
    queue: &EventQueue,
    prompt: &mut dyn PasswordPrompt,
) -> Model {
    let side_msg = msg.clone();
    let mut model = update(model, msg);
    app.handle_message_side_effects(&mut model, prompt, &queue.sender(), &side_msg);
    model
}

fn next_message(queue: &mut EventQueue) -> Message {
    match queue.next() {
        Some(Event::Message(msg)) => msg,
        other => panic!("expected a worker message, got {other:?}"),
    }
}

#[test]
fn test_new_model_is_empty() {
    let model = Model::new(ORIGIN);
    assert!(model.document.is_empty());
    assert!(model.share_link.is_none());
    assert!(!model.has_share_panel());
    assert!(!model.has_preview());
    assert!(!model.shortening);
    assert!(!model.invalid_link);
}

#[test]
fn test_document_loaded_derives_link_and_html() {
    let model = update(
        Model::new(ORIGIN),
        Message::DocumentLoaded(Document::from_text("# Hi")),
    );
    let link = model.share_link.as_ref().unwrap();
    assert_eq!(link.as_str(), "http://localhost:5173/?content=JTIzJTIwSGk%3D");
    assert!(model.rendered.html().contains("Hi</h1>"));
    assert!(model.has_share_panel());
    assert!(model.has_preview());
}

#[test]
fn test_load_file_reads_markdown() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# Notes\n\nbody").unwrap();

    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default());
    let queue = EventQueue::new();
    let model = apply(
        &app,
        Model::new(ORIGIN),
        Message::LoadFile(path),
        &queue,
        &mut FixedPassword::none(),
    );
    assert_eq!(model.document.source(), "# Notes\n\nbody");
    assert_eq!(model.document.file_name(), Some("notes.md"));
    assert_eq!(model.toast().unwrap().message, "Loaded notes.md");
}

#[test]
fn test_load_file_rejects_non_markdown() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "text").unwrap();

    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default());
    let queue = EventQueue::new();
    let model = apply(
        &app,
        Model::new(ORIGIN),
        Message::LoadFile(path),
        &queue,
        &mut FixedPassword::none(),
    );
    assert!(model.document.is_empty());
    assert_eq!(model.toast().unwrap().level, ToastLevel::Error);
}

#[test]
fn test_open_protected_link_with_correct_password() {
    let link = ShareLink::build(ORIGIN, "# Secret", Some("abc123")).unwrap();
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default());
    let queue = EventQueue::new();
    let mut prompt = FixedPassword::new("abc123");

    let model = apply(
        &app,
        Model::new(ORIGIN),
        Message::OpenLink(link.as_str().to_string()),
        &queue,
        &mut prompt,
    );
    assert_eq!(prompt.calls(), 1);
    assert_eq!(model.document.source(), "# Secret");
    assert!(!model.invalid_link);
    assert!(model.has_preview());
}

#[test]
fn test_open_protected_link_with_wrong_password_is_invalid() {
    let link = ShareLink::build(ORIGIN, "# Secret", Some("abc123")).unwrap();
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default());
    let queue = EventQueue::new();

    let model = apply(
        &app,
        Model::new(ORIGIN),
        Message::OpenLink(link.as_str().to_string()),
        &queue,
        &mut FixedPassword::new("wrong"),
    );
    assert!(model.invalid_link);
    assert!(model.document.is_empty());
    assert!(!model.has_share_panel());
    assert!(!model.has_preview());
}

#[test]
fn test_open_plain_link_never_prompts() {
    let link = ShareLink::build(ORIGIN, "plain", None).unwrap();
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default());
    let queue = EventQueue::new();
    let mut prompt = FixedPassword::none();

    let model = apply(
        &app,
        Model::new(ORIGIN),
        Message::OpenLink(link.as_str().to_string()),
        &queue,
        &mut prompt,
    );
    assert_eq!(prompt.calls(), 0);
    assert_eq!(model.document.source(), "plain");
}

#[test]
fn test_open_malformed_link_leaves_document_empty() {
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default());
    let queue = EventQueue::new();

    let model = apply(
        &app,
        create_loaded_model("old"),
        Message::OpenLink("?content=%%%".to_string()),
        &queue,
        &mut FixedPassword::none(),
    );
    assert!(model.document.is_empty());
    assert!(!model.invalid_link);
    assert!(model.toast().is_none());
}

#[test]
fn test_password_changes_link_and_resets_short_link() {
    let mut model = create_loaded_model("# Hi");
    model.short_link = Some("https://tinyurl.com/old".to_string());
    let plain = model.share_link.clone().unwrap();
    let generation = model.generation;

    let model = update(model, Message::SetPassword("abc123".to_string()));
    let locked = model.share_link.clone().unwrap();
    assert!(locked.is_password_protected());
    assert!(locked.as_str().ends_with(".YWJjMTIz"));
    assert_ne!(locked, plain);
    assert!(model.short_link.is_none());
    assert!(model.generation > generation);

    let model = update(model, Message::SetPasswordProtection(false));
    assert_eq!(model.share_link.as_ref(), Some(&plain));
    // The password is remembered while protection is off
    assert_eq!(model.password, "abc123");
}

#[test]
fn test_protection_without_password_keeps_plain_link() {
    let model = create_loaded_model("# Hi");
    let plain = model.share_link.clone();
    let model = update(model, Message::SetPasswordProtection(true));
    assert!(model.password_protected);
    assert_eq!(model.share_link, plain);
}

#[test]
fn test_shorten_failure_then_retry_succeeds() {
    let shortener = ScriptedShortener::new(vec![
        Err(ShortenError::Status(500)),
        Ok("https://tinyurl.com/abc".to_string()),
    ]);
    let app = create_test_app(shortener.clone(), RecordingClipboard::default());
    let mut queue = EventQueue::new();
    let mut prompt = FixedPassword::none();

    let model = apply(
        &app,
        create_loaded_model("# Hi"),
        Message::RequestShorten,
        &queue,
        &mut prompt,
    );
    assert!(model.shortening);
    let finished = next_message(&mut queue);
    let model = update(model, finished);
    assert!(!model.shortening);
    assert!(model.short_link_error);
    assert!(model.short_link.is_none());

    let model = apply(&app, model, Message::RequestShorten, &queue, &mut prompt);
    assert!(model.shortening);
    assert!(!model.short_link_error);
    let finished = next_message(&mut queue);
    let model = update(model, finished);
    assert_eq!(model.short_link.as_deref(), Some("https://tinyurl.com/abc"));
    assert!(!model.short_link_error);
    assert_eq!(model.share_target(), Some("https://tinyurl.com/abc"));
    assert_eq!(shortener.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shorten_requires_a_link() {
    let model = update(Model::new(ORIGIN), Message::RequestShorten);
    assert!(!model.shortening);
    assert_eq!(model.toast().unwrap().level, ToastLevel::Warning);
}

#[test]
fn test_shorten_is_not_repeated_once_cached() {
    let mut model = create_loaded_model("# Hi");
    model.short_link = Some("https://tinyurl.com/abc".to_string());
    let model = update(model, Message::RequestShorten);
    assert!(!model.shortening);
}

#[test]
fn test_stale_shorten_result_is_ignored() {
    let shortener = ScriptedShortener::new(vec![Ok("https://tinyurl.com/stale".to_string())]);
    let app = create_test_app(shortener, RecordingClipboard::default());
    let mut queue = EventQueue::new();
    let mut prompt = FixedPassword::none();

    let model = apply(
        &app,
        create_loaded_model("first"),
        Message::RequestShorten,
        &queue,
        &mut prompt,
    );
    let model = update(model, Message::DocumentLoaded(Document::from_text("second")));
    assert!(!model.shortening);

    let finished = next_message(&mut queue);
    let model = update(model, finished);
    assert!(model.short_link.is_none());
    assert!(!model.short_link_error);
    assert_eq!(model.document.source(), "second");
}

#[test]
fn test_delete_resets_everything() {
    let mut model = create_loaded_model("# Hi");
    model.short_link = Some("https://tinyurl.com/abc".to_string());
    model.share_menu_open = true;
    model.download_menu_open = true;

    let model = update(model, Message::Delete);
    assert!(model.document.is_empty());
    assert!(model.share_link.is_none());
    assert!(model.short_link.is_none());
    assert!(model.rendered.is_empty());
    assert!(!model.share_menu_open);
    assert!(!model.download_menu_open);
    assert!(!model.has_preview());
}

#[test]
fn test_copy_sets_flag_until_next_action() {
    let clipboard = RecordingClipboard::default();
    let app = create_test_app(ScriptedShortener::new(vec![]), clipboard.clone());
    let queue = EventQueue::new();
    let mut prompt = FixedPassword::none();

    let model = apply(
        &app,
        create_loaded_model("# Hi"),
        Message::CopyLink,
        &queue,
        &mut prompt,
    );
    assert!(model.copied);
    let link = model.share_link.as_ref().unwrap().as_str().to_string();
    assert_eq!(*clipboard.copied.lock().unwrap(), vec![link]);

    let model = update(model, Message::ToggleShareMenu);
    assert!(!model.copied);
}

#[test]
fn test_copy_failure_only_logs() {
    let clipboard = RecordingClipboard {
        fail: true,
        ..RecordingClipboard::default()
    };
    let app = create_test_app(ScriptedShortener::new(vec![]), clipboard);
    let queue = EventQueue::new();

    let model = apply(
        &app,
        create_loaded_model("# Hi"),
        Message::CopyLink,
        &queue,
        &mut FixedPassword::none(),
    );
    assert!(!model.copied);
    assert!(model.toast().is_none());
}

#[test]
fn test_copy_short_link_without_one_warns() {
    let clipboard = RecordingClipboard::default();
    let app = create_test_app(ScriptedShortener::new(vec![]), clipboard.clone());
    let queue = EventQueue::new();

    let model = apply(
        &app,
        create_loaded_model("# Hi"),
        Message::CopyShortLink,
        &queue,
        &mut FixedPassword::none(),
    );
    assert!(!model.copied);
    assert!(clipboard.copied.lock().unwrap().is_empty());
    assert_eq!(model.toast().unwrap().level, ToastLevel::Warning);
}

#[test]
fn test_share_to_uses_short_link_when_available() {
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default())
        .with_share_message("Look");
    let queue = EventQueue::new();
    let mut model = create_loaded_model("# Hi");
    model.short_link = Some("https://tinyurl.com/abc".to_string());

    let model = apply(
        &app,
        model,
        Message::ShareTo(SocialPlatform::WhatsApp),
        &queue,
        &mut FixedPassword::none(),
    );
    assert_eq!(
        model.toast().unwrap().message,
        "Opened https://wa.me/?text=Look%20https%3A%2F%2Ftinyurl.com%2Fabc"
    );
}

#[test]
fn test_share_to_prints_url_when_browser_unavailable() {
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default())
        .with_link_opener(failing_opener);
    let queue = EventQueue::new();

    let model = apply(
        &app,
        create_loaded_model("# Hi"),
        Message::ShareTo(SocialPlatform::Facebook),
        &queue,
        &mut FixedPassword::none(),
    );
    let toast = model.toast().unwrap();
    assert_eq!(toast.level, ToastLevel::Info);
    assert!(toast.message.starts_with("Share on Facebook: https://www.facebook.com/sharer/"));
}

#[test]
fn test_export_writes_file_and_closes_menu() {
    let dir = tempdir().unwrap();
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default())
        .with_out_dir(dir.path().to_path_buf());
    let queue = EventQueue::new();
    let mut model = create_loaded_model("# Hi\n\ntext");
    model.download_menu_open = true;

    let model = apply(
        &app,
        model,
        Message::Export(ExportFormat::Html),
        &queue,
        &mut FixedPassword::none(),
    );
    assert!(!model.download_menu_open);
    let html = std::fs::read_to_string(dir.path().join("document.html")).unwrap();
    assert!(html.contains("<title>Hi</title>"));
    assert_eq!(model.toast().unwrap().level, ToastLevel::Info);
}

#[test]
fn test_export_without_document_fails() {
    let dir = tempdir().unwrap();
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default())
        .with_out_dir(dir.path().to_path_buf());
    let queue = EventQueue::new();

    let model = apply(
        &app,
        Model::new(ORIGIN),
        Message::Export(ExportFormat::Markdown),
        &queue,
        &mut FixedPassword::none(),
    );
    assert_eq!(model.toast().unwrap().level, ToastLevel::Error);
    assert!(!dir.path().join("document.md").exists());
}

#[test]
fn test_quit_sets_should_quit() {
    let model = update(Model::new(ORIGIN), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_session_waits_for_shortening_after_input_ends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    std::fs::write(&path, "# Doc").unwrap();

    let shortener = ScriptedShortener::new(vec![Ok("https://tinyurl.com/doc".to_string())]);
    let app = create_test_app(shortener, RecordingClipboard::default());
    let input = Cursor::new(format!("load {}\nshorten\n", path.display()));
    let mut out = Vec::new();

    let model = app.run_with(input, &mut out).unwrap();
    assert_eq!(model.short_link.as_deref(), Some("https://tinyurl.com/doc"));
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Short link: https://tinyurl.com/doc"));
}

#[test]
fn test_session_prompts_for_password_on_next_line() {
    let link = ShareLink::build(ORIGIN, "# Secret", Some("abc123")).unwrap();
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default())
        .with_initial_message(Some(Message::OpenLink(link.as_str().to_string())));
    let mut out = Vec::new();

    let model = app
        .run_with(Cursor::new("abc123\nquit\n"), &mut out)
        .unwrap();
    assert_eq!(model.document.source(), "# Secret");
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Password: "));
}

#[test]
fn test_session_without_password_input_is_invalid() {
    let link = ShareLink::build(ORIGIN, "# Secret", Some("abc123")).unwrap();
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default())
        .with_initial_message(Some(Message::OpenLink(link.as_str().to_string())));
    let mut out = Vec::new();

    let model = app.run_with(Cursor::new(""), &mut out).unwrap();
    assert!(model.invalid_link);
    assert!(String::from_utf8(out).unwrap().contains("Invalid password"));
}

#[test]
fn test_session_reports_unknown_commands() {
    let app = create_test_app(ScriptedShortener::new(vec![]), RecordingClipboard::default());
    let mut out = Vec::new();
    app.run_with(Cursor::new("bogus\n"), &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Unknown command: bogus"));
}

#[test]
fn test_password_prompt_holds_worker_messages_until_line_arrives() {
    let mut queue = EventQueue::new();
    let sender = queue.sender();
    sender.send(Event::Message(Message::Quit)).unwrap();
    sender.send(Event::Line("abc123".to_string())).unwrap();

    let mut out = Vec::new();
    let answer = ChannelPrompt::new(&mut queue, &mut out).prompt().unwrap();
    assert_eq!(answer, "abc123");
    assert_eq!(next_message(&mut queue), Message::Quit);
}

#[test]
fn test_password_prompt_after_input_closed_fails_without_blocking() {
    let mut queue = EventQueue::new();
    queue.sender().send(Event::InputClosed).unwrap();

    let mut out = Vec::new();
    let err = ChannelPrompt::new(&mut queue, &mut out).prompt().unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    let err = ChannelPrompt::new(&mut queue, &mut out).prompt().unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    assert!(matches!(queue.next(), Some(Event::InputClosed)));
}
