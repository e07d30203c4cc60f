use std::path::PathBuf;

use crate::app::Message;
use crate::export::ExportFormat;
use crate::share::SocialPlatform;

/// Translate one session command line into a message.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns a user-facing message for unknown commands or missing arguments.
pub fn parse_command(line: &str) -> Result<Option<Message>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let msg = match command.to_ascii_lowercase().as_str() {
        "load" | "upload" => Message::LoadFile(PathBuf::from(required(rest, "load <file.md>")?)),
        "open" => Message::OpenLink(required(rest, "open <link>")?.to_string()),
        "share" | "menu" => Message::ToggleShareMenu,
        "downloads" | "download" => Message::ToggleDownloadMenu,
        "lock" if rest.is_empty() => Message::SetPasswordProtection(true),
        "lock" | "password" => Message::SetPassword(rest.to_string()),
        "unlock" => Message::SetPasswordProtection(false),
        "shorten" => Message::RequestShorten,
        "copy" => Message::CopyLink,
        "copy-short" => Message::CopyShortLink,
        "social" => {
            let name = required(rest, "social <twitter|linkedin|facebook|whatsapp>")?;
            Message::ShareTo(
                SocialPlatform::parse(name).ok_or_else(|| format!("Unknown platform: {name}"))?,
            )
        }
        "export" => {
            let name = required(rest, "export <md|html|pdf>")?;
            Message::Export(
                ExportFormat::parse(name).ok_or_else(|| format!("Unknown format: {name}"))?,
            )
        }
        "preview" => Message::TogglePreview,
        "delete" | "clear" => Message::Delete,
        "help" | "?" => Message::ToggleHelp,
        "quit" | "exit" | "q" => Message::Quit,
        other => return Err(format!("Unknown command: {other} (type `help`)")),
    };
    Ok(Some(msg))
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(arg)
    }
}
