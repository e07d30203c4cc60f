//! Clipboard access for copying links.

use std::io::{Write, stderr};

use base64::Engine;

/// Destination for "copy" actions.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform clipboard cannot be written.
    fn copy(&self, text: &str) -> std::io::Result<()>;
}

/// The platform clipboard: `pbcopy` on macOS, an OSC 52 escape sequence
/// everywhere else (understood by most terminals, including over SSH).
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> std::io::Result<()> {
        #[cfg(target_os = "macos")]
        {
            if copy_to_pbcopy(text).is_ok() {
                return Ok(());
            }
        }
        copy_to_clipboard_osc52(text)
    }
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

/// The sequence goes to stderr so stdout keeps carrying links only.
fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    write_osc52(&mut stderr().lock(), text)
}

fn write_osc52(out: &mut dyn Write, text: &str) -> std::io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
