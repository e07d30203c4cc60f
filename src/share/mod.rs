//! Sharing a generated link: clipboard, shortening, social networks.

mod clipboard;
mod shortener;
mod social;

pub use clipboard::{Clipboard, SystemClipboard};
pub use shortener::{DEFAULT_SHORTENER_ENDPOINT, ShortenError, Shortener, TinyUrl};
pub use social::{DEFAULT_SHARE_MESSAGE, SocialPlatform};

/// Open `url` in the system browser.
///
/// # Errors
///
/// Returns an error if the platform opener cannot be started.
pub fn open_external_link(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        return Ok(());
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
}
