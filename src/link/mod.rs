//! Share link encoding and decoding.
//!
//! A share link carries the whole document in one query parameter:
//!
//! ```text
//! <origin>?content=<base64(percent_encode(text))>[.<base64(password)>]
//! ```
//!
//! The optional password segment is a plaintext gate. It travels in the same
//! link in reversible encoding and only keeps honest viewers out.

mod prompt;

pub use prompt::{FixedPassword, PasswordPrompt, StdinPrompt};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use url::Url;

/// Query parameter that carries the payload.
pub const CONTENT_PARAM: &str = "content";

/// Separates the content segment from the password segment.
///
/// `.` is outside the standard base64 alphabet, so it never occurs inside a
/// well-formed segment.
pub const PASSWORD_SEPARATOR: char = '.';

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid origin {origin:?}: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
    #[error("link has no `content` parameter")]
    MissingContent,
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("password does not match")]
    PasswordMismatch,
    #[error("failed to read password: {0}")]
    Prompt(#[from] std::io::Error),
}

impl LinkError {
    /// Whether the failure means access was refused rather than the link
    /// being unreadable.
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::PasswordMismatch | Self::Prompt(_))
    }
}

/// Encode document text (and an optional password) into a link payload.
pub fn encode_payload(text: &str, password: Option<&str>) -> String {
    let mut payload = STANDARD.encode(encode_uri_component(text).as_bytes());
    if let Some(password) = password {
        payload.push(PASSWORD_SEPARATOR);
        payload.push_str(&STANDARD.encode(password.as_bytes()));
    }
    payload
}

/// Percent-encode like a browser's `encodeURIComponent`, which leaves
/// `!'()*` unescaped where `urlencoding` escapes them.
fn encode_uri_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// A shareable URL for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    url: String,
    password_protected: bool,
}

impl ShareLink {
    /// Compose `origin` with a single `content` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidOrigin`] if `origin` is not an absolute URL.
    pub fn build(origin: &str, text: &str, password: Option<&str>) -> Result<Self, LinkError> {
        let mut url = Url::parse(origin).map_err(|source| LinkError::InvalidOrigin {
            origin: origin.to_string(),
            source,
        })?;
        url.set_fragment(None);
        url.query_pairs_mut()
            .clear()
            .append_pair(CONTENT_PARAM, &encode_payload(text, password));
        Ok(Self {
            url: url.into(),
            password_protected: password.is_some(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub const fn is_password_protected(&self) -> bool {
        self.password_protected
    }
}

impl std::fmt::Display for ShareLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// A payload split into its content and (decoded) password segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    content: String,
    password: Option<String>,
}

impl SharePayload {
    /// Split a raw payload on the password separator.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Malformed`] if the payload has more than one
    /// separator or the password segment does not decode.
    pub fn parse(raw: &str) -> Result<Self, LinkError> {
        // Query parsers turn an unescaped `+` into a space; base64 never
        // contains spaces, so map them back before trimming.
        let raw = raw.replace(' ', "+");
        let raw = raw.trim_matches(|c: char| matches!(c, '\r' | '\n' | '\t'));
        let (content, password) = match raw.split_once(PASSWORD_SEPARATOR) {
            Some((_, rest)) if rest.contains(PASSWORD_SEPARATOR) => {
                return Err(LinkError::Malformed(
                    "more than one password separator".to_string(),
                ));
            }
            Some((content, password)) => (content, Some(decode_segment(password)?)),
            None => (raw, None),
        };
        Ok(Self {
            content: content.to_string(),
            password,
        })
    }

    pub const fn is_password_protected(&self) -> bool {
        self.password.is_some()
    }

    /// Check `supplied` against the embedded password and decode the text.
    ///
    /// A payload without a password ignores `supplied`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::PasswordMismatch`] on a wrong or missing password,
    /// or [`LinkError::Malformed`] if the content segment does not decode.
    pub fn unlock(&self, supplied: Option<&str>) -> Result<String, LinkError> {
        if let Some(expected) = &self.password {
            if supplied != Some(expected.as_str()) {
                return Err(LinkError::PasswordMismatch);
            }
        }
        self.decode_content()
    }

    fn decode_content(&self) -> Result<String, LinkError> {
        let encoded = decode_segment(&self.content)?;
        urlencoding::decode(&encoded)
            .map(std::borrow::Cow::into_owned)
            .map_err(|err| LinkError::Malformed(format!("percent decoding failed: {err}")))
    }
}

fn decode_segment(segment: &str) -> Result<String, LinkError> {
    let bytes = STANDARD
        .decode(segment)
        .map_err(|err| LinkError::Malformed(format!("base64 decoding failed: {err}")))?;
    String::from_utf8(bytes).map_err(|err| LinkError::Malformed(format!("not UTF-8: {err}")))
}

/// Pull the raw payload out of user input.
///
/// Accepts a full URL, a bare query string (`?content=...`) or the payload
/// itself.
///
/// # Errors
///
/// Returns [`LinkError::MissingContent`] if a URL or query string has no
/// `content` parameter.
pub fn extract_payload(input: &str) -> Result<String, LinkError> {
    let input = input.trim();
    let pairs = if let Ok(url) = Url::parse(input) {
        url.query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect::<Vec<_>>()
    } else if let Some(query) = input.strip_prefix('?') {
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    } else {
        return Ok(input.to_string());
    };

    pairs
        .into_iter()
        .find_map(|(key, value)| (key == CONTENT_PARAM).then_some(value))
        .ok_or(LinkError::MissingContent)
}

/// Decode a share link back into document text.
///
/// Prompts through `prompt` only when the link is password protected.
///
/// # Errors
///
/// See [`LinkError`]. Callers treat [`LinkError::is_access_denied`] failures
/// as an invalid link and everything else as an unreadable one.
pub fn decode_link(input: &str, prompt: &mut dyn PasswordPrompt) -> Result<String, LinkError> {
    let payload = SharePayload::parse(&extract_payload(input)?)?;
    if !payload.is_password_protected() {
        return payload.unlock(None);
    }
    let supplied = prompt.prompt()?;
    payload.unlock(Some(supplied.as_str()))
}
