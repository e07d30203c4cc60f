//! Link shortening through a public HTTP endpoint.

use thiserror::Error;

/// TinyURL's plain-text creation API.
pub const DEFAULT_SHORTENER_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("shortener returned HTTP {0}")]
    Status(u16),
    #[error("shortener returned an empty response")]
    EmptyResponse,
    #[error("shortener request failed: {0}")]
    Transport(#[from] ureq::Error),
}

/// Something that turns a long link into a short one.
pub trait Shortener: Send + Sync {
    /// Shorten `link`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or answers with
    /// anything other than a non-empty success body.
    fn shorten(&self, link: &str) -> Result<String, ShortenError>;
}

/// `GET <endpoint>?url=<link>` returning the short link as the body.
#[derive(Debug, Clone)]
pub struct TinyUrl {
    endpoint: String,
}

impl TinyUrl {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for TinyUrl {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTENER_ENDPOINT)
    }
}

impl Shortener for TinyUrl {
    fn shorten(&self, link: &str) -> Result<String, ShortenError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting short link");
        let mut response = match ureq::get(self.endpoint.as_str()).query("url", link).call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(status)) => return Err(ShortenError::Status(status)),
            Err(err) => return Err(err.into()),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ShortenError::Status(status.as_u16()));
        }

        let body = response.body_mut().read_to_string()?;
        let short = body.trim();
        if short.is_empty() {
            return Err(ShortenError::EmptyResponse);
        }
        Ok(short.to_string())
    }
}
