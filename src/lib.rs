// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. link::LinkError)
    clippy::module_name_repetitions
)]

//! # mdshare
//!
//! Share markdown documents through links that carry the document itself.
//!
//! mdshare loads a markdown file and:
//! - Renders it to HTML with syntax-highlighted code blocks
//! - Encodes it into a `?content=` link, optionally password gated
//! - Shortens links through a public shortener
//! - Exports it as markdown, standalone HTML, or PDF
//!
//! The password travels inside the link in reversible base64. It keeps
//! casual readers out, nothing more.
//!
//! ## Architecture
//!
//! The interactive session uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Commands and background completions
//! - **Update**: Pure state transitions
//! - **View**: Render to text
//!
//! ## Modules
//!
//! - [`app`]: Session loop and state
//! - [`config`]: Saved defaults
//! - [`document`]: Loading markdown
//! - [`render`]: Markdown to HTML
//! - [`highlight`]: Syntax highlighting
//! - [`link`]: Share link encoding and decoding
//! - [`export`]: File exports
//! - [`share`]: Clipboard, shortener and social links
//! - [`ui`]: Text view of the session

pub mod app;
pub mod config;
pub mod document;
pub mod export;
pub mod highlight;
pub mod link;
pub mod render;
pub mod share;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::export::ExportFormat;
    pub use crate::link::{ShareLink, decode_link};
    pub use crate::render::{RenderedOutput, render};
}
