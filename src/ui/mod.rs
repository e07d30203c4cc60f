//! Text UI for the share session.
//!
//! The view is a pure function of the [`Model`](crate::app::Model):
//! - [`render`]: the upload prompt, share, download and preview panels
//! - [`overlays`]: the help listing
//! - [`status`]: header and toast lines

mod overlays;
mod render;
mod status;

pub use render::view;

/// Width of the rule drawn under panel titles.
pub const PANEL_WIDTH: usize = 60;
