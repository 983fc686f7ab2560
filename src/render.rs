//! Render port the overlay controller draws through.
//!
//! Any host (console, GTK, a test recorder) implements [`RenderPort`]. The
//! controller only decides what should be shown; the port decides how.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Badge;

/// What the media area of the overlay should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaView<'a> {
    /// Nothing loaded; the player source is cleared
    Empty,
    /// A single video player loaded with `src`
    Video { src: &'a str },
    /// A slide sequence showing `images[active]`
    Slides { images: &'a [String], active: usize },
}

/// Reasons the host refused to start playback. All of them are non-fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playback blocked by host: {0}")]
    Blocked(String),
    #[error("media source not found: {0:?}")]
    MissingSource(PathBuf),
    #[error("no media loaded")]
    NoMedia,
}

pub trait RenderPort {
    fn set_title(&mut self, title: &str);
    fn set_status(&mut self, status: &str);
    fn set_description(&mut self, description: &str);
    fn set_attribution(&mut self, attribution: &str);
    fn set_badges(&mut self, badges: &[Badge]);
    fn set_media(&mut self, media: MediaView<'_>);
    /// Position indicator; `count == 0` means no indicator.
    fn set_slide_position(&mut self, active: usize, count: usize);
    fn set_visible(&mut self, visible: bool);

    /// Suspend or restore background page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Request playback of the loaded video. The result is inspected once and
    /// never awaited.
    fn play(&mut self) -> Result<(), PlaybackError>;
    /// Stop playback and release the loaded source.
    fn stop_media(&mut self);
}
