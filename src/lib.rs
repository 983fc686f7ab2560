//! Detail overlay for the "PMs Shipping Code" showcase: a modal that presents
//! one catalog entry at a time, with wrapping entry navigation, a slide
//! carousel for image-sequence entries, and keyboard/pointer dispatch.

pub mod config;
pub mod console;
pub mod keybindings;
pub mod models;
pub mod overlay;
pub mod render;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod ui;

pub use overlay::{OverlayController, OverlayState};
pub use render::{MediaView, PlaybackError, RenderPort};
