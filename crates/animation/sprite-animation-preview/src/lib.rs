//! Sprite Animation Preview
//!
//! A second driver for the shared frame advancer: an inspector-style player sampled from
//! a wall clock, plus the geometry an editor pane needs to draw the current frame over a
//! checkerboard.

pub mod config;
pub mod preview;
pub mod surface;

pub use config::PreviewConfig;
pub use preview::{PreviewMode, PreviewPlayer};
pub use surface::{
    aspect_fit, CheckerTexture, PreviewContent, PreviewLayout, PreviewSurface, Rect, SpriteRegion,
};
