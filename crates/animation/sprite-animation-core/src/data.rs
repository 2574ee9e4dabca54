//! Animation definition model.
//!
//! A definition is owned by the host (asset, editor document, fixture) and is read-only
//! to playback. `H` is whatever the host uses to name an image: an asset path in JSON
//! fixtures, a texture handle inside an engine.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// An ordered flip-book of frames and the rules for playing it.
///
/// Serialized as `{ name, frames, fps, looping, pingPong, blankFrameAtEnd }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDefinition<H = String> {
    /// Unique key used by the catalog.
    pub name: String,
    /// Frame images in display order. May be empty; an empty clip is never shown.
    #[serde(default = "Vec::new")]
    pub frames: Vec<H>,
    /// Base frames per second. 0 holds the current frame.
    #[serde(default)]
    pub fps: u32,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub ping_pong: bool,
    /// Show nothing once a non-looping clip has played through.
    #[serde(default, alias = "showBlankFrameAtTheEnd")]
    pub blank_frame_at_end: bool,
}

impl<H> AnimationDefinition<H> {
    /// Non-looping, forward-only clip.
    pub fn new(name: impl Into<String>, frames: Vec<H>, fps: u32) -> Self {
        Self {
            name: name.into(),
            frames,
            fps,
            looping: false,
            ping_pong: false,
            blank_frame_at_end: false,
        }
    }

    #[inline]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    #[inline]
    pub fn with_ping_pong(mut self, ping_pong: bool) -> Self {
        self.ping_pong = ping_pong;
        self
    }

    #[inline]
    pub fn with_blank_frame_at_end(mut self, blank: bool) -> Self {
        self.blank_frame_at_end = blank;
        self
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Image at `index`, wrapped into range the same way playback wraps a scrubbed index.
    #[inline]
    pub fn frame(&self, index: usize) -> Option<&H> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.get(index % self.frames.len())
    }

    /// Same clip with every frame converted, e.g. asset paths to loaded handles.
    pub fn map_frames<U>(&self, f: impl FnMut(&H) -> U) -> AnimationDefinition<U> {
        AnimationDefinition {
            name: self.name.clone(),
            frames: self.frames.iter().map(f).collect(),
            fps: self.fps,
            looping: self.looping,
            ping_pong: self.ping_pong,
            blank_frame_at_end: self.blank_frame_at_end,
        }
    }

    /// Check the invariants the catalog relies on.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.name.trim().is_empty() {
            return Err(AnimationError::InvalidDefinition {
                name: self.name.clone(),
                reason: "name must not be empty".into(),
            });
        }
        Ok(())
    }
}
