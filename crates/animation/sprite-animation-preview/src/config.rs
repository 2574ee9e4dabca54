use serde::{Deserialize, Serialize};
use sprite_animation_core::AnimationError;

/// Preview surface settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// On-screen size of one checker texture repeat, in points.
    pub checker_tile_size: f32,
    /// Inset between the preview rect and the sprite.
    pub preview_padding: f32,
    /// Checker texture edge length in pixels.
    pub checker_size: u32,
    /// Checker square edge length in pixels.
    pub checker_block: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            checker_tile_size: 64.0,
            preview_padding: 1.0,
            checker_size: 16,
            checker_block: 4,
        }
    }
}

impl PreviewConfig {
    pub fn from_json(s: &str) -> Result<Self, AnimationError> {
        Ok(serde_json::from_str(s)?)
    }
}
