//! Player configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for a [`SpritePlayer`](crate::SpritePlayer).
/// Defaults reproduce the unbounded catch-up behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Cap on discrete frame steps per tick. `None` fast-forwards through any gap.
    pub max_catch_up_steps: Option<u32>,

    /// Maximum undrained events kept before the oldest are dropped.
    pub max_queued_events: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_catch_up_steps: None,
            max_queued_events: 1024,
        }
    }
}

impl PlayerConfig {
    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, crate::AnimationError> {
        Ok(serde_json::from_str(s)?)
    }
}
