use bevy::prelude::*;

/// Global clock for every [`SpriteAnimator`](crate::SpriteAnimator).
#[derive(Resource, Debug, Clone)]
pub struct SpriteAnimationClock {
    /// Multiplier on `Time::delta_seconds`.
    pub time_scale: f32,
    /// Skip ticking entirely. Requests are still applied.
    pub paused: bool,
}

impl Default for SpriteAnimationClock {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            paused: false,
        }
    }
}
