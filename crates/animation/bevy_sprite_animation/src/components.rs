use bevy::prelude::*;
use sprite_animation_core::{AnimationCatalog, PlayerConfig, SpritePlayer};

/// Per-entity flip-book player. Writes the entity's `Handle<Image>` and hides the
/// entity while a blank-at-end clip is finished.
#[derive(Component, Debug)]
pub struct SpriteAnimator {
    player: SpritePlayer<Handle<Image>>,
}

impl SpriteAnimator {
    pub fn new(catalog: AnimationCatalog<Handle<Image>>) -> Self {
        Self {
            player: SpritePlayer::new(catalog),
        }
    }

    pub fn with_config(catalog: AnimationCatalog<Handle<Image>>, config: PlayerConfig) -> Self {
        Self {
            player: SpritePlayer::with_config(catalog, config),
        }
    }

    #[inline]
    pub fn player(&self) -> &SpritePlayer<Handle<Image>> {
        &self.player
    }

    /// Direct access for overrides (`set_fps`, `set_frame`, ...). Image changes made
    /// this way reach the entity on the next tick.
    #[inline]
    pub fn player_mut(&mut self) -> &mut SpritePlayer<Handle<Image>> {
        &mut self.player
    }
}

/// Playback commands, applied at the start of [`SpriteAnimationSet`](crate::SpriteAnimationSet).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SpriteAnimationRequest {
    Play {
        entity: Entity,
        name: String,
        speed: f32,
        reset: bool,
    },
    PlayOnceUninterrupted {
        entity: Entity,
        name: String,
    },
    CancelUninterrupted {
        entity: Entity,
    },
    Stop {
        entity: Entity,
    },
}

impl SpriteAnimationRequest {
    /// Play from the first frame at normal speed.
    pub fn play(entity: Entity, name: impl Into<String>) -> Self {
        Self::Play {
            entity,
            name: name.into(),
            speed: 1.0,
            reset: true,
        }
    }

    pub fn entity(&self) -> Entity {
        match self {
            Self::Play { entity, .. }
            | Self::PlayOnceUninterrupted { entity, .. }
            | Self::CancelUninterrupted { entity }
            | Self::Stop { entity } => *entity,
        }
    }
}

/// A non-looping clip on `entity` reached its end.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationEnded {
    pub entity: Entity,
    pub animation: String,
}
