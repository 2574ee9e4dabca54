//! Bevy adapter for the sprite animation core.
//!
//! Add [`SpriteAnimationPlugin`], give an entity a [`SpriteAnimator`] next to its
//! `Handle<Image>`, then drive it with [`SpriteAnimationRequest`] events. Finished
//! clips come back as [`AnimationEnded`]. Animators without a `Visibility` get the
//! default one inserted, since blank-at-end clips hide the entity through it.

use bevy::prelude::*;
use sprite_animation_core::AnimationCatalog;

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{AnimationEnded, SpriteAnimationRequest, SpriteAnimator};
pub use resources::SpriteAnimationClock;

/// Everything the plugin runs each `Update`, requests first.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteAnimationSet;

pub struct SpriteAnimationPlugin;

impl Plugin for SpriteAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteAnimationClock>()
            .add_event::<SpriteAnimationRequest>()
            .add_event::<AnimationEnded>()
            .add_systems(
                Update,
                (
                    systems::insert_missing_visibility_system,
                    systems::apply_requests_system,
                    systems::tick_animators_system,
                )
                    .chain()
                    .in_set(SpriteAnimationSet),
            );
    }
}

/// Resolve a path-based catalog (as loaded from JSON) into image handles.
pub fn load_catalog(
    asset_server: &AssetServer,
    catalog: &AnimationCatalog<String>,
) -> AnimationCatalog<Handle<Image>> {
    catalog.map_frames(|path| asset_server.load(path.clone()))
}
