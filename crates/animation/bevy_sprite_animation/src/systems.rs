use bevy::prelude::*;
use sprite_animation_core::RenderSink;

use crate::components::{AnimationEnded, SpriteAnimationRequest, SpriteAnimator};
use crate::resources::SpriteAnimationClock;

/// Render sink over one entity's image and visibility components.
///
/// Components are only written when the value actually changes, so change detection
/// on `Handle<Image>` fires once per displayed frame.
struct EntitySink<'w> {
    image: Mut<'w, Handle<Image>>,
    visibility: Mut<'w, Visibility>,
}

impl EntitySink<'_> {
    fn set_visibility(&mut self, visibility: Visibility) {
        if *self.visibility != visibility {
            *self.visibility = visibility;
        }
    }
}

impl RenderSink<Handle<Image>> for EntitySink<'_> {
    fn set_displayed_image(&mut self, image: Option<&Handle<Image>>) {
        match image {
            Some(handle) => {
                if *self.image != *handle {
                    *self.image = handle.clone();
                }
                if *self.visibility == Visibility::Hidden {
                    self.set_visibility(Visibility::Inherited);
                }
            }
            None => self.set_visibility(Visibility::Hidden),
        }
    }
}

/// Give animators a `Visibility` so a blank frame can hide them.
pub fn insert_missing_visibility_system(
    mut commands: Commands,
    animators: Query<Entity, (With<SpriteAnimator>, Without<Visibility>)>,
) {
    for entity in &animators {
        debug!("inserting Visibility on sprite animator {entity:?}");
        commands.entity(entity).insert(Visibility::default());
    }
}

pub fn apply_requests_system(
    mut requests: EventReader<SpriteAnimationRequest>,
    mut animators: Query<(
        &mut SpriteAnimator,
        &mut Handle<Image>,
        &mut Visibility,
    )>,
) {
    for request in requests.read() {
        let Ok((mut animator, image, visibility)) = animators.get_mut(request.entity()) else {
            warn!("sprite animation request for entity without an animator: {request:?}");
            continue;
        };
        let mut sink = EntitySink { image, visibility };
        let player = animator.player_mut();
        match request {
            SpriteAnimationRequest::Play {
                name, speed, reset, ..
            } => {
                // Unknown names are already logged by the player.
                let _ = player.play_with(name, *speed, *reset, &mut sink);
            }
            SpriteAnimationRequest::PlayOnceUninterrupted { name, .. } => {
                player.play_once_uninterrupted(name, &mut sink);
            }
            SpriteAnimationRequest::CancelUninterrupted { .. } => {
                player.cancel_uninterrupted(&mut sink);
            }
            SpriteAnimationRequest::Stop { .. } => player.stop(),
        }
    }
}

pub fn tick_animators_system(
    time: Res<Time>,
    clock: Res<SpriteAnimationClock>,
    mut animators: Query<(
        Entity,
        &mut SpriteAnimator,
        &mut Handle<Image>,
        &mut Visibility,
    )>,
    mut ended: EventWriter<AnimationEnded>,
) {
    if clock.paused {
        return;
    }
    let dt = time.delta_seconds() * clock.time_scale;

    for (entity, mut animator, image, visibility) in &mut animators {
        let mut sink = EntitySink { image, visibility };
        let player = animator.player_mut();
        player.tick(dt, &mut sink);
        for event in player.drain_events() {
            ended.send(AnimationEnded {
                entity,
                animation: event.animation().to_string(),
            });
        }
    }
}
