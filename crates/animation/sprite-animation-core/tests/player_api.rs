use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use sprite_animation_core::{
    AnimationCatalog, AnimationError, PlayerConfig, PlayerEvent, RecordingSink, SpritePlayer,
};

fn hero() -> SpritePlayer {
    let json = sprite_test_fixtures::catalogs::json("hero").expect("hero fixture");
    SpritePlayer::new(AnimationCatalog::from_json(&json).expect("hero catalog parses"))
}

fn shown(name: &str) -> Option<String> {
    Some(name.to_string())
}

/// it should show the first frame as soon as play is called
#[test]
fn play_pushes_first_frame_immediately() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("walk", &mut sink).unwrap();

    assert_eq!(sink.shown, vec![shown("hero_walk_0.png")]);
    assert_eq!(player.current_animation().unwrap().name, "walk");
    assert_eq!(player.state().fps, 8);
    assert!(player.state().looping);
}

/// it should start on the last frame and count down when played with a negative speed
#[test]
fn negative_speed_plays_backwards() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play_with("walk", -0.5, true, &mut sink).unwrap();

    assert_eq!(player.current_frame(), 5);
    assert_eq!(player.state().fps, 4);
    player.tick(0.25, &mut sink);
    assert_eq!(player.current_frame(), 4);
    assert_eq!(sink.last(), Some(&shown("hero_walk_4.png")));
}

/// it should report an unknown name and leave the current playback alone
#[test]
fn unknown_name_is_an_error_and_changes_nothing() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("walk", &mut sink).unwrap();
    player.tick(0.25, &mut sink);
    let pushes = sink.shown.len();

    let err = player.play("fly", &mut sink).unwrap_err();
    assert_eq!(
        err,
        AnimationError::AnimationNotFound {
            name: "fly".into()
        }
    );
    assert_eq!(err.to_string(), "Animation fly not found.");
    assert_eq!(player.current_animation().unwrap().name, "walk");
    assert_eq!(player.current_frame(), 2);
    assert_eq!(sink.shown.len(), pushes);
}

/// it should only retune fps when the playing clip is played again without reset
#[test]
fn play_without_reset_keeps_position() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("walk", &mut sink).unwrap();
    player.tick(0.3125, &mut sink); // 2.5 periods
    assert_eq!(player.current_frame(), 2);
    let accumulator = player.state().accumulator();
    let pushes = sink.shown.len();

    player.play_with("walk", 2.0, false, &mut sink).unwrap();
    assert_eq!(player.current_frame(), 2);
    assert_eq!(player.state().fps, 16);
    assert!(!player.state().reverse);
    assert_relative_eq!(player.state().accumulator(), accumulator);
    assert_eq!(sink.shown.len(), pushes, "no visual restart");
}

/// it should restart from frame 0 when the playing clip is played again with reset
#[test]
fn play_with_reset_restarts() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("walk", &mut sink).unwrap();
    player.tick(0.5, &mut sink);
    assert_eq!(player.current_frame(), 4);

    player.play("walk", &mut sink).unwrap();
    assert_eq!(player.current_frame(), 0);
    assert_eq!(player.state().accumulator(), 0.0);
    assert_eq!(sink.last(), Some(&shown("hero_walk_0.png")));
}

/// it should keep the frame index when switching clips without reset
#[test]
fn switching_clip_without_reset_keeps_index() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("walk", &mut sink).unwrap();
    player.tick(0.625, &mut sink);
    assert_eq!(player.current_frame(), 5);

    player.play_with("idle", 1.0, false, &mut sink).unwrap();
    assert_eq!(player.current_frame(), 5);
    player.tick(0.0, &mut sink);
    // idle has 4 frames; the kept index wraps into range.
    assert_eq!(player.current_frame(), 1);
    assert_eq!(sink.last(), Some(&shown("hero_idle_1.png")));
}

/// it should freeze on stop and make the next play indistinguishable from a fresh one
#[test]
fn stop_then_play_matches_fresh_player() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("breathe", &mut sink).unwrap();
    player.tick(0.875, &mut sink);
    player.stop();

    let frozen = sink.shown.len();
    let outcome = player.tick(5.0, &mut sink);
    assert!(!outcome.changed && !outcome.ended);
    assert_eq!(sink.shown.len(), frozen);
    assert!(!player.set_frame(1));

    player.play("attack", &mut sink).unwrap();

    let mut fresh = hero();
    fresh.play("attack", &mut RecordingSink::new()).unwrap();

    let (a, b) = (player.state(), fresh.state());
    assert_eq!(a.current_frame, b.current_frame);
    assert_eq!(a.fps, b.fps);
    assert_eq!(a.looping, b.looping);
    assert_eq!(a.ping_pong, b.ping_pong);
    assert_eq!(a.reverse, b.reverse);
    assert_eq!(a.remaining_ping_pong_passes, b.remaining_ping_pong_passes);
    assert_eq!(a.is_blank(), b.is_blank());
    assert_eq!(a.accumulator(), b.accumulator());
}

/// it should notify listeners and the event queue exactly once when a clip ends
#[test]
fn ended_event_fires_once() {
    let mut player = hero();
    let heard = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&heard);
    player.on_animation_ended(move |name| log.lock().unwrap().push(name.to_string()));

    let mut sink = RecordingSink::new();
    player.play("attack", &mut sink).unwrap();
    for _ in 0..10 {
        player.tick(0.125, &mut sink);
    }

    assert_eq!(*heard.lock().unwrap(), vec!["attack".to_string()]);
    let events = player.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].animation(), "attack");
    assert!(player.drain_events().is_empty());
    assert!(player.is_finished());
    assert_eq!(sink.last(), Some(&shown("hero_attack_2.png")));
}

/// it should blank the sink when a blank-at-end clip finishes and not re-notify
#[test]
fn blank_at_end_pushes_none() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("die", &mut sink).unwrap();
    for _ in 0..3 {
        player.tick(0.25, &mut sink);
    }
    assert_eq!(sink.last(), Some(&shown("hero_die_3.png")));

    let outcome = player.tick(0.25, &mut sink);
    assert!(outcome.just_ended);
    assert_eq!(sink.last(), Some(&None));
    assert!(player.state().is_blank());
    assert_eq!(player.displayed_frame(), None);

    let pushes = sink.shown.len();
    let outcome = player.tick(1.0, &mut sink);
    assert!(outcome.ended && !outcome.just_ended);
    assert_eq!(sink.shown.len(), pushes);
    assert_eq!(
        player.drain_events(),
        vec![PlayerEvent::AnimationEnded {
            animation: "die".into()
        }]
    );
}

/// it should leave a looping clip running forever without ended events
#[test]
fn looping_clip_never_ends() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("breathe", &mut sink).unwrap();
    for _ in 0..100 {
        player.tick(0.1, &mut sink);
    }
    assert!(player.drain_events().is_empty());
    assert!(!player.is_finished());
    assert!(!player.reached_end_of_animation());
}

/// it should flag the last frame of a non-looping pass before it ends
#[test]
fn reached_end_tracks_direction() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("attack", &mut sink).unwrap();
    assert!(!player.reached_end_of_animation());
    player.tick(0.25, &mut sink);
    assert!(player.reached_end_of_animation());

    player.play_with("attack", -1.0, true, &mut sink).unwrap();
    assert!(!player.reached_end_of_animation());
    player.tick(0.25, &mut sink);
    assert_eq!(player.current_frame(), 0);
    assert!(player.reached_end_of_animation());
}

/// it should compute lengths with the current effective fps, whatever clip is named
#[test]
fn animation_length_uses_current_fps() {
    let mut player = hero();
    let mut sink = RecordingSink::new();

    // Nothing played yet: effective fps is 0.
    assert_eq!(player.animation_length("walk").unwrap(), f32::INFINITY);

    player.play("walk", &mut sink).unwrap();
    assert_relative_eq!(player.animation_length("walk").unwrap(), 0.75);
    // idle at its own 4 fps would be 1.0s, but walk's 8 fps is what counts.
    assert_relative_eq!(player.animation_length("idle").unwrap(), 0.5);

    player.play_with("walk", 0.5, true, &mut sink).unwrap();
    assert_relative_eq!(player.animation_length("walk").unwrap(), 1.5);

    assert!(matches!(
        player.animation_length("fly"),
        Err(AnimationError::AnimationNotFound { .. })
    ));
}

/// it should let the effective flags be overridden between ticks
#[test]
fn overrides_take_effect_on_next_tick() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("walk", &mut sink).unwrap();

    player.set_looping(false);
    player.set_fps(4);
    for _ in 0..6 {
        player.tick(0.25, &mut sink);
    }
    assert!(player.is_finished());
    assert_eq!(player.current_frame(), 5);
    assert_eq!(player.drain_events().len(), 1);

    assert!(player.set_frame(2));
    assert!(!player.is_finished());
    player.set_reverse(true);
    player.tick(0.0, &mut sink);
    assert_eq!(sink.last(), Some(&shown("hero_walk_2.png")));
    player.tick(0.25, &mut sink);
    assert_eq!(player.current_frame(), 1);

    player.set_ping_pong(true);
    player.tick(0.25, &mut sink);
    player.tick(0.25, &mut sink);
    // Looping is off and no return pass was granted by play: the clip ends at 0.
    assert!(player.is_finished());
    assert_eq!(player.current_frame(), 0);
}

/// it should push into closures as well as sink structs
#[test]
fn closure_sink_receives_updates() {
    let mut player = hero();
    let mut seen: Vec<Option<String>> = Vec::new();
    {
        let mut sink = |image: Option<&String>| seen.push(image.cloned());
        player.play("idle", &mut sink).unwrap();
        player.tick(0.25, &mut sink);
    }
    assert_eq!(seen, vec![shown("hero_idle_0.png"), shown("hero_idle_1.png")]);
}

/// it should cap catch-up work per tick when configured and drop the backlog
#[test]
fn configured_step_cap_limits_catch_up() {
    let json = sprite_test_fixtures::catalogs::json("hero").unwrap();
    let config = PlayerConfig {
        max_catch_up_steps: Some(3),
        ..PlayerConfig::default()
    };
    let mut player: SpritePlayer = SpritePlayer::with_config(AnimationCatalog::from_json(&json).unwrap(), config);
    let mut sink = RecordingSink::new();
    player.play("idle", &mut sink).unwrap();

    player.tick(10.0, &mut sink);
    assert_eq!(player.current_frame(), 3);
    assert!(player.state().accumulator() < 0.25);
}

/// it should notice when the playing definition is removed from the catalog
#[test]
fn removed_definition_stops_playback() {
    let mut player = hero();
    let mut sink = RecordingSink::new();
    player.play("walk", &mut sink).unwrap();

    *player.catalog_mut() = AnimationCatalog::default();
    assert!(player.current_animation().is_none());
    let pushes = sink.shown.len();
    player.tick(1.0, &mut sink);
    assert_eq!(sink.shown.len(), pushes);
}
