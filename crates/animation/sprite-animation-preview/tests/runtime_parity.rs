use std::sync::Arc;

use sprite_animation_core::{AnimationCatalog, AnimationDefinition, NullSink, SpritePlayer};
use sprite_animation_preview::{PreviewConfig, PreviewPlayer};

/// Irregular but exactly representable sample times.
const SAMPLES: [f64; 10] = [0.0, 0.0625, 0.3125, 0.375, 0.875, 0.9375, 1.5, 1.625, 2.25, 3.0];

fn load(name: &str) -> AnimationDefinition {
    sprite_test_fixtures::animations::load(name).unwrap_or_else(|e| panic!("{name}: {e:#}"))
}

/// Preview sampled at `SAMPLES` vs runtime ticked with the deltas between them.
fn trace(name: &str) -> (Vec<Option<String>>, Vec<Option<String>>) {
    let def = load(name);
    let clip = def.name.clone();

    let mut preview = PreviewPlayer::new(Arc::new(def.clone()), PreviewConfig::default());
    preview.toggle_play_at_seconds(SAMPLES[0]);

    let mut runtime = SpritePlayer::new(AnimationCatalog::new([def]));
    runtime.play(&clip, &mut NullSink).unwrap();

    let mut from_preview = Vec::new();
    let mut from_runtime = Vec::new();
    for pair in SAMPLES.windows(2) {
        preview.update_at_seconds(pair[1]);
        runtime.tick((pair[1] - pair[0]) as f32, &mut NullSink);
        from_preview.push(preview.displayed_frame().cloned());
        from_runtime.push(runtime.displayed_frame());
    }
    (from_preview, from_runtime)
}

/// it should show the same frame in the preview and at runtime for every fixture clip
#[test]
fn preview_matches_runtime_on_fixtures() {
    for name in sprite_test_fixtures::animations::keys() {
        let (preview, runtime) = trace(&name);
        assert_eq!(preview, runtime, "fixture {name}");
    }
}

/// it should match a 30 Hz runtime when the preview only samples twice a second
#[test]
fn coarse_preview_matches_fine_runtime_ticks() {
    for name in sprite_test_fixtures::animations::keys() {
        let def = load(&name);
        let clip = def.name.clone();

        let mut preview = PreviewPlayer::new(Arc::new(def.clone()), PreviewConfig::default());
        preview.toggle_play_at_seconds(0.0);
        let mut runtime = SpritePlayer::new(AnimationCatalog::new([def]));
        runtime.play(&clip, &mut NullSink).unwrap();

        for half_seconds in 1..=6 {
            for _ in 0..15 {
                runtime.tick(1.0 / 30.0, &mut NullSink);
            }
            preview.update_at_seconds(half_seconds as f64 * 0.5);
            assert_eq!(
                preview.displayed_frame().cloned(),
                runtime.displayed_frame(),
                "fixture {name} at {}s",
                half_seconds as f64 * 0.5
            );
        }
    }
}

/// it should pause the preview when a non-looping clip ends
#[test]
fn preview_pauses_at_end() {
    let mut preview = PreviewPlayer::new(Arc::new(load("once-4")), PreviewConfig::default());
    preview.toggle_play_at_seconds(0.0);
    assert!(preview.update_at_seconds(5.0));
    assert!(!preview.is_playing());
    assert_eq!(preview.frame(), 3);
    assert!(preview.status_line().starts_with("Preview: 4/4"));
}

/// it should keep the blank visible after a blank-at-end clip ends
#[test]
fn preview_keeps_blank_visible() {
    let mut preview = PreviewPlayer::new(Arc::new(load("once-4-blank")), PreviewConfig::default());
    preview.toggle_play_at_seconds(0.0);
    preview.update_at_seconds(5.0);
    assert!(preview.is_blank());
    assert!(preview.status_line().ends_with("• (blank)"));

    // Playing again after the end restarts from the held frame, not from the blank.
    preview.toggle_play_at_seconds(6.0);
    assert!(!preview.is_blank());
    assert_eq!(preview.displayed_frame().map(String::as_str), Some("fade_3.png"));
}
