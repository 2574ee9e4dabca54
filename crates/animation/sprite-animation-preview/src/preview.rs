//! Inspector-style preview player.
//!
//! Play/Pause, Stop and a frame slider over a single clip, sampled from a wall clock. It
//! steps with the same [`advance`] as the runtime player, so what the preview shows is
//! what the game shows. Playback pauses itself once a non-looping clip ends.

use std::fmt;
use std::sync::Arc;

use instant::Instant;
use log::debug;
use serde::{Deserialize, Serialize};
use sprite_animation_core::{advance, AnimationDefinition, PlaybackState};

use crate::config::PreviewConfig;
use crate::surface::{PreviewLayout, PreviewSurface, Rect, SpriteRegion};

/// How the clip's flags read in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreviewMode {
    PingPong,
    Loop,
    Once,
}

impl PreviewMode {
    /// Ping-pong wins over looping.
    pub fn of<H>(clip: &AnimationDefinition<H>) -> Self {
        if clip.ping_pong {
            Self::PingPong
        } else if clip.looping {
            Self::Loop
        } else {
            Self::Once
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PingPong => "PingPong",
            Self::Loop => "Loop",
            Self::Once => "Once",
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct PreviewPlayer<H = String> {
    clip: Arc<AnimationDefinition<H>>,
    state: PlaybackState<H>,
    playing: bool,
    epoch: Instant,
    last_sample: f64,
    surface: PreviewSurface,
}

impl<H: fmt::Debug> fmt::Debug for PreviewPlayer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewPlayer")
            .field("clip", &self.clip.name)
            .field("state", &self.state)
            .field("playing", &self.playing)
            .field("last_sample", &self.last_sample)
            .finish()
    }
}

impl<H> PreviewPlayer<H> {
    /// Paused on frame 0.
    pub fn new(clip: Arc<AnimationDefinition<H>>, config: PreviewConfig) -> Self {
        let mut state = PlaybackState::new();
        state.begin(&clip, 1.0, true);
        Self {
            clip,
            state,
            playing: false,
            epoch: Instant::now(),
            last_sample: 0.0,
            surface: PreviewSurface::new(config),
        }
    }

    #[inline]
    pub fn clip(&self) -> &Arc<AnimationDefinition<H>> {
        &self.clip
    }

    /// Swap in an edited clip. Playback stops and rewinds.
    pub fn set_clip(&mut self, clip: Arc<AnimationDefinition<H>>) {
        self.clip = clip;
        self.stop();
    }

    #[inline]
    pub fn state(&self) -> &PlaybackState<H> {
        &self.state
    }

    #[inline]
    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn frame(&self) -> usize {
        self.state.current_frame
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.state.is_blank()
    }

    #[inline]
    pub fn mode(&self) -> PreviewMode {
        PreviewMode::of(&self.clip)
    }

    /// Play/Pause button.
    pub fn toggle_play(&mut self, now: Instant) {
        let seconds = self.seconds_since_epoch(now);
        self.toggle_play_at_seconds(seconds);
    }

    /// [`toggle_play`](Self::toggle_play) against a caller-owned clock in seconds.
    pub fn toggle_play_at_seconds(&mut self, now: f64) {
        if self.playing {
            debug!("preview '{}' paused on frame {}", self.clip.name, self.frame());
            self.playing = false;
            return;
        }

        let count = self.clip.frame_count();
        if count == 0 {
            self.stop();
            return;
        }

        // Resume from wherever the slider left the frame.
        self.state.current_frame = self.state.current_frame.min(count - 1);
        self.state.begin(&self.clip, 1.0, false);
        self.last_sample = now;
        self.playing = true;
        debug!("preview '{}' playing from frame {}", self.clip.name, self.frame());
    }

    /// Stop button: pause and rewind to frame 0.
    pub fn stop(&mut self) {
        self.playing = false;
        self.state.begin(&self.clip, 1.0, true);
    }

    /// Frame slider or thumbnail click. Pauses playback and leaves the blank state.
    pub fn scrub(&mut self, frame: usize) {
        let count = self.clip.frame_count();
        if count == 0 {
            return;
        }
        self.playing = false;
        self.state.seek_frame(frame.min(count - 1));
    }

    /// Sample the clock; returns whether the pane needs a repaint.
    pub fn update(&mut self, now: Instant) -> bool {
        let seconds = self.seconds_since_epoch(now);
        self.update_at_seconds(seconds)
    }

    /// [`update`](Self::update) against a caller-owned clock in seconds.
    pub fn update_at_seconds(&mut self, now: f64) -> bool {
        if !self.playing {
            return false;
        }
        if self.clip.frame_count() == 0 {
            self.playing = false;
            return false;
        }

        let elapsed = (now - self.last_sample) as f32;
        self.last_sample = now;

        let outcome = advance(&mut self.state, elapsed);
        if outcome.ended {
            debug!(
                "preview '{}' reached the end{}",
                self.clip.name,
                if self.is_blank() { " (blank)" } else { "" }
            );
            self.playing = false;
        }
        outcome.changed || outcome.ended
    }

    /// Image under the preview cursor, `None` while blank or for an empty clip.
    pub fn displayed_frame(&self) -> Option<&H> {
        if self.is_blank() {
            return None;
        }
        let last = self.clip.frame_count().checked_sub(1)?;
        self.clip.frames.get(self.state.current_frame.min(last))
    }

    /// One-line summary under the controls, e.g. `Preview: 2/4 • 12 fps • Loop`.
    pub fn status_line(&self) -> String {
        let count = self.clip.frame_count();
        let shown = if count == 0 {
            0
        } else {
            self.state.current_frame.min(count - 1) + 1
        };
        format!(
            "Preview: {}/{} • {} fps • {}{}",
            shown,
            count.max(1),
            self.clip.fps,
            self.mode(),
            if self.is_blank() { " • (blank)" } else { "" }
        )
    }

    /// Lay out the preview pane; `region_of` maps an image handle to its texture region.
    pub fn layout(
        &self,
        rect: Rect,
        region_of: impl FnOnce(&H) -> Option<SpriteRegion>,
    ) -> PreviewLayout {
        let region = self.displayed_frame().and_then(region_of);
        self.surface.layout(rect, region)
    }

    fn seconds_since_epoch(&self, now: Instant) -> f64 {
        if now <= self.epoch {
            return 0.0;
        }
        now.duration_since(self.epoch).as_secs_f64()
    }
}
