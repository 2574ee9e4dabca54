//! Playback state of one player.

use std::sync::{Arc, Weak};

use crate::data::AnimationDefinition;

/// Everything the frame advancer reads and writes.
///
/// The flags are the *effective* ones for the current play: they are copied from the
/// definition by [`PlaybackState::begin`] and may be overridden afterwards.
#[derive(Debug, Clone)]
pub struct PlaybackState<H = String> {
    active: Option<Weak<AnimationDefinition<H>>>,
    /// Displayed frame. Out-of-range values written by a scrubbing caller are wrapped
    /// into range before use.
    pub current_frame: usize,
    /// Effective frames per second. 0 holds the current frame.
    pub fps: u32,
    pub looping: bool,
    pub ping_pong: bool,
    pub reverse: bool,
    /// Return passes left for a non-looping ping-pong clip.
    pub remaining_ping_pong_passes: u32,
    pub(crate) blank: bool,
    pub(crate) finished: bool,
    pub(crate) accumulator: f32,
}

impl<H> Default for PlaybackState<H> {
    fn default() -> Self {
        Self {
            active: None,
            current_frame: 0,
            fps: 0,
            looping: false,
            ping_pong: false,
            reverse: false,
            remaining_ping_pong_passes: 0,
            blank: false,
            finished: false,
            accumulator: 0.0,
        }
    }
}

/// `round(abs(base_fps * speed))`, saturating at the `u32` range.
#[inline]
pub fn effective_fps(base_fps: u32, speed: f32) -> u32 {
    let fps = (base_fps as f32 * speed).abs().round();
    if fps.is_finite() {
        fps as u32
    } else {
        0
    }
}

impl<H> PlaybackState<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `definition` and reinitialize direction, counters and timing.
    ///
    /// With `reset` the frame jumps to the first frame of the traversal direction;
    /// without it the current index is kept (and wrapped on the next advance).
    pub fn begin(&mut self, definition: &Arc<AnimationDefinition<H>>, speed: f32, reset: bool) {
        self.active = Some(Arc::downgrade(definition));
        self.fps = effective_fps(definition.fps, speed);
        self.looping = definition.looping;
        self.ping_pong = definition.ping_pong;
        self.reverse = speed < 0.0;
        self.remaining_ping_pong_passes = u32::from(!self.looping && self.ping_pong);
        self.blank = false;
        self.finished = false;
        self.accumulator = 0.0;
        if reset {
            self.current_frame = if self.reverse {
                definition.frame_count().saturating_sub(1)
            } else {
                0
            };
        }
    }

    /// Unbind. Advancing and scrubbing become no-ops until the next [`begin`](Self::begin).
    pub fn stop(&mut self) {
        self.active = None;
        self.blank = false;
        self.finished = false;
    }

    /// The bound definition, if it is still alive.
    #[inline]
    pub fn animation(&self) -> Option<Arc<AnimationDefinition<H>>> {
        self.active.as_ref().and_then(Weak::upgrade)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.animation().is_some()
    }

    /// True when `definition` is the bound clip.
    #[inline]
    pub fn is_playing(&self, definition: &Arc<AnimationDefinition<H>>) -> bool {
        self.active
            .as_ref()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(definition)))
    }

    /// Terminal "show nothing" state of a blank-at-end clip.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.blank
    }

    /// A non-looping clip has played through (blank or holding its last frame).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.blank || self.finished
    }

    /// Seconds carried towards the next frame.
    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Seconds per frame at the effective rate, `None` while holding.
    #[inline]
    pub fn frame_period(&self) -> Option<f32> {
        (self.fps > 0).then(|| 1.0 / self.fps as f32)
    }

    /// Jump to `frame` for manual scrubbing. Leaves any terminal state.
    ///
    /// Returns `false` (and does nothing) when no animation is bound.
    pub fn seek_frame(&mut self, frame: usize) -> bool {
        if !self.is_active() {
            return false;
        }
        self.current_frame = frame;
        self.blank = false;
        self.finished = false;
        true
    }

    /// Image the render target should show right now.
    pub fn displayed_frame<'a>(&self, definition: &'a AnimationDefinition<H>) -> Option<&'a H> {
        if self.blank {
            return None;
        }
        definition.frame(self.current_frame)
    }
}
