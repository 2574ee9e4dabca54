//! Uninterruptible one-shot clips.
//!
//! A [`OneShot`] is a cooperative task: the owner calls [`OneShot::step`] once per
//! scheduling opportunity until it reports [`OneShotStatus::Finished`]. It plays one
//! forward pass at the clip's own base fps and never looks at the main
//! [`PlaybackState`](crate::PlaybackState). Dropping it is the cancellation.

use std::sync::Arc;

use crate::advance::whole_periods;
use crate::data::AnimationDefinition;
use crate::sink::RenderSink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OneShotStatus {
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct OneShot<H = String> {
    clip: Arc<AnimationDefinition<H>>,
    cursor: usize,
    timer: f32,
}

impl<H> OneShot<H> {
    /// Task positioned on frame 0. Empty or zero-fps clips are finished from the start.
    pub fn start(clip: Arc<AnimationDefinition<H>>) -> Self {
        Self {
            clip,
            cursor: 0,
            timer: 0.0,
        }
    }

    #[inline]
    pub fn clip(&self) -> &Arc<AnimationDefinition<H>> {
        &self.clip
    }

    /// Index of the frame on screen; equals the frame count once finished.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn current_image(&self) -> Option<&H> {
        self.clip.frames.get(self.cursor)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.clip.fps == 0 || self.cursor >= self.clip.frame_count()
    }

    /// Show the current frame without advancing.
    pub fn present(&self, sink: &mut dyn RenderSink<H>) {
        if let Some(image) = self.current_image() {
            sink.set_displayed_image(Some(image));
        }
    }

    /// Consume `elapsed` seconds, pushing every newly reached frame to `sink`.
    pub fn step(&mut self, elapsed: f32, sink: &mut dyn RenderSink<H>) -> OneShotStatus {
        if self.is_finished() {
            return OneShotStatus::Finished;
        }
        if elapsed.is_finite() && elapsed > 0.0 {
            self.timer += elapsed;
        }

        let period = 1.0 / self.clip.fps as f32;
        let count = self.clip.frame_count();
        let (due, remainder) = whole_periods(self.timer, period);
        self.timer = remainder;
        for _ in 0..due {
            if self.cursor >= count {
                break;
            }
            self.cursor += 1;
            if let Some(image) = self.clip.frames.get(self.cursor) {
                sink.set_displayed_image(Some(image));
            }
        }

        if self.cursor >= count {
            OneShotStatus::Finished
        } else {
            OneShotStatus::Running
        }
    }
}
