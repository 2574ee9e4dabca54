//! Runtime sprite player: catalog lookup, play/stop API, one-shot interruption and the
//! "animation ended" notification on top of the shared advancer.
//!
//! Methods:
//! - play / play_with / stop, tick (advance or step the one-shot), animation_length
//! - play_once_uninterrupted / cancel_uninterrupted
//! - on_animation_ended / drain_events

use std::fmt;
use std::sync::Arc;

use log::{debug, error, trace};

use crate::advance::{advance_bounded, AdvanceOutcome};
use crate::catalog::AnimationCatalog;
use crate::config::PlayerConfig;
use crate::data::AnimationDefinition;
use crate::error::AnimationError;
use crate::oneshot::{OneShot, OneShotStatus};
use crate::outputs::{EventQueue, PlayerEvent};
use crate::sink::RenderSink;
use crate::state::{effective_fps, PlaybackState};

type Listener = Box<dyn FnMut(&PlayerEvent) + Send + Sync>;

/// One animated sprite: owns its catalog view, playback state and at most one
/// uninterruptible clip.
pub struct SpritePlayer<H = String> {
    config: PlayerConfig,
    catalog: AnimationCatalog<H>,
    state: PlaybackState<H>,
    one_shot: Option<OneShot<H>>,
    // Set when the sink may be out of date with `state` without a frame change.
    needs_sync: bool,
    events: EventQueue,
    listeners: Vec<Listener>,
}

impl<H: fmt::Debug> fmt::Debug for SpritePlayer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpritePlayer")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("state", &self.state)
            .field("one_shot", &self.one_shot)
            .field("queued_events", &self.events.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<H> SpritePlayer<H> {
    pub fn new(catalog: AnimationCatalog<H>) -> Self {
        Self::with_config(catalog, PlayerConfig::default())
    }

    pub fn with_config(catalog: AnimationCatalog<H>, config: PlayerConfig) -> Self {
        Self {
            config,
            catalog,
            state: PlaybackState::new(),
            one_shot: None,
            needs_sync: false,
            events: EventQueue::default(),
            listeners: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[inline]
    pub fn catalog(&self) -> &AnimationCatalog<H> {
        &self.catalog
    }

    /// Removing a playing definition from the catalog stops playback on the next tick.
    #[inline]
    pub fn catalog_mut(&mut self) -> &mut AnimationCatalog<H> {
        &mut self.catalog
    }

    #[inline]
    pub fn state(&self) -> &PlaybackState<H> {
        &self.state
    }

    /// Play `name` at normal speed from its first frame.
    pub fn play(&mut self, name: &str, sink: &mut dyn RenderSink<H>) -> Result<(), AnimationError> {
        self.play_with(name, 1.0, true, sink)
    }

    /// Play `name` at `speed` (negative plays backwards).
    ///
    /// If `name` is already playing and `reset` is false only the effective fps is
    /// recomputed, so the clip continues without a visual restart. An unknown name is
    /// logged and returned; the current playback is left alone.
    pub fn play_with(
        &mut self,
        name: &str,
        speed: f32,
        reset: bool,
        sink: &mut dyn RenderSink<H>,
    ) -> Result<(), AnimationError> {
        let definition = match self.catalog.find(name) {
            Ok(definition) => Arc::clone(definition),
            Err(err) => {
                error!("{err}");
                return Err(err);
            }
        };

        if !reset && self.state.is_playing(&definition) {
            self.state.fps = effective_fps(definition.fps, speed);
            trace!("'{name}' already playing, fps now {}", self.state.fps);
            return Ok(());
        }

        self.state.begin(&definition, speed, reset);
        debug!(
            "play '{name}' speed={speed} fps={} reverse={} reset={reset}",
            self.state.fps, self.state.reverse
        );

        if reset && self.one_shot.is_none() {
            sink.set_displayed_image(self.state.displayed_frame(&definition));
            self.needs_sync = false;
        } else {
            self.needs_sync = true;
        }
        Ok(())
    }

    /// Freeze playback until the next `play`. The sink keeps whatever it shows.
    pub fn stop(&mut self) {
        if self.state.is_active() {
            debug!("stop");
        }
        self.state.stop();
        self.needs_sync = false;
    }

    /// Play `name` once, forward, at its own fps, suspending normal playback until it
    /// completes. Unknown names are ignored.
    pub fn play_once_uninterrupted(&mut self, name: &str, sink: &mut dyn RenderSink<H>) {
        let Some(clip) = self.catalog.get(name) else {
            debug!("uninterrupted clip '{name}' not found, ignoring");
            return;
        };
        let shot = OneShot::start(Arc::clone(clip));
        if shot.is_finished() {
            debug!("uninterrupted clip '{name}' has nothing to play");
            return;
        }
        debug!("uninterrupted clip '{name}' started");
        shot.present(sink);
        self.one_shot = Some(shot);
    }

    /// True while a one-shot clip owns the sink.
    #[inline]
    pub fn is_uninterruptible(&self) -> bool {
        self.one_shot.is_some()
    }

    /// Abort a running one-shot and show the main playback frame again.
    pub fn cancel_uninterrupted(&mut self, sink: &mut dyn RenderSink<H>) {
        if self.one_shot.take().is_some() {
            debug!("uninterrupted clip cancelled");
            self.sync(sink);
        }
    }

    /// Advance by `dt` seconds. While a one-shot runs it is stepped instead and the
    /// main state is not touched.
    pub fn tick(&mut self, dt: f32, sink: &mut dyn RenderSink<H>) -> AdvanceOutcome {
        if let Some(shot) = self.one_shot.as_mut() {
            if shot.step(dt, sink) == OneShotStatus::Finished {
                debug!("uninterrupted clip '{}' finished", shot.clip().name);
                self.one_shot = None;
                self.sync(sink);
            }
            return AdvanceOutcome::default();
        }

        let before = (self.state.current_frame, self.state.is_blank());
        let outcome = advance_bounded(&mut self.state, dt, self.config.max_catch_up_steps);
        let after = (self.state.current_frame, self.state.is_blank());

        if self.needs_sync || before != after {
            self.sync(sink);
        }
        if outcome.just_ended {
            if let Some(definition) = self.state.animation() {
                self.emit(PlayerEvent::AnimationEnded {
                    animation: definition.name.clone(),
                });
            }
        }
        outcome
    }

    /// Length in seconds of `name`: `frame_count / effective_fps`.
    ///
    /// The *current* effective fps is used even when `name` is not the playing clip,
    /// so the result reflects the last play's rate. Infinite for a non-empty clip while
    /// holding at 0 fps.
    pub fn animation_length(&self, name: &str) -> Result<f32, AnimationError> {
        let frames = match self.state.animation() {
            Some(active) if active.name == name => active.frame_count(),
            _ => self.catalog.find(name)?.frame_count(),
        };
        Ok(if frames == 0 {
            0.0
        } else if self.state.fps == 0 {
            f32::INFINITY
        } else {
            frames as f32 / self.state.fps as f32
        })
    }

    /// Call `f` with the clip name each time playback ends.
    pub fn on_animation_ended(&mut self, mut f: impl FnMut(&str) + Send + Sync + 'static) {
        self.listeners.push(Box::new(move |event| {
            let PlayerEvent::AnimationEnded { animation } = event;
            f(animation);
        }));
    }

    /// Take all queued events.
    #[inline]
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.events.take()
    }

    fn emit(&mut self, event: PlayerEvent) {
        debug!("{event:?}");
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.events.push(event, self.config.max_queued_events);
    }

    fn sync(&mut self, sink: &mut dyn RenderSink<H>) {
        self.needs_sync = false;
        if let Some(definition) = self.state.animation() {
            sink.set_displayed_image(self.state.displayed_frame(&definition));
        }
    }

    /// The bound clip, if any.
    #[inline]
    pub fn current_animation(&self) -> Option<Arc<AnimationDefinition<H>>> {
        self.state.animation()
    }

    #[inline]
    pub fn current_frame(&self) -> usize {
        self.state.current_frame
    }

    /// Playback of a non-looping clip is over.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// The current frame is the last one of a non-looping traversal: the next period
    /// ends playback (or spends the ping-pong return pass).
    pub fn reached_end_of_animation(&self) -> bool {
        let Some(definition) = self.state.animation() else {
            return false;
        };
        let count = definition.frame_count();
        if count == 0 || self.state.looping {
            return false;
        }
        let frame = self.state.current_frame % count;
        if self.state.reverse {
            frame == 0
        } else {
            frame == count - 1
        }
    }

    /// Override the effective fps. 0 holds the current frame.
    #[inline]
    pub fn set_fps(&mut self, fps: u32) {
        self.state.fps = fps;
    }

    #[inline]
    pub fn set_looping(&mut self, looping: bool) {
        self.state.looping = looping;
    }

    #[inline]
    pub fn set_ping_pong(&mut self, ping_pong: bool) {
        self.state.ping_pong = ping_pong;
    }

    #[inline]
    pub fn set_reverse(&mut self, reverse: bool) {
        self.state.reverse = reverse;
    }

    /// Manually show `frame` (wrapped into range on the next tick). Ignored while
    /// stopped; returns whether it took effect.
    pub fn set_frame(&mut self, frame: usize) -> bool {
        let applied = self.state.seek_frame(frame);
        self.needs_sync |= applied;
        applied
    }
}

impl<H: Clone> SpritePlayer<H> {
    /// Image the main playback wants on screen (ignores a running one-shot).
    pub fn displayed_frame(&self) -> Option<H> {
        let definition = self.state.animation()?;
        self.state.displayed_frame(&definition).cloned()
    }
}
