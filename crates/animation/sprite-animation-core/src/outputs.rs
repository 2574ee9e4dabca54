//! Events emitted by a player.
//!
//! A player queues events as they happen; hosts either drain the queue once per tick
//! or register listeners that are called immediately.

use serde::{Deserialize, Serialize};

/// Discrete signals from playback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerEvent {
    /// A non-looping clip reached its terminal state (last frame held, or blank).
    AnimationEnded { animation: String },
}

impl PlayerEvent {
    /// Name of the clip the event is about.
    #[inline]
    pub fn animation(&self) -> &str {
        match self {
            Self::AnimationEnded { animation } => animation,
        }
    }
}

/// Bounded FIFO of undrained events.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventQueue {
    events: Vec<PlayerEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: PlayerEvent, capacity: usize) {
        if capacity == 0 {
            return;
        }
        if self.events.len() >= capacity {
            let overflow = self.events.len() + 1 - capacity;
            log::warn!("player event queue full, dropping {overflow} oldest event(s)");
            self.events.drain(..overflow);
        }
        self.events.push(event);
    }

    #[inline]
    pub(crate) fn take(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}
