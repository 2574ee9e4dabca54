//! Sprite Animation Core (engine-agnostic)
//!
//! Flip-book playback for sprites: a fixed ordered list of images shown at a frame
//! rate, with looping, ping-pong and a blank-at-end terminal mode. The frame-advance
//! rules live in [`advance`] as a pure function over [`PlaybackState`], so a runtime
//! tick loop and an editor preview timer step playback identically. [`SpritePlayer`]
//! layers catalog lookup, the play/stop API, uninterruptible one-shot clips and the
//! "animation ended" notification on top.

pub mod advance;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod oneshot;
pub mod outputs;
pub mod player;
pub mod sink;
pub mod state;

// Re-exports for consumers (adapters)
pub use advance::{advance, advance_bounded, AdvanceOutcome};
pub use catalog::AnimationCatalog;
pub use config::PlayerConfig;
pub use data::AnimationDefinition;
pub use error::AnimationError;
pub use oneshot::{OneShot, OneShotStatus};
pub use outputs::PlayerEvent;
pub use player::SpritePlayer;
pub use sink::{NullSink, RecordingSink, RenderSink};
pub use state::{effective_fps, PlaybackState};

/// Result type for fallible playback calls
pub type Result<T> = core::result::Result<T, AnimationError>;
