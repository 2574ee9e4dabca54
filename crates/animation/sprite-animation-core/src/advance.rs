//! Frame-advance state machine.
//!
//! [`advance`] is a free function over [`PlaybackState`] so that every driver (a
//! per-tick runtime loop, a wall-clock preview timer, a test) steps playback with the
//! same rules. Elapsed time is accumulated and consumed one frame period at a time;
//! a long gap fast-forwards through every discrete step instead of snapping.

use serde::{Deserialize, Serialize};

use crate::state::PlaybackState;

/// What one call to [`advance`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceOutcome {
    /// At least one step moved the index, wrapped, or spent the return pass.
    pub changed: bool,
    /// Playback is over: reported on the terminal step, and on every later call while
    /// the blank state is showing.
    pub ended: bool,
    /// This call made the terminal transition. Fires once per play.
    pub just_ended: bool,
}

impl AdvanceOutcome {
    const IDLE: Self = Self {
        changed: false,
        ended: false,
        just_ended: false,
    };
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Moved,
    Flipped { counts_as_change: bool },
    Wrapped,
    Blank,
    Finished,
}

/// Step `state` forward by `elapsed` seconds.
#[inline]
pub fn advance<H>(state: &mut PlaybackState<H>, elapsed: f32) -> AdvanceOutcome {
    advance_bounded(state, elapsed, None)
}

/// [`advance`] with an optional cap on discrete steps per call. Whole periods beyond
/// the cap are dropped; the fractional remainder is kept.
pub fn advance_bounded<H>(
    state: &mut PlaybackState<H>,
    elapsed: f32,
    max_steps: Option<u32>,
) -> AdvanceOutcome {
    let Some(definition) = state.animation() else {
        return AdvanceOutcome::IDLE;
    };
    let count = definition.frame_count();
    if count == 0 || state.fps == 0 || state.finished {
        return AdvanceOutcome::IDLE;
    }
    if state.blank {
        return AdvanceOutcome {
            ended: true,
            ..AdvanceOutcome::IDLE
        };
    }

    state.current_frame %= count;
    if elapsed.is_finite() && elapsed > 0.0 {
        state.accumulator += elapsed;
    }

    // Fixed for the whole call; an fps change lands on the next one.
    let period = 1.0 / state.fps as f32;
    let (due, remainder) = whole_periods(state.accumulator, period);
    let taken = max_steps.map_or(due, |max| due.min(max));
    state.accumulator = remainder;
    let mut outcome = AdvanceOutcome::IDLE;

    for _ in 0..taken {
        match step(state, count) {
            Step::Moved | Step::Wrapped => outcome.changed = true,
            Step::Flipped { counts_as_change } => outcome.changed |= counts_as_change,
            Step::Blank | Step::Finished => {
                outcome.changed = true;
                outcome.ended = true;
                outcome.just_ended = true;
                state.accumulator = 0.0;
                break;
            }
        }
    }

    outcome
}

/// Quotient slack absorbing f32 rounding, so `n` calls of one period and one call of
/// `n` periods both count `n` steps.
const PERIOD_SLACK: f32 = 1e-3;

/// Split `accumulator` into whole `period`s and the non-negative remainder.
pub(crate) fn whole_periods(accumulator: f32, period: f32) -> (u32, f32) {
    if accumulator.is_nan() || accumulator <= 0.0 || period <= 0.0 {
        return (0, accumulator.max(0.0));
    }
    let whole = (accumulator / period + PERIOD_SLACK).floor();
    let remainder = (accumulator - whole * period).max(0.0);
    (whole as u32, remainder)
}

fn step<H>(state: &mut PlaybackState<H>, count: usize) -> Step {
    let last = count - 1;
    let at_end = if state.reverse {
        state.current_frame == 0
    } else {
        state.current_frame == last
    };

    if !at_end {
        state.current_frame = if state.reverse {
            state.current_frame.saturating_sub(1)
        } else {
            (state.current_frame + 1).min(last)
        };
        return Step::Moved;
    }

    let blank_at_end = state
        .animation()
        .is_some_and(|definition| definition.blank_frame_at_end);

    match (state.looping, state.ping_pong) {
        (false, _) if blank_at_end => {
            state.blank = true;
            Step::Blank
        }
        (false, true) if state.remaining_ping_pong_passes > 0 => {
            state.reverse = !state.reverse;
            state.remaining_ping_pong_passes -= 1;
            Step::Flipped {
                counts_as_change: true,
            }
        }
        (false, _) => {
            state.finished = true;
            state.ping_pong = false;
            Step::Finished
        }
        (true, true) => {
            state.reverse = !state.reverse;
            Step::Flipped {
                counts_as_change: false,
            }
        }
        (true, false) => {
            state.current_frame = 0;
            Step::Wrapped
        }
    }
}
