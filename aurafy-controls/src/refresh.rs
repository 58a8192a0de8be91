use std::time::Duration;

use aurafy_client::models::{PlaybackState, TrackSnapshot};

/// How often playback is re-queried after an action before giving up on
/// seeing its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub attempts: u32,
    pub initial_backoff: Duration,
}

impl RefreshPolicy {
    pub fn new(attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            initial_backoff,
        }
    }

    /// Delay before poll number `attempt` (0-based). The first poll runs
    /// right away, then the backoff doubles.
    pub fn delay(&self, attempt: u32) -> Duration {
        match attempt {
            0 => Duration::ZERO,
            n => self.initial_backoff.saturating_mul(1 << (n - 1).min(16)),
        }
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(4, Duration::from_millis(250))
    }
}

/// The observable effect of an action.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expectation {
    Nothing,
    Playing(bool),
    TrackChange(Option<TrackSnapshot>),
    Repeat(bool),
    Shuffle(bool),
}

impl Expectation {
    pub(crate) fn is_met(&self, state: Option<&PlaybackState>) -> bool {
        let Some(state) = state else {
            return match self {
                Expectation::Nothing | Expectation::Playing(false) => true,
                Expectation::TrackChange(before) => before.is_some(),
                _ => false,
            };
        };

        match self {
            Expectation::Nothing => true,
            Expectation::Playing(playing) => state.is_playing == *playing,
            Expectation::TrackChange(before) => state.track != *before,
            Expectation::Repeat(on) => state.repeat.is_on() == *on,
            Expectation::Shuffle(on) => state.shuffle == *on,
        }
    }
}
