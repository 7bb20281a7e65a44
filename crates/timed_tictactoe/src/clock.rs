//! Per-turn clock driven by explicit ticks.
//!
//! The clock never samples wall time. A frontend feeds it frame deltas and
//! it reports when the human's countdown expired or the computer finished
//! "thinking". Leftover time from a tick is dropped when possession changes.

use super::Turn;
use super::config::EngineConfig;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Remaining time below which the countdown is shown as a warning.
pub const WARNING_THRESHOLD: Duration = Duration::from_secs(5);

/// Remaining time below which the countdown is shown as critical.
pub const CRITICAL_THRESHOLD: Duration = Duration::from_secs(3);

/// What a tick of the clock produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Nothing is due yet.
    Pending,
    /// The human's countdown just reached zero. Fires once per turn.
    HumanTimedOut,
    /// The computer's thinking delay has passed.
    ComputerReady,
}

/// How close the human is to running out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerUrgency {
    /// More than five seconds left.
    Calm,
    /// Five seconds or less.
    Warning,
    /// Three seconds or less.
    Critical,
}

impl TimerUrgency {
    /// Classifies a remaining duration.
    pub fn from_remaining(remaining: Duration) -> Self {
        if remaining <= CRITICAL_THRESHOLD {
            TimerUrgency::Critical
        } else if remaining <= WARNING_THRESHOLD {
            TimerUrgency::Warning
        } else {
            TimerUrgency::Calm
        }
    }
}

/// Turn timer for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TurnClock {
    /// Human countdown length.
    turn_limit: Duration,
    /// Computer delay before deciding.
    thinking_delay: Duration,
    /// Side whose time is being measured.
    regime: Turn,
    /// Time spent on the human's turn.
    elapsed: Duration,
    /// Time spent on the computer's turn.
    thinking_elapsed: Duration,
    /// Set once the timeout signal fired this turn.
    auto_move_made: bool,
}

impl TurnClock {
    /// Creates a clock with explicit durations, starting on the human's turn.
    pub fn new(turn_limit: Duration, thinking_delay: Duration) -> Self {
        Self {
            turn_limit,
            thinking_delay,
            regime: Turn::Human,
            elapsed: Duration::ZERO,
            thinking_elapsed: Duration::ZERO,
            auto_move_made: false,
        }
    }

    /// Creates a clock from configured durations.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.turn_limit(), config.thinking_delay())
    }

    /// Starts measuring `turn` from zero.
    pub fn reset(&mut self, turn: Turn) {
        self.regime = turn;
        self.elapsed = Duration::ZERO;
        self.thinking_elapsed = Duration::ZERO;
        self.auto_move_made = false;
    }

    /// Adds `delta` to the running side's time and reports what is due.
    pub fn advance(&mut self, delta: Duration) -> ClockSignal {
        match self.regime {
            Turn::Human => {
                if self.auto_move_made {
                    return ClockSignal::Pending;
                }
                self.elapsed = self.elapsed.saturating_add(delta);
                if self.elapsed >= self.turn_limit {
                    self.auto_move_made = true;
                    debug!(elapsed = ?self.elapsed, "Human turn limit reached");
                    ClockSignal::HumanTimedOut
                } else {
                    ClockSignal::Pending
                }
            }
            Turn::Computer => {
                self.thinking_elapsed = self.thinking_elapsed.saturating_add(delta);
                if self.thinking_elapsed >= self.thinking_delay {
                    ClockSignal::ComputerReady
                } else {
                    ClockSignal::Pending
                }
            }
        }
    }

    /// Time left on the human's countdown, `None` on the computer's turn.
    pub fn human_time_remaining(&self) -> Option<Duration> {
        match self.regime {
            Turn::Human => Some(self.turn_limit.saturating_sub(self.elapsed)),
            Turn::Computer => None,
        }
    }

    /// Urgency of the human's countdown, `None` on the computer's turn.
    pub fn urgency(&self) -> Option<TimerUrgency> {
        self.human_time_remaining().map(TimerUrgency::from_remaining)
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
