//! Rest countdown between exercises.
//!
//! A countdown only exists while the progression machine is resting. It
//! ticks once per second; the tick that reaches zero reports expiry, and the
//! owner is expected to leave the resting phase, dropping the countdown.

use crate::{RestDuration, RestState};

/// Result of one countdown tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestTick {
    Remaining(u32),
    Expired,
}

/// A running rest period
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestCountdown {
    remaining: u32,
}

impl RestCountdown {
    /// Start a countdown at the configured duration
    ///
    /// The duration is fixed for this countdown; later changes to the
    /// configured rest only affect the next one.
    pub fn start(duration: RestDuration) -> Self {
        Self {
            remaining: duration.seconds(),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self) -> RestTick {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            RestTick::Expired
        } else {
            RestTick::Remaining(self.remaining)
        }
    }

    pub fn state(&self) -> RestState {
        RestState {
            showing: true,
            remaining_seconds: self.remaining,
        }
    }
}

/// What the rest display shows when no countdown is running
pub fn hidden_state(configured: RestDuration) -> RestState {
    RestState {
        showing: false,
        remaining_seconds: configured.seconds(),
    }
}
