//! Sampling state machine for a periodically refreshed countdown display.
//!
//! `Loading -> Counting -> Reached`, one-directional. Once `Reached` has been
//! reported the ticker is stopped and later ticks do no work.

use crate::countdown::{Countdown, Policy, TargetInstant, decompose};

/// Whether the display is filled at start or only on the first interval tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstSample {
    Immediate,
    OnFirstTick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickState {
    /// Placeholder shown until the first tick.
    Loading,
    Counting,
    Reached,
}

#[derive(Clone, Debug)]
pub struct Ticker {
    target: TargetInstant,
    policy: Policy,
    first_sample: FirstSample,
    state: TickState,
    samples: u64,
}

impl Ticker {
    pub fn new(target: TargetInstant, policy: Policy, first_sample: FirstSample) -> Self {
        let state = match first_sample {
            FirstSample::Immediate => TickState::Counting,
            FirstSample::OnFirstTick => TickState::Loading,
        };
        Self {
            target,
            policy,
            first_sample,
            state,
            samples: 0,
        }
    }

    pub fn state(&self) -> TickState {
        self.state
    }

    /// Number of decompositions performed so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// True once `Reached` has been reported; the periodic trigger should be cancelled.
    pub fn is_stopped(&self) -> bool {
        self.state == TickState::Reached
    }

    /// Called once when the display appears. Samples only for `FirstSample::Immediate`.
    pub fn start(&mut self, now_millis: i64) -> Option<Countdown> {
        match self.first_sample {
            FirstSample::Immediate if self.samples == 0 && !self.is_stopped() => {
                Some(self.sample(now_millis))
            }
            _ => None,
        }
    }

    /// Called on every interval tick. Returns `None` after `Reached`.
    pub fn tick(&mut self, now_millis: i64) -> Option<Countdown> {
        if self.is_stopped() {
            return None;
        }
        Some(self.sample(now_millis))
    }

    fn sample(&mut self, now_millis: i64) -> Countdown {
        let countdown = decompose(self.target, now_millis, self.policy);
        self.samples += 1;
        self.state = if countdown.is_reached() {
            TickState::Reached
        } else {
            TickState::Counting
        };
        countdown
    }
}
