//! Typewriter-style reveal of a line, one visible character per interval.
//!
//! The counter starts at zero when a reveal begins and steps once per
//! `interval` until it reaches the line length. One further interval after
//! the last character ends the reveal, so a line of `n` characters reads for
//! `n + 1` intervals.

pub mod markup;

use bevy::prelude::Reflect;

use crate::error::SequenceError;

/// Seconds per character when nothing else is configured.
pub const DEFAULT_INTERVAL: f32 = 0.04;

/// Where a reveal is in its lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum RevealState {
    /// Nothing started, or the last reveal was cancelled.
    #[default]
    Idle,
    /// Characters are still appearing.
    Revealing,
    /// Every character is visible.
    Complete,
}

/// Visible-character counter driven by per-tick deltas.
#[derive(Clone, Debug, Reflect)]
pub struct TextReveal {
    interval: f32,
    total: usize,
    visible: usize,
    step: usize,
    timer: f32,
    state: RevealState,
}

impl Default for TextReveal {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            total: 0,
            visible: 0,
            step: 0,
            timer: 0.0,
            state: RevealState::Idle,
        }
    }
}

impl TextReveal {
    /// Creates an idle reveal that shows one character every `interval`
    /// seconds. Zero reveals instantly; negative or non-finite intervals are
    /// rejected.
    pub fn new(interval: f32) -> Result<Self, SequenceError> {
        if !interval.is_finite() || interval < 0.0 {
            return Err(SequenceError::InvalidArgument(format!(
                "reveal interval must be finite and non-negative, got {interval}"
            )));
        }
        Ok(Self {
            interval,
            ..Default::default()
        })
    }

    /// Starts revealing `total` characters, replacing any reveal in flight.
    pub fn start(&mut self, total: usize) {
        self.total = total;
        self.visible = 0;
        self.step = 0;
        self.timer = 0.0;
        self.state = RevealState::Revealing;
    }

    /// Advances by `dt` seconds. Returns `true` if the visible count or the
    /// state changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.state != RevealState::Revealing {
            return false;
        }
        if self.interval <= 0.0 {
            self.finish();
            return true;
        }

        let mut changed = false;
        self.timer += dt.max(0.0);
        while self.state == RevealState::Revealing && self.timer >= self.interval {
            self.timer -= self.interval;
            self.step += 1;
            if self.step > self.total {
                self.state = RevealState::Complete;
            } else {
                self.visible = self.step;
            }
            changed = true;
        }
        changed
    }

    /// Shows the whole line immediately. No-op unless revealing.
    pub fn force_complete(&mut self) {
        if self.state == RevealState::Revealing {
            self.finish();
        }
    }

    /// Stops the reveal where it is.
    pub fn cancel(&mut self) {
        self.state = RevealState::Idle;
        self.timer = 0.0;
    }

    fn finish(&mut self) {
        self.visible = self.total;
        self.state = RevealState::Complete;
    }

    /// `true` while characters are still appearing.
    pub fn is_revealing(&self) -> bool {
        self.state == RevealState::Revealing
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Characters currently visible, `0..=total`.
    pub fn visible_characters(&self) -> usize {
        self.visible
    }

    /// Length of the line being revealed.
    pub fn total_characters(&self) -> usize {
        self.total
    }

    /// Seconds per character.
    pub fn interval(&self) -> f32 {
        self.interval
    }
}
