//! Time-bounded interpolation driven by per-tick deltas.
//!
//! A [`Tween`] owns one [`TweenSpec`] and reports the eased value each tick.
//! On the tick that reaches the duration it reports the exact `to` value, so
//! callers never inherit accumulated floating-point drift. [`TweenSequence`]
//! chains specs so each starts only after the previous one completed.

use std::collections::VecDeque;

use bevy::prelude::{Quat, Vec3};

use crate::error::SequenceError;
use crate::math::EasingCurve;

/// Values a tween can interpolate.
pub trait Lerp: Copy {
    /// Interpolates from `self` to `to` by `t` in `[0, 1]`.
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl Lerp for Quat {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

/// One transition: `from` → `to` over `duration` seconds shaped by `curve`.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec<T> {
    from: T,
    to: T,
    duration: f32,
    curve: EasingCurve,
}

impl<T: Lerp> TweenSpec<T> {
    /// Builds a spec, rejecting non-positive or non-finite durations.
    pub fn new(from: T, to: T, duration: f32, curve: EasingCurve) -> Result<Self, SequenceError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SequenceError::InvalidArgument(format!(
                "tween duration must be positive, got {duration}"
            )));
        }
        Ok(Self {
            from,
            to,
            duration,
            curve,
        })
    }

    /// Start value.
    pub fn start_value(&self) -> T {
        self.from
    }

    /// End value, reported exactly on completion.
    pub fn end_value(&self) -> T {
        self.to
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// Result of a single [`Tween::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep<T> {
    /// Interpolated value for this tick.
    pub value: T,
    /// `true` on (and after) the tick that reached the duration.
    pub finished: bool,
}

/// A running [`TweenSpec`].
#[derive(Clone, Debug)]
pub struct Tween<T> {
    spec: TweenSpec<T>,
    elapsed: f32,
    finished: bool,
}

impl<T: Lerp> Tween<T> {
    /// Starts a tween at elapsed time zero.
    pub fn new(spec: TweenSpec<T>) -> Self {
        Self {
            spec,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Advances by `dt` seconds and returns the value for this tick.
    pub fn tick(&mut self, dt: f32) -> TweenStep<T> {
        if self.finished {
            return TweenStep {
                value: self.spec.to,
                finished: true,
            };
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.spec.duration {
            self.finished = true;
            return TweenStep {
                value: self.spec.to,
                finished: true,
            };
        }

        let t = (self.elapsed / self.spec.duration).clamp(0.0, 1.0);
        let progress = self.spec.curve.evaluate(t);
        TweenStep {
            value: self.spec.from.lerp_to(self.spec.to, progress),
            finished: false,
        }
    }

    /// `true` once the final value has been reported.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Ordered chain of tweens targeting one owner; at most one is active.
#[derive(Clone, Debug, Default)]
pub struct TweenSequence<T> {
    pending: VecDeque<TweenSpec<T>>,
    active: Option<Tween<T>>,
}

impl<T: Lerp> TweenSequence<T> {
    /// Creates a sequence that runs `specs` in order.
    pub fn new(specs: impl IntoIterator<Item = TweenSpec<T>>) -> Self {
        Self {
            pending: specs.into_iter().collect(),
            active: None,
        }
    }

    /// Appends a spec to run after everything already queued.
    pub fn push(&mut self, spec: TweenSpec<T>) {
        self.pending.push_back(spec);
    }

    /// Advances the active tween, calling `on_tick` with its value.
    ///
    /// A tween that completes consumes the rest of the tick; the next spec
    /// starts on the following tick. Returns `true` once every spec has
    /// completed.
    pub fn advance(&mut self, dt: f32, mut on_tick: impl FnMut(T)) -> bool {
        if self.active.is_none() {
            self.active = self.pending.pop_front().map(Tween::new);
        }
        let Some(active) = self.active.as_mut() else {
            return true;
        };

        let step = active.tick(dt);
        on_tick(step.value);
        if step.finished {
            self.active = None;
        }
        self.is_finished()
    }

    /// `true` when nothing is running or queued.
    pub fn is_finished(&self) -> bool {
        self.active.is_none() && self.pending.is_empty()
    }

    /// Drops the active tween and everything queued.
    pub fn cancel(&mut self) {
        self.active = None;
        self.pending.clear();
    }
}
