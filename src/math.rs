//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Quat` inputs, making them straightforward to unit-test.

use bevy::prelude::{EulerRot, Quat, Reflect};

/// Cubic ease-out curve: fast start, gentle deceleration.
///
/// `t` should be in `[0, 1]`. Returns `1 - (1 - t)^3`.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Smoothstep ease-in-out: flat tangents at both ends.
///
/// `t` should be in `[0, 1]`. Returns `3t^2 - 2t^3`.
///
/// # Examples
/// ```
/// # use scene_intro::math::ease_in_out;
/// assert_eq!(ease_in_out(0.0), 0.0);
/// assert_eq!(ease_in_out(0.5), 0.5);
/// assert_eq!(ease_in_out(1.0), 1.0);
/// ```
pub fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Maps normalized time to normalized progress for a tween.
///
/// `Sampled` holds evenly spaced samples over `[0, 1]` and interpolates
/// linearly between them, standing in for an authored animation curve.
#[derive(Clone, Debug, PartialEq, Default, Reflect)]
pub enum EasingCurve {
    /// Identity.
    Linear,
    /// [`ease_in_out`].
    #[default]
    EaseInOut,
    /// [`ease_out_cubic`].
    EaseOutCubic,
    /// Piecewise-linear lookup over evenly spaced samples.
    Sampled(Vec<f32>),
}

impl EasingCurve {
    /// Evaluates the curve at `t`, clamping `t` into `[0, 1]` first.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => ease_in_out(t),
            Self::EaseOutCubic => ease_out_cubic(t),
            Self::Sampled(samples) => sample_curve(samples, t),
        }
    }
}

fn sample_curve(samples: &[f32], t: f32) -> f32 {
    match samples.len() {
        0 => t,
        1 => samples[0],
        n => {
            let scaled = t * (n - 1) as f32;
            let i = (scaled.floor() as usize).min(n - 2);
            let frac = scaled - i as f32;
            samples[i] + (samples[i + 1] - samples[i]) * frac
        }
    }
}

/// Builds a rotation from Euler angles in degrees, applied yaw-pitch-roll.
///
/// `x` is pitch, `y` is yaw, `z` is roll, matching the `EulerRot::YXZ`
/// convention used by the camera controllers.
pub fn euler_degrees(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        y.to_radians(),
        x.to_radians(),
        z.to_radians(),
    )
}

/// Clamps a pitch angle so the camera cannot flip past vertical.
///
/// `current` is the existing pitch in radians (from `Quat::to_euler`).
/// `delta` is the desired change. The result is clamped to
/// `(-PI/2 + margin, PI/2 - margin)` and the *effective* delta is returned
/// (i.e. how much to actually rotate).
pub fn clamp_pitch(current: f32, delta: f32, margin: f32) -> f32 {
    let limit = std::f32::consts::FRAC_PI_2 - margin;
    let clamped = (current + delta).clamp(-limit, limit);
    clamped - current
}
