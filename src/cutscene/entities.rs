use bevy::log::info;
use bevy::prelude::*;

use super::CutsceneConfig;
use crate::error::SequenceError;
use crate::math;
use crate::tween::{TweenSequence, TweenSpec};

/// Orientation held before the rotations start and snapped to afterwards.
pub fn rest_pose() -> Quat {
    math::euler_degrees(0.0, -90.0, 0.0)
}

/// Start of the first rotation (pitched 90° about X).
pub fn tilt_pose() -> Quat {
    math::euler_degrees(90.0, 0.0, 0.0)
}

/// Phase of the cutscene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum CutscenePhase {
    /// Not playing.
    #[default]
    Idle,
    /// Holding the rest pose before rotating.
    StartDelay,
    /// Running the two rotations.
    Rotating,
    /// Finished; the final pose is exact.
    Complete,
}

/// Two-step camera rotation: tilt down to level, then turn left.
///
/// The owner calls [`Self::advance`] every tick; [`Self::orientation`] is the
/// pose to apply to the camera.
#[derive(Resource, Debug)]
pub struct CameraCutscene {
    phase: CutscenePhase,
    timer: f32,
    rotations: TweenSequence<Quat>,
    orientation: Option<Quat>,
    cfg: CutsceneConfig,
}

impl CameraCutscene {
    /// An idle cutscene using `cfg` timings.
    pub fn new(cfg: &CutsceneConfig) -> Self {
        Self {
            phase: CutscenePhase::Idle,
            timer: 0.0,
            rotations: TweenSequence::default(),
            orientation: None,
            cfg: cfg.clone(),
        }
    }

    /// Snaps to the rest pose and starts the delay. Playing again after
    /// completion is refused until [`Self::reset`].
    pub fn play(&mut self) -> Result<(), SequenceError> {
        match self.phase {
            CutscenePhase::Complete => {
                return Err(SequenceError::SequenceMisuse("cutscene already played"));
            }
            CutscenePhase::StartDelay | CutscenePhase::Rotating => {
                return Err(SequenceError::SequenceMisuse("cutscene already playing"));
            }
            CutscenePhase::Idle => {}
        }

        let first = TweenSpec::new(
            tilt_pose(),
            Quat::IDENTITY,
            self.cfg.first_rotation_duration,
            self.cfg.curve.clone(),
        )?;
        let second = TweenSpec::new(
            Quat::IDENTITY,
            rest_pose(),
            self.cfg.second_rotation_duration,
            self.cfg.curve.clone(),
        )?;

        self.rotations = TweenSequence::new([first, second]);
        self.orientation = Some(rest_pose());
        self.timer = 0.0;
        self.phase = CutscenePhase::StartDelay;
        Ok(())
    }

    /// Advances by `dt` seconds. Returns `true` if the orientation changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        match self.phase {
            CutscenePhase::StartDelay => {
                self.timer += dt;
                if self.timer >= self.cfg.start_delay {
                    self.phase = CutscenePhase::Rotating;
                }
                false
            }
            CutscenePhase::Rotating => {
                let mut pose = self.orientation;
                let done = self.rotations.advance(dt, |q| pose = Some(q));
                self.orientation = pose;
                if done {
                    // Land exactly on the rest pose regardless of curve drift.
                    self.orientation = Some(rest_pose());
                    self.phase = CutscenePhase::Complete;
                    info!("Camera intro cutscene completed");
                }
                true
            }
            CutscenePhase::Idle | CutscenePhase::Complete => false,
        }
    }

    /// Makes the cutscene playable again.
    pub fn reset(&mut self) {
        self.rotations.cancel();
        self.timer = 0.0;
        self.phase = CutscenePhase::Idle;
    }

    /// Current phase.
    pub fn phase(&self) -> CutscenePhase {
        self.phase
    }

    /// `true` once both rotations have finished.
    pub fn is_complete(&self) -> bool {
        self.phase == CutscenePhase::Complete
    }

    /// `true` between [`Self::play`] and completion.
    pub fn is_playing(&self) -> bool {
        matches!(
            self.phase,
            CutscenePhase::StartDelay | CutscenePhase::Rotating
        )
    }

    /// Pose to apply to the camera; `None` before the first play.
    pub fn orientation(&self) -> Option<Quat> {
        self.orientation
    }
}

/// Marker for the camera the cutscene rotates.
#[derive(Component, Reflect)]
pub struct CutsceneCamera;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EasingCurve;

    fn cfg() -> CutsceneConfig {
        CutsceneConfig {
            first_rotation_duration: 2.0,
            second_rotation_duration: 2.0,
            start_delay: 0.5,
            curve: EasingCurve::EaseInOut,
        }
    }

    fn run_to_end(cutscene: &mut CameraCutscene, dt: f32) -> usize {
        let mut ticks = 0;
        while !cutscene.is_complete() {
            cutscene.advance(dt);
            ticks += 1;
            assert!(ticks < 100_000);
        }
        ticks
    }

    #[test]
    fn play_snaps_to_rest_pose_first() {
        let mut c = CameraCutscene::new(&cfg());
        assert!(c.orientation().is_none());
        c.play().unwrap();
        assert_eq!(c.orientation(), Some(rest_pose()));
        assert_eq!(c.phase(), CutscenePhase::StartDelay);
    }

    #[test]
    fn holds_pose_during_start_delay() {
        let mut c = CameraCutscene::new(&cfg());
        c.play().unwrap();
        assert!(!c.advance(0.25));
        assert_eq!(c.orientation(), Some(rest_pose()));
    }

    #[test]
    fn first_rotation_starts_near_tilt() {
        let mut c = CameraCutscene::new(&cfg());
        c.play().unwrap();
        c.advance(0.5);
        c.advance(0.001);
        let pose = c.orientation().unwrap();
        assert!(pose.angle_between(tilt_pose()) < 0.01);
    }

    #[test]
    fn passes_through_level_between_rotations() {
        let mut c = CameraCutscene::new(&cfg());
        c.play().unwrap();
        c.advance(0.5);
        c.advance(2.0);
        assert_eq!(c.orientation(), Some(Quat::IDENTITY));
        assert!(c.is_playing());
    }

    #[test]
    fn ends_exactly_on_rest_pose() {
        let mut c = CameraCutscene::new(&cfg());
        c.play().unwrap();
        run_to_end(&mut c, 1.0 / 60.0);
        assert_eq!(c.orientation(), Some(rest_pose()));
        assert!(c.is_complete());
    }

    #[test]
    fn replay_after_completion_is_refused_until_reset() {
        let mut c = CameraCutscene::new(&cfg());
        c.play().unwrap();
        run_to_end(&mut c, 0.1);
        assert!(matches!(c.play(), Err(SequenceError::SequenceMisuse(_))));
        assert!(c.is_complete());

        c.reset();
        c.play().unwrap();
        assert!(c.is_playing());
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let mut c = CameraCutscene::new(&CutsceneConfig {
            second_rotation_duration: 0.0,
            ..cfg()
        });
        assert!(matches!(c.play(), Err(SequenceError::InvalidArgument(_))));
        assert_eq!(c.phase(), CutscenePhase::Idle);
    }
}
