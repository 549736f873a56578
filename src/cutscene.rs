//! Intro camera cutscene.
//!
//! Holds the camera at its rest pose, tilts it from looking straight down to
//! level, then turns it a quarter left back onto the rest pose. The intro
//! sequence plays it and waits for [`CameraCutscene::is_complete`]; this
//! plugin only applies the resulting pose to the [`CutsceneCamera`].

mod entities;
mod systems;

pub use entities::{CameraCutscene, CutsceneCamera, CutscenePhase, rest_pose, tilt_pose};

use bevy::prelude::*;

use crate::SequenceSet;
use crate::math::EasingCurve;

/// Per-plugin configuration for the camera cutscene.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CutsceneConfig {
    /// Duration of the tilt from looking down to level (seconds).
    pub first_rotation_duration: f32,
    /// Duration of the quarter turn (seconds).
    pub second_rotation_duration: f32,
    /// Hold at the rest pose before the tilt starts (seconds).
    pub start_delay: f32,
    /// Easing applied to both rotations.
    pub curve: EasingCurve,
}

impl Default for CutsceneConfig {
    fn default() -> Self {
        Self {
            first_rotation_duration: 2.0,
            second_rotation_duration: 2.0,
            start_delay: 0.5,
            curve: EasingCurve::EaseInOut,
        }
    }
}

/// Camera spawn and cutscene pose application.
pub struct CutscenePlugin(pub CutsceneConfig);

impl Plugin for CutscenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CutsceneConfig>()
            .register_type::<CutsceneCamera>()
            .insert_resource(self.0.clone())
            .insert_resource(CameraCutscene::new(&self.0))
            .configure_sets(Update, (SequenceSet::Drive, SequenceSet::Present).chain())
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                systems::apply_cutscene_pose
                    .in_set(SequenceSet::Present)
                    .run_if(resource_changed::<CameraCutscene>),
            );
    }
}
