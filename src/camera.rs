//! Pointer look: mouse-driven yaw/pitch for the scene camera.
//!
//! Starts disabled. The intro sequence turns it off for the cutscene and
//! back on once the camera has settled.

mod entities;
mod systems;

pub use entities::{LookCamera, PointerLook};

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};

use crate::GameState;

/// Per-plugin configuration for pointer look.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// Horizontal mouse sensitivity (radians per pixel).
    pub mouse_sensitivity_x: f32,
    /// Vertical mouse sensitivity (radians per pixel).
    pub mouse_sensitivity_y: f32,
    /// Margin from vertical to prevent camera flip (radians).
    pub pitch_margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity_x: 0.003,
            mouse_sensitivity_y: 0.002,
            pitch_margin: 0.05,
        }
    }
}

/// Mouse look on the [`LookCamera`], gated by [`PointerLook`].
pub struct CameraPlugin(pub CameraConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraConfig>()
            .register_type::<PointerLook>()
            .insert_resource(self.0.clone())
            .init_resource::<PointerLook>()
            .add_systems(
                Update,
                systems::look_around
                    .run_if(|look: Res<PointerLook>| look.is_enabled())
                    .run_if(not(in_state(GameState::Debugging))),
            );
    }
}

/// Hides and locks the cursor, or frees it.
pub fn apply_cursor_lock(opts: &mut CursorOptions, locked: bool) {
    if locked {
        opts.visible = false;
        opts.grab_mode = CursorGrabMode::Locked;
    } else {
        opts.visible = true;
        opts.grab_mode = CursorGrabMode::None;
    }
}
