use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use super::CameraConfig;
use super::entities::LookCamera;
use crate::math;

/// Mouse look: yaw (horizontal) + clamped pitch (vertical).
pub fn look_around(
    mut mouse_motion: MessageReader<MouseMotion>,
    cfg: Res<CameraConfig>,
    mut query: Query<&mut Transform, With<LookCamera>>,
) {
    let mut yaw = 0.0;
    let mut pitch = 0.0;
    for ev in mouse_motion.read() {
        yaw -= ev.delta.x * cfg.mouse_sensitivity_x;
        pitch -= ev.delta.y * cfg.mouse_sensitivity_y;
    }
    if yaw == 0.0 && pitch == 0.0 {
        return;
    }

    for mut transform in &mut query {
        if yaw != 0.0 {
            transform.rotate_y(yaw);
        }
        if pitch != 0.0 {
            let (_, current_pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
            let pitch_delta = math::clamp_pitch(current_pitch, pitch, cfg.pitch_margin);
            transform.rotate_local_x(pitch_delta);
        }
    }
}
