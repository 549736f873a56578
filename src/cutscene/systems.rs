use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use super::entities::{CameraCutscene, CutsceneCamera, rest_pose};
use crate::camera::LookCamera;

/// Spawns the scene camera at its rest pose.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, 1.6, 0.0).with_rotation(rest_pose()),
        CutsceneCamera,
        LookCamera,
    ));
}

/// Copies the cutscene pose onto the camera.
pub fn apply_cutscene_pose(
    cutscene: Res<CameraCutscene>,
    mut query: Query<&mut Transform, With<CutsceneCamera>>,
) {
    let Some(pose) = cutscene.orientation() else {
        return;
    };
    for mut transform in &mut query {
        transform.rotation = pose;
    }
}
