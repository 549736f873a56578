use bevy::prelude::*;

/// Marker for the camera that pointer look rotates.
#[derive(Component, Reflect)]
pub struct LookCamera;

/// Whether mouse motion currently turns the camera.
#[derive(Resource, Default, Reflect)]
pub struct PointerLook {
    enabled: bool,
}

impl PointerLook {
    /// Lets mouse motion turn the camera.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops mouse motion from turning the camera.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// `true` while enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
