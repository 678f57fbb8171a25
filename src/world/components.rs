//! Components used by the world module.
use bevy::prelude::*;

/// First-person camera carried by the player, storing orientation state.
///
/// The player's `Inventory` lives on the same entity.
#[derive(Component, Debug)]
pub struct PlayerCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub walk_speed: f32,
    pub look_sensitivity: f32,
}

impl PlayerCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            walk_speed: 3.0,
            look_sensitivity: 0.15,
        }
    }

    /// Camera rotation for the stored yaw and pitch.
    pub fn rotation(&self) -> Quat {
        (Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, self.pitch))
            .normalize()
    }
}
