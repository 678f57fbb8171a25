//! ECS components and resources for the interaction host layer.
use bevy::prelude::*;

use super::{controller::PickupController, terminal::TerminalGate};

/// Axis-aligned hit box used for gaze tests, scaled by the entity's transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct CollisionBox {
    pub half_extents: Vec3,
}

impl CollisionBox {
    pub fn from_size(size: Vec3) -> Self {
        Self {
            half_extents: size * 0.5,
        }
    }
}

/// Marks the entity the terminal gate is bound to.
#[derive(Component, Debug, Default)]
pub struct TerminalStation;

/// Controllers resolved once at startup and ticked every frame.
#[derive(Resource, Debug)]
pub struct InteractionDrivers {
    pub pickups: Vec<PickupController>,
    pub terminal: Option<TerminalGate>,
    pub initialized: bool,
}
