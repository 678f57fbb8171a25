// src/ui/hud/plugin.rs
//
// HudPlugin registers HUD resources and the panel visibility sync.

use bevy::prelude::*;

use super::components::{HudSettings, HudVisibility};
use super::systems::{apply_hud_visibility, spawn_hud};

/// Plugin providing the screen-space HUD.
///
/// # System Ordering
///
/// 1. `spawn_hud` - builds every panel hidden (Startup)
/// 2. `apply_hud_visibility` - copies `HudVisibility` onto panel nodes (PostUpdate),
///    after the interaction driver has written this frame's state in Update
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudSettings>()
            .init_resource::<HudVisibility>()
            .add_systems(Startup, spawn_hud)
            .add_systems(PostUpdate, apply_hud_visibility);

        info!("HudPlugin registered");
    }
}
