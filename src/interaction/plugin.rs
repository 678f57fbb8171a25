//! InteractionPlugin wires the look-and-interact controllers into the app.
use bevy::prelude::*;

use crate::core::schedule::DeferredQueue;

#[cfg(feature = "gaze_debug")]
use super::systems::draw_gaze_ray;
use super::{
    config::InteractionSettings,
    systems::{bind_interaction_drivers, drive_interactions},
    terminal::TerminalAction,
};

/// Registers interaction settings, the terminal timer queue, and the per-frame driver.
///
/// # Dependencies
///
/// - `CorePlugin` provides the `SessionClock` that advances terminal timers.
/// - `WorldPlugin` spawns the player camera and interactables during `Startup`;
///   controllers are bound in `PostStartup` so the terminal entity exists.
/// - `HudPlugin` provides `HudVisibility`, the UI sink the controllers write to.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = InteractionSettings::load_or_default();
        info!(
            "Interaction configured: pickup range {:.1}, terminal range {:.1}, requires {}",
            settings.pickup_distance, settings.terminal_distance, settings.required_item
        );

        app.insert_resource(settings)
            .init_resource::<DeferredQueue<TerminalAction>>()
            .add_systems(PostStartup, bind_interaction_drivers)
            .add_systems(Update, drive_interactions);

        #[cfg(feature = "gaze_debug")]
        {
            app.add_systems(Update, draw_gaze_ray.after(drive_interactions));
        }
    }
}
