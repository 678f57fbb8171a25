//! WorldPlugin coordinates scene setup and first-person camera controls.
use bevy::prelude::*;

use crate::world::systems::{
    player_mouse_look, player_walk, spawn_station_scene, update_cursor_grab,
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_station_scene).add_systems(
            Update,
            (
                update_cursor_grab,
                player_mouse_look.after(update_cursor_grab),
                player_walk,
            ),
        );

        info!("WorldPlugin registered");
    }
}
