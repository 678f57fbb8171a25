use bevy::prelude::*;

mod core;
mod interaction;
mod ui;
mod world;

use crate::{
    core::CorePlugin, interaction::InteractionPlugin, ui::HudPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Repair Station".to_string(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin,
            WorldPlugin,
            HudPlugin,
            InteractionPlugin, // Binds controllers in PostStartup, after the scene exists
        ))
        .run();
}
