// src/ui/hud/mod.rs
//
// HUD module: crosshair plus the prompt, inventory, and terminal panels.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::HudPlugin;
