// src/ui/mod.rs
//
// UI module providing screen-space HUD elements for the interaction loop.

pub mod hud;

// Re-export the main plugin
pub use hud::HudPlugin;
