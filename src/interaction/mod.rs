//! Interaction module: gaze detection, pickups, the terminal gate, and their ECS glue.
pub mod components;
pub mod config;
pub mod context;
pub mod controller;
pub mod errors;
pub mod gaze;
pub mod inventory;
pub mod plugin;
pub mod registry;
pub mod systems;
pub mod terminal;
pub mod types;

pub use plugin::InteractionPlugin;
