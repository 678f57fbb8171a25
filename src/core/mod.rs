//! Core module: session clock, deferred scheduling, and session termination.
pub mod plugin;
pub mod schedule;
pub mod session;

pub use plugin::CorePlugin;
