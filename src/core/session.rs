//! Session termination seam.
use bevy::{app::AppExit, log::info, prelude::MessageWriter};

/// Host hook that ends the running session.
pub trait SessionControl {
    fn terminate(&mut self);
}

impl SessionControl for MessageWriter<'_, AppExit> {
    fn terminate(&mut self) {
        info!("Session terminating");
        self.write(AppExit::Success);
    }
}

/// Counts termination requests; used by tests in place of the app exit writer.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub terminations: u32,
}

#[cfg(test)]
impl SessionControl for RecordingSession {
    fn terminate(&mut self) {
        self.terminations += 1;
    }
}
