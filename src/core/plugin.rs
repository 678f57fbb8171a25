//! CorePlugin wires the per-frame session clock that drives deferred actions.
use bevy::prelude::*;
use std::time::Duration;

/// Upper bound applied to a single frame delta so a stalled frame cannot fire
/// every pending timer at once.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Tracks frame count and elapsed session time derived from real frame deltas.
#[derive(Resource, Debug, Default)]
pub struct SessionClock {
    frame: u64,
    last_delta: Duration,
    elapsed: Duration,
}

impl SessionClock {
    /// Number of frames the clock has observed.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Delta applied on the most recent frame (after clamping).
    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }

    /// Total session time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advances the clock by one frame.
    pub fn tick(&mut self, real_delta: Duration) {
        self.frame = self.frame.saturating_add(1);
        self.last_delta = real_delta.min(MAX_FRAME_DELTA);
        self.elapsed += self.last_delta;
    }
}

/// Registers the session clock and its update system.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionClock>()
            .add_systems(Startup, log_session_start)
            .add_systems(First, update_session_clock);
    }
}

fn update_session_clock(mut clock: ResMut<SessionClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_session_start() {
    info!(
        "CorePlugin initialised (frame delta capped at {} ms)",
        MAX_FRAME_DELTA.as_millis()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates_frames_and_time() {
        let mut clock = SessionClock::default();
        clock.tick(Duration::from_millis(16));
        clock.tick(Duration::from_millis(20));

        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.last_delta(), Duration::from_millis(20));
        assert_eq!(clock.elapsed(), Duration::from_millis(36));
    }

    #[test]
    fn clock_caps_stalled_frames() {
        let mut clock = SessionClock::default();
        clock.tick(Duration::from_secs(4));

        assert_eq!(clock.last_delta(), MAX_FRAME_DELTA);
        assert_eq!(clock.elapsed(), MAX_FRAME_DELTA);
    }
}
