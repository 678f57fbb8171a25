//! Deferred actions scheduled against session time.
use std::{fmt, time::Duration};

use bevy::prelude::*;

/// Handle returned when an action is scheduled; used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Host scheduler for deferred callbacks, expressed as action values.
pub trait Scheduler<A> {
    /// Schedules `action` to fire once `delay` has elapsed.
    fn after(&mut self, delay: Duration, action: A) -> TimerHandle;

    /// Cancels a pending action. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// An action whose delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<A> {
    pub handle: TimerHandle,
    pub action: A,
}

#[derive(Debug, Clone)]
struct PendingEntry<A> {
    handle: TimerHandle,
    due: Duration,
    action: A,
}

/// Single-threaded timer queue advanced once per frame.
#[derive(Resource, Debug)]
pub struct DeferredQueue<A: Send + Sync + 'static> {
    next_handle: u64,
    now: Duration,
    pending: Vec<PendingEntry<A>>,
}

impl<A: Send + Sync + 'static> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            now: Duration::ZERO,
            pending: Vec::new(),
        }
    }
}

impl<A: Send + Sync + 'static> DeferredQueue<A> {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time remaining until `handle` fires, if it is still pending.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.pending
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| entry.due.saturating_sub(self.now))
    }

    /// Moves time forward and returns every action that became due, earliest first.
    pub fn advance(&mut self, delta: Duration) -> Vec<Fired<A>> {
        self.now += delta;
        let now = self.now;

        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                due.push(self.pending.swap_remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by_key(|entry| (entry.due, entry.handle));
        due.into_iter()
            .map(|entry| Fired {
                handle: entry.handle,
                action: entry.action,
            })
            .collect()
    }
}

impl<A: Send + Sync + 'static> Scheduler<A> for DeferredQueue<A> {
    fn after(&mut self, delay: Duration, action: A) -> TimerHandle {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle += 1;
        self.pending.push(PendingEntry {
            handle,
            due: self.now + delay,
            action,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.handle != handle);
        self.pending.len() != before
    }
}
