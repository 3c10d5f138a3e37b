//! Virtual-clock timer queue shared by every controller on the page.
//!
//! All callbacks run on one logical thread: the runtime pops due timers one at
//! a time and hands each task to its owning controller before popping the next.

use std::{collections::BTreeMap, time::Duration};

use shared::domain::{FormKind, NotificationId};
use tracing::warn;

/// Shortest period an interval may re-arm with.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    CarouselAdvance,
    SubmissionComplete(FormKind),
    NotificationSlideOut(NotificationId),
    NotificationRemove(NotificationId),
    ContactMessageClear,
}

#[derive(Debug, Clone)]
struct TimerEntry {
    due: Duration,
    period: Option<Duration>,
    task: TimerTask,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, TimerEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn set_timeout(&mut self, delay: Duration, task: TimerTask) -> TimerHandle {
        self.insert(delay, None, task)
    }

    /// Periods below [`MIN_INTERVAL`] are raised to it so a due interval
    /// always moves forward in time.
    pub fn set_interval(&mut self, period: Duration, task: TimerTask) -> TimerHandle {
        let period = if period < MIN_INTERVAL {
            warn!(?period, ?task, "interval period too short; using minimum");
            MIN_INTERVAL
        } else {
            period
        };
        self.insert(period, Some(period), task)
    }

    /// Cancels the timer in `slot` (if any) and stores a fresh interval in its place.
    pub fn restart_interval(
        &mut self,
        slot: &mut Option<TimerHandle>,
        period: Duration,
        task: TimerTask,
    ) {
        self.clear_slot(slot);
        *slot = Some(self.set_interval(period, task));
    }

    /// Cancels the timer in `slot` (if any) and stores a fresh timeout in its place.
    pub fn restart_timeout(
        &mut self,
        slot: &mut Option<TimerHandle>,
        delay: Duration,
        task: TimerTask,
    ) {
        self.clear_slot(slot);
        *slot = Some(self.set_timeout(delay, task));
    }

    pub fn clear(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    pub fn clear_slot(&mut self, slot: &mut Option<TimerHandle>) {
        if let Some(handle) = slot.take() {
            self.clear(handle);
        }
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn live_count(&self, task: TimerTask) -> usize {
        self.timers
            .values()
            .filter(|entry| entry.task == task)
            .count()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|entry| entry.due).min()
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving the clock to its due time. Intervals are re-armed one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerTask)> {
        let (handle, due) = self
            .timers
            .iter()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(handle, entry)| (entry.due, **handle))
            .map(|(handle, entry)| (*handle, entry.due))?;

        self.now = self.now.max(due);
        let entry = self.timers.get_mut(&handle)?;
        let task = entry.task;
        if let Some(period) = entry.period {
            entry.due = due + period;
        } else {
            self.timers.remove(&handle);
        }
        Some((handle, task))
    }

    /// Moves the clock forward without firing anything; callers drain
    /// [`Scheduler::pop_due`] first.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(
            handle,
            TimerEntry {
                due: self.now + delay,
                period,
                task,
            },
        );
        handle
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
