//! Engine-owned timer set.
//!
//! Every deferred mutation is a [`TimerAction`] value sitting in the
//! set until the engine polls past its deadline. Cancellation removes
//! the entry itself, so a cancelled timer can never fire: there is no
//! callback left anywhere to run.

use chrono::{DateTime, Duration, Utc};

pub type TimerId = u64;

/// Deferred mutations the engine can schedule against itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// reserving → reserved, gateway status=reserved
    ConfirmReservation,
    /// scanning → rideStarting (direct path writes in_use here)
    AcceptScan { direct: bool },
    /// rideStarting → riding (reserve path writes in_use here)
    StartRide { direct: bool },
    /// finding → remembered prior phase
    ResolveFind,
    /// ending → completed, gateway status=available
    CompleteRide,
    /// completed → idle, clears the active vehicle
    ReturnHome,
    /// repeating GPS ping log line
    GpsPing,
    /// repeating ride stats recompute
    MetricsTick,
}

#[derive(Debug)]
struct OneShot {
    id: TimerId,
    due_at: DateTime<Utc>,
    action: TimerAction,
}

#[derive(Debug)]
struct Repeating {
    id: TimerId,
    next_due: DateTime<Utc>,
    period: Duration,
    action: TimerAction,
}

#[derive(Debug, Default)]
pub struct TimerSet {
    next_id: TimerId,
    one_shots: Vec<OneShot>,
    repeating: Vec<Repeating>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(
        &mut self,
        now: DateTime<Utc>,
        delay_ms: i64,
        action: TimerAction,
    ) -> TimerId {
        let id = self.alloc_id();
        self.one_shots.push(OneShot {
            id,
            due_at: now + Duration::milliseconds(delay_ms),
            action,
        });
        id
    }

    pub fn schedule_repeating(
        &mut self,
        now: DateTime<Utc>,
        period_ms: i64,
        action: TimerAction,
    ) -> TimerId {
        let id = self.alloc_id();
        let period = Duration::milliseconds(period_ms);
        self.repeating.push(Repeating {
            id,
            next_due: now + period,
            period,
            action,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.one_shots.retain(|t| t.id != id);
        self.repeating.retain(|t| t.id != id);
    }

    /// Drop every pending timer, one-shot and repeating alike.
    pub fn clear(&mut self) {
        self.one_shots.clear();
        self.repeating.clear();
    }

    pub fn pending(&self) -> usize {
        self.one_shots.len() + self.repeating.len()
    }

    pub fn pending_one_shots(&self) -> usize {
        self.one_shots.len()
    }

    /// Pop every firing due at or before `now`, ordered by deadline
    /// (schedule order breaks ties). Repeating timers emit one firing
    /// per elapsed period and stay registered.
    pub fn due(&mut self, now: DateTime<Utc>) -> Vec<TimerAction> {
        let mut fired: Vec<(DateTime<Utc>, TimerId, TimerAction)> = Vec::new();

        let mut remaining = Vec::with_capacity(self.one_shots.len());
        for timer in self.one_shots.drain(..) {
            if timer.due_at <= now {
                fired.push((timer.due_at, timer.id, timer.action));
            } else {
                remaining.push(timer);
            }
        }
        self.one_shots = remaining;

        for timer in &mut self.repeating {
            while timer.next_due <= now {
                fired.push((timer.next_due, timer.id, timer.action));
                timer.next_due += timer.period;
            }
        }

        fired.sort_by_key(|(due_at, id, _)| (*due_at, *id));
        fired.into_iter().map(|(_, _, action)| action).collect()
    }

    fn alloc_id(&mut self) -> TimerId {
        self.next_id += 1;
        self.next_id
    }
}
