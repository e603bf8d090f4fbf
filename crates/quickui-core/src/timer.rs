//! One-shot and periodic timers owned by windows
//!
//! The set is polled once per frame with the driver's current time; expired
//! timers are handed back in due order and the coordinator calls the owning
//! window's `on_timer`. A periodic timer that falls more than one period
//! behind skips the missed periods instead of firing repeatedly.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use log::{debug, warn};

use crate::error::{UiError, UiResult};
use crate::window::WindowId;

/// Maximum number of live timers
pub const MAX_TIMERS: usize = 16;

/// Handle returned when a timer is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u16);

#[derive(Debug, Clone, Copy)]
struct Timer {
    id: TimerId,
    owner: WindowId,
    due: Instant,
    period: Option<Duration>,
}

/// A timer that expired during [`TimerSet::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired {
    pub id: TimerId,
    pub owner: WindowId,
    /// How long after its due time the timer was noticed
    pub lateness: Duration,
    due: Instant,
}

/// Table of scheduled timers.
#[derive(Debug)]
pub struct TimerSet {
    timers: Vec<Timer, MAX_TIMERS>,
    now: Instant,
    next_id: u16,
}

impl TimerSet {
    /// An empty set whose clock starts at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            timers: Vec::new(),
            now,
            next_id: 0,
        }
    }

    /// Time of the last [`update`](Self::update).
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fire every `interval` until cancelled, first after one interval.
    pub fn repeat(&mut self, owner: WindowId, interval: Duration) -> UiResult<TimerId> {
        self.schedule(owner, interval, Some(interval))
    }

    /// Fire once after `delay`.
    pub fn once(&mut self, owner: WindowId, delay: Duration) -> UiResult<TimerId> {
        self.schedule(owner, delay, None)
    }

    fn schedule(
        &mut self,
        owner: WindowId,
        delay: Duration,
        period: Option<Duration>,
    ) -> UiResult<TimerId> {
        let id = self.allocate_id();
        let timer = Timer {
            id,
            owner,
            due: self.now + delay,
            period,
        };
        self.timers.push(timer).map_err(|_| {
            warn!("Timer table full, cannot schedule for {:?}", owner);
            UiError::TimerCapacityExceeded { max: MAX_TIMERS }
        })?;
        debug!("Scheduled {:?} for {:?} in {}ms", id, owner, delay.as_millis());
        Ok(id)
    }

    fn allocate_id(&mut self) -> TimerId {
        loop {
            let id = TimerId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.timers.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    /// Remove a timer. Returns false if it was not scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Remove every timer owned by `owner`.
    pub fn cancel_owned_by(&mut self, owner: WindowId) {
        self.timers.retain(|t| t.owner != owner);
    }

    /// Advance the clock to `now` and collect the timers that expired.
    ///
    /// One-shot timers are removed; periodic timers are rescheduled one
    /// period after their due time, or one period from `now` when they
    /// have fallen further behind.
    pub fn update(&mut self, now: Instant) -> Vec<Expired, MAX_TIMERS> {
        self.now = now;
        let mut expired: Vec<Expired, MAX_TIMERS> = Vec::new();

        for timer in self.timers.iter_mut() {
            if timer.due > now {
                continue;
            }
            let lateness = now
                .checked_duration_since(timer.due)
                .unwrap_or(Duration::from_ticks(0));
            // Capacity matches the timer table, so this cannot overflow
            let _ = expired.push(Expired {
                id: timer.id,
                owner: timer.owner,
                lateness,
                due: timer.due,
            });
            if let Some(period) = timer.period {
                timer.due += period;
                if timer.due <= now {
                    timer.due = now + period;
                }
            }
        }

        self.timers
            .retain(|t| t.period.is_some() || !expired.iter().any(|e| e.id == t.id));
        expired.sort_unstable_by_key(|e| e.due);
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimension;
    use crate::window::WindowTree;

    fn owner() -> WindowId {
        WindowTree::new(Dimension::new(10, 10)).root()
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_once_fires_once() {
        let mut timers = TimerSet::new(at(0));
        let id = timers.once(owner(), Duration::from_millis(100)).unwrap();
        assert!(timers.update(at(99)).is_empty());

        let fired = timers.update(at(130));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, id);
        assert_eq!(fired[0].lateness, Duration::from_millis(30));
        assert!(timers.is_empty());
        assert!(timers.update(at(500)).is_empty());
    }

    #[test]
    fn test_repeat_skips_missed_periods() {
        let mut timers = TimerSet::new(at(0));
        timers.repeat(owner(), Duration::from_millis(250)).unwrap();

        assert_eq!(timers.update(at(250)).len(), 1);
        // Stalled for several periods: one delivery, then back on a fresh period
        let fired = timers.update(at(1200));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].lateness, Duration::from_millis(700));
        assert!(timers.update(at(1449)).is_empty());
        assert_eq!(timers.update(at(1450)).len(), 1);
    }

    #[test]
    fn test_expired_in_due_order() {
        let mut timers = TimerSet::new(at(0));
        let late = timers.once(owner(), Duration::from_millis(50)).unwrap();
        let early = timers.once(owner(), Duration::from_millis(10)).unwrap();
        let fired = timers.update(at(60));
        assert_eq!(fired.iter().map(|e| e.id).collect::<alloc::vec::Vec<_>>(), [early, late]);
    }

    #[test]
    fn test_cancel_and_capacity() {
        let mut timers = TimerSet::new(at(0));
        let w = owner();
        let mut ids = alloc::vec::Vec::new();
        for _ in 0..MAX_TIMERS {
            ids.push(timers.repeat(w, Duration::from_millis(10)).unwrap());
        }
        assert_eq!(
            timers.once(w, Duration::from_millis(1)),
            Err(UiError::TimerCapacityExceeded { max: MAX_TIMERS })
        );
        assert!(timers.cancel(ids[0]));
        assert!(!timers.cancel(ids[0]));
        assert_eq!(timers.len(), MAX_TIMERS - 1);

        timers.cancel_owned_by(w);
        assert!(timers.is_empty());
    }
}
