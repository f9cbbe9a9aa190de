//! Cancellable one-shot and repeating timers, polled by the owner.

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    AutoAdvance,
    ClockTick,
}

/// Identifies a scheduled timer and the session generation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub due_ms: i64,
}

#[derive(Debug)]
struct Scheduled {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: i64,
    interval_ms: Option<i64>,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    entries: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(&mut self, kind: TimerKind, due_ms: i64, generation: u64) -> TimerHandle {
        self.push(kind, due_ms, None, generation)
    }

    /// First firing one interval after `now_ms`.
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        now_ms: i64,
        interval_ms: i64,
        generation: u64,
    ) -> TimerHandle {
        let interval_ms = interval_ms.max(1);
        self.push(
            kind,
            now_ms.saturating_add(interval_ms),
            Some(interval_ms),
            generation,
        )
    }

    fn push(
        &mut self,
        kind: TimerKind,
        due_ms: i64,
        interval_ms: Option<i64>,
        generation: u64,
    ) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            generation,
        };
        self.entries.push(Scheduled {
            handle,
            kind,
            due_ms,
            interval_ms,
        });
        handle
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_due(&self) -> Option<i64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Remove and return every timer due at `now_ms`, earliest first.
    ///
    /// A repeating timer fires at most once per call and is rescheduled
    /// one interval after `now_ms`, so a stalled loop does not replay
    /// missed ticks.
    pub fn pop_due(&mut self, now_ms: i64) -> Vec<FiredTimer> {
        let mut fired = Vec::new();

        self.entries.retain_mut(|entry| {
            if entry.due_ms > now_ms {
                return true;
            }
            fired.push(FiredTimer {
                handle: entry.handle,
                kind: entry.kind,
                due_ms: entry.due_ms,
            });
            match entry.interval_ms {
                Some(interval) => {
                    entry.due_ms = now_ms.saturating_add(interval);
                    true
                }
                None => false,
            }
        });

        fired.sort_by_key(|f| (f.due_ms, f.handle.id));
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule_once(TimerKind::AutoAdvance, 1500, 1);

        assert!(timers.pop_due(1499).is_empty());
        let fired = timers.pop_due(1500);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, handle);
        assert_eq!(fired[0].kind, TimerKind::AutoAdvance);
        assert!(timers.pop_due(5000).is_empty());
        assert!(!timers.is_scheduled(handle));
    }

    #[test]
    fn test_repeating_reschedules_without_backlog() {
        let mut timers = TimerQueue::new();
        timers.schedule_repeating(TimerKind::ClockTick, 0, 1000, 1);

        assert_eq!(timers.next_due(), Some(1000));
        assert_eq!(timers.pop_due(1000).len(), 1);
        assert_eq!(timers.next_due(), Some(2000));

        // Loop stalled for several intervals: still a single firing
        assert_eq!(timers.pop_due(5500).len(), 1);
        assert_eq!(timers.next_due(), Some(6500));
    }

    #[test]
    fn test_far_deadlines_saturate() {
        let mut timers = TimerQueue::new();
        timers.schedule_repeating(TimerKind::ClockTick, 10, i64::MAX, 1);
        assert_eq!(timers.next_due(), Some(i64::MAX));
        assert!(timers.pop_due(i64::MAX - 1).is_empty());

        // Firing at the very end of time reschedules without overflowing
        assert_eq!(timers.pop_due(i64::MAX).len(), 1);
        assert_eq!(timers.next_due(), Some(i64::MAX));
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let tick = timers.schedule_repeating(TimerKind::ClockTick, 0, 1000, 1);
        let advance = timers.schedule_once(TimerKind::AutoAdvance, 1500, 1);

        assert!(timers.cancel(advance));
        assert!(!timers.cancel(advance));
        assert_eq!(timers.next_due(), Some(1000));

        timers.cancel_all();
        assert!(timers.is_empty());
        assert!(!timers.is_scheduled(tick));
        assert_eq!(timers.next_due(), None);
    }

    #[test]
    fn test_fired_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.schedule_once(TimerKind::AutoAdvance, 1500, 3);
        timers.schedule_repeating(TimerKind::ClockTick, 0, 1000, 3);

        let fired = timers.pop_due(2000);
        let kinds: Vec<_> = fired.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![TimerKind::ClockTick, TimerKind::AutoAdvance]);
        assert!(fired.iter().all(|f| f.handle.generation == 3));
    }
}
