use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Handle of a scheduled task. Ids are never reused within a [`Schedule`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

#[derive(Clone, Debug, PartialEq)]
struct Entry<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// Cancellable list of delayed tasks on a virtual clock.
///
/// The clock only moves when the owner pops due tasks or settles it, so a
/// task that was cancelled can never be observed afterwards. Tasks due at the
/// same instant come out in scheduling order.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Entry<T>>,
}

impl<T> Schedule<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current position of the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule_in(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        log::trace!("schedule {:?} at {:?}", id, due);
        self.pending.push(Entry { id, due, task });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        before != self.pending.len()
    }

    /// Drops every pending task, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        if count > 0 {
            log::trace!("cancel {} pending tasks", count);
        }
        self.pending.clear();
        count
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|entry| entry.id == id)
    }

    pub fn pending_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.pending.iter().map(|entry| entry.id)
    }

    pub fn pending_tasks(&self) -> impl Iterator<Item = &T> + '_ {
        self.pending.iter().map(|entry| &entry.task)
    }

    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|entry| entry.due).min()
    }

    /// Time left until the earliest deadline, zero if already overdue.
    pub fn time_to_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_sub(self.now))
    }

    /// Removes the earliest task due no later than `until` and moves the clock
    /// to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, T)> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(position, _)| position)?;
        let Entry { id, due, task } = self.pending.remove(position);
        self.now = self.now.max(due);
        Some((id, task))
    }

    /// Moves the clock forward to `until` without running anything.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn pops_in_deadline_then_schedule_order() {
        let mut schedule = Schedule::new();
        schedule.schedule_in(ms(20), 'b');
        schedule.schedule_in(ms(10), 'a');
        schedule.schedule_in(ms(20), 'c');

        let mut fired = alloc::vec::Vec::new();
        while let Some((_, task)) = schedule.pop_due(ms(100)) {
            fired.push(task);
        }

        assert_eq!(fired, ['a', 'b', 'c']);
        assert_eq!(schedule.now(), ms(20));
    }

    #[test]
    fn does_not_pop_future_tasks() {
        let mut schedule = Schedule::new();
        schedule.schedule_in(ms(50), ());

        assert!(schedule.pop_due(ms(49)).is_none());
        assert_eq!(schedule.time_to_next(), Some(ms(50)));
        schedule.settle(ms(49));
        assert_eq!(schedule.time_to_next(), Some(ms(1)));
    }

    #[test]
    fn cancelled_ids_stay_dead() {
        let mut schedule = Schedule::new();
        let first = schedule.schedule_in(ms(5), 1);
        assert_eq!(schedule.cancel_all(), 1);
        let second = schedule.schedule_in(ms(5), 2);

        assert_ne!(first, second);
        assert!(!schedule.is_pending(first));
        assert!(!schedule.cancel(first));
        assert_eq!(schedule.pop_due(ms(5)), Some((second, 2)));
    }

    #[test]
    fn delays_are_relative_to_the_clock() {
        let mut schedule = Schedule::new();
        schedule.settle(ms(100));
        schedule.schedule_in(ms(10), ());

        assert_eq!(schedule.next_deadline(), Some(ms(110)));
    }
}
