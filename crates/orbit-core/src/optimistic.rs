//! Optimistic updates with rollback.
//!
//! [`Optimistic`] holds the value shown to the user (`current`) and the last
//! one known to be persisted (`durable`). A write is applied to `current`
//! immediately and handed back as a [`PendingWrite`]; once the persistence
//! attempt finishes, [`Optimistic::settle`] records the outcome.
//!
//! Writes are numbered and every write carries the changes applied before
//! it. The shown value is always the newest write that may still land on
//! disk, or the durable value when none is left. A failed write therefore
//! falls back to its pre-update value while the write that produced that
//! value is still in flight, and an older write that succeeds after a
//! rollback becomes visible again.

use std::collections::BTreeMap;
use std::future::Future;

/// A write applied in memory and waiting for its persistence outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite<T> {
    seq: u64,
    value: T,
}

impl<T> PendingWrite<T> {
    /// The value that must be persisted.
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Outcome of [`Optimistic::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The write was persisted.
    Committed,
    /// Persistence failed and the shown value fell back.
    RolledBack,
    /// Persistence failed, but a newer write is shown and carries the change.
    Superseded,
}

#[derive(Debug, Clone, Default)]
pub struct Optimistic<T> {
    current: T,
    durable: T,
    latest_seq: u64,
    durable_seq: u64,
    in_flight: BTreeMap<u64, T>,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            durable: value,
            latest_seq: 0,
            durable_seq: 0,
            in_flight: BTreeMap::new(),
        }
    }

    /// The value as the user currently sees it.
    pub fn get(&self) -> &T {
        &self.current
    }

    /// The last value known to be persisted.
    pub fn durable(&self) -> &T {
        &self.durable
    }

    /// Returns `true` once any write has been applied.
    pub fn has_writes(&self) -> bool {
        self.latest_seq > 0
    }

    /// Returns `true` while any write awaits its outcome.
    pub fn is_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Replaces both copies with a value that is already persisted.
    ///
    /// Outstanding writes are forgotten; settling them later only reports
    /// their outcome.
    pub fn reset(&mut self, value: T) {
        self.current = value.clone();
        self.durable = value;
        self.durable_seq = self.latest_seq;
        self.in_flight.clear();
    }

    /// Applies `value` in memory and returns the write to persist.
    pub fn apply(&mut self, value: T) -> PendingWrite<T> {
        self.latest_seq += 1;
        self.current = value.clone();
        self.in_flight.insert(self.latest_seq, value.clone());
        PendingWrite {
            seq: self.latest_seq,
            value,
        }
    }

    /// Sequence number of the write that produced `current`, if any.
    fn shown_seq(&self) -> Option<u64> {
        self.in_flight
            .range(self.durable_seq + 1..)
            .next_back()
            .map(|(seq, _)| *seq)
    }

    /// Recomputes `current` from the live writes and the durable value.
    fn sync_current(&mut self) {
        self.current = match self.in_flight.range(self.durable_seq + 1..).next_back() {
            Some((_, value)) => value.clone(),
            None => self.durable.clone(),
        };
    }

    /// Records the persistence outcome of `pending`.
    pub fn settle<E>(&mut self, pending: PendingWrite<T>, outcome: Result<(), E>) -> Settled {
        let was_shown = self.shown_seq() == Some(pending.seq);
        self.in_flight.remove(&pending.seq);

        match outcome {
            Ok(()) => {
                if pending.seq > self.durable_seq {
                    self.durable = pending.value;
                    self.durable_seq = pending.seq;
                }
                self.sync_current();
                Settled::Committed
            }
            Err(_) => {
                self.sync_current();
                if was_shown {
                    Settled::RolledBack
                } else {
                    Settled::Superseded
                }
            }
        }
    }

    /// Applies `value`, persists it with `persist`, and rolls back on failure.
    ///
    /// The caller holds `&mut self` across the await, so nothing else can
    /// observe or write the value until persistence finishes.
    pub async fn transact<E, F, Fut>(&mut self, value: T, persist: F) -> Result<(), E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let pending = self.apply(value);
        match persist(pending.value.clone()).await {
            Ok(()) => {
                self.settle::<E>(pending, Ok(()));
                Ok(())
            }
            Err(e) => {
                self.settle(pending, Err(()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_writes() {
        let cell = Optimistic::new(vec![1]);
        assert_eq!(cell.get(), &vec![1]);
        assert_eq!(cell.durable(), &vec![1]);
        assert!(!cell.has_writes());
    }

    #[test]
    fn apply_is_visible_before_settle() {
        let mut cell = Optimistic::new(vec![1]);
        let pending = cell.apply(vec![1, 2]);
        assert_eq!(cell.get(), &vec![1, 2]);
        assert_eq!(cell.durable(), &vec![1]);
        assert_eq!(pending.value(), &vec![1, 2]);
    }

    #[test]
    fn settle_ok_commits() {
        let mut cell = Optimistic::new(vec![1]);
        let pending = cell.apply(vec![1, 2]);
        assert_eq!(cell.settle::<()>(pending, Ok(())), Settled::Committed);
        assert_eq!(cell.get(), &vec![1, 2]);
        assert_eq!(cell.durable(), &vec![1, 2]);
    }

    #[test]
    fn settle_err_restores_snapshot() {
        let mut cell = Optimistic::new(vec![1]);
        let pending = cell.apply(vec![1, 2]);
        assert_eq!(cell.settle(pending, Err("disk full")), Settled::RolledBack);
        assert_eq!(cell.get(), &vec![1]);
    }

    #[test]
    fn older_failure_is_superseded_by_newer_write() {
        let mut cell = Optimistic::new(Vec::<i32>::new());
        let first = cell.apply(vec![1]);
        let second = cell.apply(vec![1, 2]);

        assert_eq!(cell.settle(first, Err("boom")), Settled::Superseded);
        assert_eq!(cell.get(), &vec![1, 2]);

        assert_eq!(cell.settle::<&str>(second, Ok(())), Settled::Committed);
        assert_eq!(cell.durable(), &vec![1, 2]);
    }

    #[test]
    fn newest_failure_restores_last_durable() {
        let mut cell = Optimistic::new(Vec::<i32>::new());
        let first = cell.apply(vec![1]);
        let second = cell.apply(vec![1, 2]);

        assert_eq!(cell.settle::<&str>(first, Ok(())), Settled::Committed);
        assert_eq!(cell.settle(second, Err("boom")), Settled::RolledBack);
        assert_eq!(cell.get(), &vec![1]);
    }

    #[test]
    fn newest_failure_falls_back_to_live_older_write() {
        let mut cell = Optimistic::new(Vec::<i32>::new());
        let first = cell.apply(vec![1]);
        let second = cell.apply(vec![1, 2]);

        assert_eq!(cell.settle(second, Err("boom")), Settled::RolledBack);
        assert_eq!(cell.get(), &vec![1], "pre-update value of the failed write");

        assert_eq!(cell.settle::<&str>(first, Ok(())), Settled::Committed);
        assert_eq!(cell.get(), &vec![1]);
        assert_eq!(cell.durable(), &vec![1]);
        assert!(!cell.is_pending());
    }

    #[test]
    fn both_writes_failing_restores_original() {
        let mut cell = Optimistic::new(vec![0]);
        let first = cell.apply(vec![0, 1]);
        let second = cell.apply(vec![0, 1, 2]);

        assert_eq!(cell.settle(second, Err("boom")), Settled::RolledBack);
        assert_eq!(cell.get(), &vec![0, 1]);
        assert_eq!(cell.settle(first, Err("boom")), Settled::RolledBack);
        assert_eq!(cell.get(), &vec![0]);
    }

    #[test]
    fn older_success_after_newer_success_keeps_newest() {
        let mut cell = Optimistic::new(Vec::<i32>::new());
        let first = cell.apply(vec![1]);
        let second = cell.apply(vec![1, 2]);
        let third = cell.apply(vec![1, 2, 3]);

        cell.settle::<()>(second, Ok(()));
        assert_eq!(cell.get(), &vec![1, 2, 3], "third still in flight");
        cell.settle(third, Err(()));
        assert_eq!(cell.get(), &vec![1, 2]);
        cell.settle::<()>(first, Ok(()));
        assert_eq!(cell.get(), &vec![1, 2]);
        assert_eq!(cell.durable(), &vec![1, 2]);
    }

    #[test]
    fn late_older_success_does_not_regress_durable() {
        let mut cell = Optimistic::new(Vec::<i32>::new());
        let first = cell.apply(vec![1]);
        let second = cell.apply(vec![1, 2]);

        cell.settle::<()>(second, Ok(()));
        cell.settle::<()>(first, Ok(()));
        assert_eq!(cell.durable(), &vec![1, 2]);
    }

    #[test]
    fn reset_overwrites_both_copies() {
        let mut cell = Optimistic::new(vec![1]);
        cell.reset(vec![7, 8]);
        assert_eq!(cell.get(), &vec![7, 8]);
        assert_eq!(cell.durable(), &vec![7, 8]);
    }

    #[tokio::test]
    async fn transact_commits_on_success() {
        let mut cell = Optimistic::new(vec![1]);
        let result: Result<(), String> = cell.transact(vec![1, 2], |_| async { Ok(()) }).await;
        assert!(result.is_ok());
        assert_eq!(cell.get(), &vec![1, 2]);
        assert_eq!(cell.durable(), &vec![1, 2]);
    }

    #[tokio::test]
    async fn transact_rolls_back_on_failure() {
        let mut cell = Optimistic::new(vec![1]);
        let result = cell
            .transact(vec![1, 2], |value| async move {
                assert_eq!(value, vec![1, 2]);
                Err::<(), _>("write failed".to_string())
            })
            .await;
        assert_eq!(result.unwrap_err(), "write failed");
        assert_eq!(cell.get(), &vec![1]);
    }
}
