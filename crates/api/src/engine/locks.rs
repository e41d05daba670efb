//! Per-week serialization keys.
//!
//! The cumulative-hours validation is a check-then-act sequence: read the
//! owner's daily/weekly totals, then write the entry. Two concurrent writes
//! for the same `(owner, week_start)` could both pass the cap check and
//! jointly overshoot it, so every mutating engine operation holds the week's
//! lock across validate+persist. Different owners and different weeks get
//! independent locks and proceed in parallel.
//!
//! Locks are created on demand and held in the arena as weak references, so
//! a key that no task is using costs nothing after the next prune.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use chrono::NaiveDate;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Prune dead weak references once the arena grows past this size.
const PRUNE_THRESHOLD: usize = 1024;

/// Arena of named async mutexes keyed by `(owner, week_start)`.
#[derive(Default)]
pub struct WeekLocks {
    inner: Mutex<HashMap<(String, NaiveDate), Weak<AsyncMutex<()>>>>,
}

impl WeekLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one owner's week, waiting if another task holds
    /// it. The returned guard releases the lock on drop.
    ///
    /// Callers must not hold the guard across unrelated awaits -- the
    /// engine holds it exactly for the duration of one validate+persist
    /// sequence.
    pub async fn acquire(&self, owner: &str, week_start: NaiveDate) -> OwnedMutexGuard<()> {
        self.lock_for(owner, week_start).lock_owned().await
    }

    /// Get or create the shared mutex for a key.
    fn lock_for(&self, owner: &str, week_start: NaiveDate) -> Arc<AsyncMutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if map.len() > PRUNE_THRESHOLD {
            map.retain(|_, weak| weak.strong_count() > 0);
        }

        let key = (owner.to_string(), week_start);
        if let Some(existing) = map.get(&key).and_then(Weak::upgrade) {
            return existing;
        }

        let fresh = Arc::new(AsyncMutex::new(()));
        map.insert(key, Arc::downgrade(&fresh));
        fresh
    }

    /// Number of live (still referenced) locks in the arena.
    #[cfg(test)]
    fn live_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).expect("valid test date")
    }

    fn next_monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).expect("valid test date")
    }

    #[tokio::test]
    async fn test_same_key_is_mutually_exclusive() {
        let locks = Arc::new(WeekLocks::new());

        let guard = locks.acquire("ada@example.com", monday()).await;

        let contender = Arc::clone(&locks);
        let second = tokio::time::timeout(
            Duration::from_millis(50),
            contender.acquire("ada@example.com", monday()),
        )
        .await;
        assert!(second.is_err(), "second acquire must wait for the first");

        drop(guard);
        let second = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire("ada@example.com", monday()),
        )
        .await;
        assert!(second.is_ok(), "lock must be free once the guard drops");
    }

    #[tokio::test]
    async fn test_different_owners_and_weeks_do_not_contend() {
        let locks = WeekLocks::new();

        let _ada = locks.acquire("ada@example.com", monday()).await;
        let _bob = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire("bob@example.com", monday()),
        )
        .await
        .expect("different owner must not block");
        let _ada_next = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire("ada@example.com", next_monday()),
        )
        .await
        .expect("different week must not block");
    }

    #[tokio::test]
    async fn test_critical_sections_never_interleave() {
        let locks = Arc::new(WeekLocks::new());
        let in_section = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let locks = Arc::clone(&locks);
            let in_section = Arc::clone(&in_section);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("ada@example.com", monday()).await;
                let depth = in_section.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                assert_eq!(depth, 0, "two tasks inside the same week's section");
                tokio::time::sleep(Duration::from_millis(1)).await;
                in_section.fetch_sub(1, std::sync::atomic::Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.expect("task should not panic");
        }
    }

    #[tokio::test]
    async fn test_released_locks_are_reclaimable() {
        let locks = WeekLocks::new();
        {
            let _guard = locks.acquire("ada@example.com", monday()).await;
            assert_eq!(locks.live_count(), 1);
        }
        // The guard (and with it the only Arc) is gone; the arena entry is
        // dead weight until the next prune.
        assert_eq!(locks.live_count(), 0);
    }
}
