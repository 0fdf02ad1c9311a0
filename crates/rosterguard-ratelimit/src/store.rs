use dashmap::DashMap;

/// Counter state returned by [`WindowStore::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub count: u64,
    pub reset_at_ms: i64,
}

#[derive(Debug)]
struct WindowRecord {
    count: u64,
    reset_at_ms: i64,
}

/// Process-wide key → window counter map.
///
/// `observe` runs its read-compare-write under the shard write lock held by
/// `DashMap::entry`, so concurrent callers on one key never lose increments.
/// `sweep` goes through `retain`, which takes the same shard locks.
#[derive(Debug, Default)]
pub struct WindowStore {
    records: DashMap<String, WindowRecord>,
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request for `key` at `now_ms`.
    pub fn observe(&self, key: &str, now_ms: i64, window_ms: u64) -> WindowSnapshot {
        let reset_at_ms = now_ms.saturating_add(i64::try_from(window_ms).unwrap_or(i64::MAX));
        let mut entry = self
            .records
            .entry(key.to_string())
            .or_insert(WindowRecord {
                count: 0,
                reset_at_ms,
            });
        let record = entry.value_mut();
        if record.count == 0 || record.reset_at_ms <= now_ms {
            record.count = 1;
            record.reset_at_ms = reset_at_ms;
        } else {
            record.count = record.count.saturating_add(1);
        }
        WindowSnapshot {
            count: record.count,
            reset_at_ms: record.reset_at_ms,
        }
    }

    /// Drop every record whose window ended before `now_ms`. Returns how many were removed.
    pub fn sweep(&self, now_ms: i64) -> usize {
        let mut removed = 0;
        self.records.retain(|_, record| {
            let keep = record.reset_at_ms >= now_ms;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn peek(&self, key: &str) -> Option<WindowSnapshot> {
        self.records.get(key).map(|record| WindowSnapshot {
            count: record.count,
            reset_at_ms: record.reset_at_ms,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_opens_window() {
        let store = WindowStore::new();
        let snap = store.observe("k", 1_000, 500);
        assert_eq!(
            snap,
            WindowSnapshot {
                count: 1,
                reset_at_ms: 1_500
            }
        );
    }

    #[test]
    fn increments_inside_window_and_replaces_at_reset() {
        let store = WindowStore::new();
        store.observe("k", 0, 100);
        assert_eq!(store.observe("k", 50, 100).count, 2);
        assert_eq!(store.observe("k", 99, 100).count, 3);

        // reset time reached: record replaced, not incremented
        let snap = store.observe("k", 100, 100);
        assert_eq!(snap.count, 1);
        assert_eq!(snap.reset_at_ms, 200);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sweep_keeps_live_records() {
        let store = WindowStore::new();
        store.observe("expired", 0, 10);
        store.observe("boundary", 0, 20);
        store.observe("live", 15, 100);

        assert_eq!(store.sweep(20), 1);
        assert!(store.peek("expired").is_none());
        assert!(store.peek("boundary").is_some());
        assert_eq!(store.peek("live").unwrap().count, 1);
    }

    #[test]
    fn keys_are_independent() {
        let store = WindowStore::new();
        store.observe("a", 0, 1_000);
        store.observe("a", 1, 1_000);
        assert_eq!(store.observe("b", 2, 1_000).count, 1);
        assert_eq!(store.peek("a").unwrap().count, 2);
    }
}
