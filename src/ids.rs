//! Identifier generators.
//!
//! Both are counter objects owned by whoever needs them: the session
//! owns a [`UniqueIds`], each order workflow owns its own [`OperationIds`].

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Operation IDs for order mutations: `"0"`, `"1"`, `"2"`, ...
#[derive(Debug, Default)]
pub struct OperationIds {
    next: AtomicU64,
}

impl OperationIds {
    /// Creates a counter starting at `"0"`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next operation ID.
    pub fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Suffixes that are unique across runs.
///
/// Each ID is the Unix time in milliseconds at the moment of the call,
/// followed by a per-generator counter. Two runs only produce the same ID if
/// they issue it in the same millisecond with the same counter value.
///
/// # Example
///
/// ```rust
/// use shopping_samples::ids::UniqueIds;
///
/// let ids = UniqueIds::with_clock(|| 1_700_000_000_000);
/// assert_eq!(ids.next_id(), "17000000000000");
/// assert_eq!(ids.next_id(), "17000000000001");
/// ```
#[derive(Debug)]
pub struct UniqueIds {
    clock: fn() -> i64,
    next: AtomicU64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl UniqueIds {
    /// Creates a generator stamped with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(now_millis)
    }

    /// Creates a generator that reads milliseconds from `clock`.
    #[must_use]
    pub const fn with_clock(clock: fn() -> i64) -> Self {
        Self {
            clock,
            next: AtomicU64::new(0),
        }
    }

    /// Returns the next unique suffix.
    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{n}", (self.clock)())
    }
}

impl Default for UniqueIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicI64;

    #[test]
    fn test_operation_ids_start_at_zero() {
        let ids = OperationIds::new();
        assert_eq!(ids.next_id(), "0");
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
    }

    #[test]
    fn test_separate_workflows_have_separate_counters() {
        let first = OperationIds::new();
        let second = OperationIds::new();
        first.next_id();
        first.next_id();
        assert_eq!(second.next_id(), "0");
    }

    #[test]
    fn test_unique_ids_are_distinct() {
        let ids = UniqueIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(b.ends_with('1'));
    }

    #[test]
    fn test_runs_started_seconds_apart_never_collide() {
        let first = UniqueIds::with_clock(|| 1_700_000_000_000);
        let second = UniqueIds::with_clock(|| 1_700_000_003_000);

        let mut seen: HashSet<String> = (0..1_000).map(|_| first.next_id()).collect();
        for _ in 0..1_000 {
            let id = second.next_id();
            assert!(!seen.contains(&id), "collision: {id}");
            seen.insert(id);
        }
        assert_eq!(seen.len(), 2_000);
    }

    #[test]
    fn test_ids_take_the_clock_at_call_time() {
        static NOW: AtomicI64 = AtomicI64::new(1_700_000_000_000);
        let ids = UniqueIds::with_clock(|| NOW.load(Ordering::Relaxed));

        assert_eq!(ids.next_id(), "17000000000000");
        NOW.store(1_700_000_000_500, Ordering::Relaxed);
        assert_eq!(ids.next_id(), "17000000005001");
    }
}
