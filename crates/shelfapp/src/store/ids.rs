use crate::model::BookId;
use chrono::Utc;

/// Hands out book ids derived from the current time in milliseconds.
///
/// Each id is `max(now, last + 1)`, so ids stay unique and strictly
/// increasing even when several books are added within the same millisecond
/// or the clock steps backwards.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure future ids are greater than `id`.
    pub fn observe(&mut self, id: BookId) {
        self.last = self.last.max(id.0);
    }

    pub fn next_id(&mut self) -> BookId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_at(now)
    }

    pub(crate) fn next_at(&mut self, now_millis: u64) -> BookId {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        BookId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_millisecond_yields_distinct_ids() {
        let mut ids = IdGenerator::new();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(1_000);
        assert_eq!((a.0, b.0, c.0), (1_000, 1_001, 1_002));
    }

    #[test]
    fn clock_going_backwards_still_increases() {
        let mut ids = IdGenerator::new();
        let a = ids.next_at(5_000);
        let b = ids.next_at(4_000);
        assert!(b > a);
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let mut ids = IdGenerator::new();
        ids.observe(BookId(9_999_999_999_999));
        assert!(ids.next_id() > BookId(9_999_999_999_999));
    }

    #[test]
    fn saturates_at_the_largest_id() {
        let mut ids = IdGenerator::new();
        ids.observe(BookId(u64::MAX));
        assert_eq!(ids.next_at(1_000), BookId(u64::MAX));
    }

    #[test]
    fn rapid_ids_are_unique() {
        let mut ids = IdGenerator::new();
        let issued: HashSet<BookId> = (0..1_000).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 1_000);
    }
}
