//! Time-derived id generation
//!
//! Ids are millisecond timestamps, so ordering by id approximates
//! chronological order. A high-water mark guarantees uniqueness when several
//! ids are minted within the same millisecond.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next id: current millis, bumped past the previous id if needed
    pub fn next(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let id = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now.max(prev + 1))
            })
            .map(|prev| now.max(prev + 1))
            .unwrap_or(now);
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let ids = IdGenerator::new();
        let mut seen = Vec::new();
        for _ in 0..1000 {
            seen.push(ids.next());
        }
        let mut sorted = seen.clone();
        sorted.sort_by_key(|s| s.parse::<i64>().unwrap());
        assert_eq!(seen, sorted);
        sorted.dedup();
        assert_eq!(sorted.len(), 1000);
    }
}
