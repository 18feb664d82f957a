// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU64, Ordering};

/// Allocator for unique run ids.
///
/// Hands out non-overlapping integer ranges: `allocate(increase)` returns the
/// current counter value and advances the counter by `increase`, so a chain
/// whose modules fan one trigger into several output items can claim a
/// contiguous block of ids per trigger. The counter never decreases and ids
/// are never reused.
///
/// One instance is shared (behind an `Arc`) by every chain that must draw from
/// the same id space. Overflow of the 64-bit counter is not a practical
/// concern at realistic trigger rates.
pub struct IdGenerator {
    next_id: AtomicU64,
}

impl IdGenerator {
    /// Create a generator with the counter at 0.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
        }
    }

    /// Return the next id and advance the counter by `increase`.
    ///
    /// The returned id is the first of a reserved range of `increase`
    /// consecutive ids; no other caller will ever observe an id inside
    /// that range.
    pub fn allocate(&self, increase: u64) -> u64 {
        self.next_id.fetch_add(increase, Ordering::SeqCst)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn allocates_monotonically() {
        let ids = IdGenerator::new();
        assert_eq!(ids.allocate(1), 0);
        assert_eq!(ids.allocate(4), 1);
        assert_eq!(ids.allocate(1), 5);
        assert_eq!(ids.allocate(2), 6);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_ranges_never_overlap() {
        let ids = Arc::new(IdGenerator::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let ids = Arc::clone(&ids);
            handles.push(tokio::spawn(async move {
                let mut starts = Vec::new();
                for _ in 0..100 {
                    starts.push(ids.allocate(3));
                }
                starts
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }

        all.sort_unstable();
        for pair in all.windows(2) {
            assert!(pair[1] - pair[0] >= 3, "ranges {} and {} overlap", pair[0], pair[1]);
        }
        assert_eq!(ids.allocate(1), 8 * 100 * 3);
    }
}
