//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line whose most recent touch, hit or fill, is
//! furthest in the past. Recency is the logical access sequence number the
//! cache stamps on a line, not wall-clock time, so replaying a trace always
//! picks the same victims.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()` is O(W) where W is the number of ways
//! - **Space Complexity:** O(1) beyond the per-line stamp
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Scanning patterns larger than the set (thrashing)

use super::{CacheLine, ReplacementPolicy, first_min_by_key};

/// LRU Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Returns the line with the smallest recency stamp, lowest index on ties.
    fn victim(&self, lines: &[CacheLine]) -> usize {
        first_min_by_key(lines, CacheLine::recency)
    }

    fn name(&self) -> &'static str {
        "lru"
    }
}
