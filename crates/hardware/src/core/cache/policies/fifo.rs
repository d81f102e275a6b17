//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that was filled earliest, regardless of how
//! recently it was hit. Fill order is the logical stamp recorded when a miss
//! installs a line.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()` is O(W) where W is the number of ways
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict hot lines)

use super::{CacheLine, ReplacementPolicy, first_min_by_key};

/// FIFO Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Returns the line with the oldest fill stamp, lowest index on ties.
    fn victim(&self, lines: &[CacheLine]) -> usize {
        first_min_by_key(lines, CacheLine::filled)
    }

    fn name(&self) -> &'static str {
        "fifo"
    }
}
