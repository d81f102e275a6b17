//! Most Recently Used (MRU) Replacement Policy.
//!
//! This policy evicts the line that was touched most recently.
//! While counter-intuitive for standard workloads, MRU suits cyclic access
//! patterns (loops) over a working set larger than the set, where the line
//! just used is the one least likely to be needed soon.

use super::{CacheLine, ReplacementPolicy};

/// MRU Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MruPolicy;

impl ReplacementPolicy for MruPolicy {
    /// Returns the line with the largest recency stamp, lowest index on ties.
    fn victim(&self, lines: &[CacheLine]) -> usize {
        let mut victim = 0;
        for (way, line) in lines.iter().enumerate().skip(1) {
            if line.recency() > lines[victim].recency() {
                victim = way;
            }
        }
        victim
    }

    fn name(&self) -> &'static str {
        "mru"
    }
}
