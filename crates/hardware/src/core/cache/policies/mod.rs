//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting a victim line in a full set.
//! Every policy reads the logical stamps kept on each [`CacheLine`]; none of
//! them keeps state of its own, so a set's history lives entirely in its lines.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.
//! - `Mru`: Most Recently Used.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use mru::MruPolicy;

use super::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// The cache only consults the policy when every line in the set is valid;
/// invalid lines are filled first without asking.
pub trait ReplacementPolicy: Send + Sync {
    /// Selects the line to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `lines` - The lines of one set, all valid. Never empty.
    ///
    /// # Returns
    ///
    /// The index within `lines` of the victim.
    fn victim(&self, lines: &[CacheLine]) -> usize;

    /// Short lowercase name used in logs and reports.
    fn name(&self) -> &'static str;
}

/// Builds the policy selected by the configuration.
pub fn from_config(policy: PolicyType) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
        PolicyType::Mru => Box::new(MruPolicy),
    }
}

/// Index of the first line minimising `key`; `0` for an empty slice.
///
/// `Iterator::min_by_key` keeps the first of equal elements, which gives
/// every policy the same lowest-index tie break.
fn first_min_by_key(lines: &[CacheLine], key: impl Fn(&CacheLine) -> u64) -> usize {
    lines
        .iter()
        .enumerate()
        .min_by_key(|(_, line)| key(line))
        .map_or(0, |(way, _)| way)
}
