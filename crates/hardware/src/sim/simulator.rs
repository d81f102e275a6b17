//! Simulator: owns the cache and its counters side-by-side.
//!
//! A `Simulator` is the whole state of one trace replay. Entries are fed to
//! [`Simulator::process_entry`] in trace order; that order is the only source
//! of the cache's logical clock.

use tracing::debug;

use super::trace::{Operation, TraceEntry};
use crate::common::addr::Address;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, Geometry, ReplacementPolicy};
use crate::core::{Cache, Outcome};
use crate::stats::CacheStats;

/// Outcomes of the lookup cycles performed for one trace entry.
///
/// Empty for instruction fetches, one outcome for loads and stores, two for
/// modifies (the load, then the store).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessResult {
    outcomes: [Option<Outcome>; 2],
}

impl AccessResult {
    const fn none() -> Self {
        Self {
            outcomes: [None, None],
        }
    }

    const fn one(outcome: Outcome) -> Self {
        Self {
            outcomes: [Some(outcome), None],
        }
    }

    const fn two(first: Outcome, second: Outcome) -> Self {
        Self {
            outcomes: [Some(first), Some(second)],
        }
    }

    /// The outcomes in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.outcomes.iter().flatten().copied()
    }

    /// Number of lookup cycles performed.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no lookup was performed.
    pub const fn is_empty(&self) -> bool {
        self.outcomes[0].is_none()
    }

    /// Outcome of the first cycle.
    pub const fn first(&self) -> Option<Outcome> {
        self.outcomes[0]
    }

    /// Outcome of the second cycle (modify only).
    pub const fn second(&self) -> Option<Outcome> {
        self.outcomes[1]
    }

    /// Verbose-mode markers for every cycle, e.g. `" miss eviction hit"`.
    pub fn markers(&self) -> String {
        self.iter().map(Outcome::marker).collect()
    }
}

/// Trace replay context: geometry, cache and counters.
#[derive(Debug)]
pub struct Simulator {
    cache: Cache,
    stats: CacheStats,
}

impl Simulator {
    /// Creates a simulator with an empty cache and zeroed counters.
    pub fn new(geometry: Geometry, policy: ReplacementPolicy) -> Self {
        Self::with_cache(Cache::new(geometry, policy))
    }

    /// Creates a simulator around an existing cache.
    pub fn with_cache(cache: Cache) -> Self {
        Self {
            cache,
            stats: CacheStats::default(),
        }
    }

    /// Validates the cache settings and creates a simulator.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.geometry()?, config.policy))
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Snapshot of the counters.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Performs the lookup cycles for one operation.
    ///
    /// Instruction fetches leave every counter untouched. A modify performs two
    /// lookups on the same block; the first leaves the block resident, so the
    /// second always hits.
    pub fn access(&mut self, op: Operation, address: Address) -> AccessResult {
        match op {
            Operation::Instruction => AccessResult::none(),
            Operation::Load | Operation::Store => AccessResult::one(self.lookup(address)),
            Operation::Modify => {
                let load = self.lookup(address);
                let store = self.lookup(address);
                debug_assert!(store.is_hit(), "store half of a modify must hit");
                AccessResult::two(load, store)
            }
        }
    }

    /// Performs the lookup cycles for one trace entry.
    pub fn process_entry(&mut self, entry: &TraceEntry) -> AccessResult {
        self.access(entry.op, entry.address)
    }

    /// Replays every entry and returns the final counters.
    pub fn run<I>(&mut self, entries: I) -> CacheStats
    where
        I: IntoIterator<Item = TraceEntry>,
    {
        self.run_with(entries, |_, _| {})
    }

    /// Replays every entry, reporting each entry and its outcomes to `observer`.
    pub fn run_with<I, F>(&mut self, entries: I, mut observer: F) -> CacheStats
    where
        I: IntoIterator<Item = TraceEntry>,
        F: FnMut(&TraceEntry, &AccessResult),
    {
        for entry in entries {
            let result = self.process_entry(&entry);
            observer(&entry, &result);
        }
        self.finish()
    }

    /// Replays a fallible entry stream, stopping at the first error.
    ///
    /// Counters keep whatever was recorded before the error.
    pub fn try_run_with<I, E, F>(&mut self, entries: I, mut observer: F) -> Result<CacheStats, E>
    where
        I: IntoIterator<Item = Result<TraceEntry, E>>,
        F: FnMut(&TraceEntry, &AccessResult),
    {
        for entry in entries {
            let entry = entry?;
            let result = self.process_entry(&entry);
            observer(&entry, &result);
        }
        Ok(self.finish())
    }

    fn lookup(&mut self, address: Address) -> Outcome {
        let outcome = self.cache.access_address(address);
        self.stats.record(outcome);
        outcome
    }

    fn finish(&self) -> CacheStats {
        debug!(
            hits = self.stats.hits,
            misses = self.stats.misses,
            evictions = self.stats.evictions,
            lookups = self.cache.clock(),
            "trace replay finished"
        );
        self.stats
    }
}
