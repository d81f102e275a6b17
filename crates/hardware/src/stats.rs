//! Simulation statistics collection and reporting.
//!
//! This module tracks the three counters a trace replay produces. It provides:
//! 1. **Accounting:** Folding lookup outcomes into hits, misses and evictions.
//! 2. **Derived metrics:** Total accesses and hit/miss rates.
//! 3. **Reporting:** The console summary line and the results file format.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::core::Outcome;

/// Hit, miss and eviction counters.
///
/// All counters start at zero and only grow. `misses` counts every miss,
/// including those that evicted; `evictions` counts only the latter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CacheStats {
    /// Lookups that found the block.
    pub hits: u64,
    /// Lookups that did not find the block.
    pub misses: u64,
    /// Misses that overwrote a valid line.
    pub evictions: u64,
}

impl CacheStats {
    /// Folds one lookup outcome into the counters.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
            Outcome::MissEvict => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total lookups recorded.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, `0.0` when nothing was recorded.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of lookups that missed, `0.0` when nothing was recorded.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// The `(hits, misses, evictions)` triple.
    pub const fn as_tuple(&self) -> (u64, u64, u64) {
        (self.hits, self.misses, self.evictions)
    }

    /// The results file line, `<hits> <misses> <evictions>`.
    pub fn results_line(&self) -> String {
        format!("{} {} {}", self.hits, self.misses, self.evictions)
    }

    /// Writes the results line, newline-terminated, replacing `path`.
    pub fn write_results(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, format!("{}\n", self.results_line()))
    }

    /// Prints a multi-line breakdown with rates to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE STATISTICS");
        println!("==========================================================");
        println!("accesses         {}", self.accesses());
        println!("hits             {}", self.hits);
        println!("misses           {}", self.misses);
        println!("evictions        {}", self.evictions);
        println!("hit rate         {:.2}%", self.hit_rate() * 100.0);
        println!("miss rate        {:.2}%", self.miss_rate() * 100.0);
    }
}

impl fmt::Display for CacheStats {
    /// Formats the console summary, `hits:<h> misses:<m> evictions:<e>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
