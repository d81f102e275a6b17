//! Set-Associative Cache Model.
//!
//! This module implements the simulated cache: `2^s` sets of `E` lines each,
//! addressed by tag and set index. It models hits, cold misses and evicting
//! misses at block granularity; no data is stored.
//!
//! Every lookup cycle advances a single logical clock. The clock value is
//! stamped on the line that was hit or filled, and replacement policies order
//! lines by those stamps, so the same trace always produces the same result.

/// Cache replacement policy implementations (LRU, FIFO, MRU).
pub mod policies;

use std::fmt;

use tracing::{debug, trace};

use self::policies::ReplacementPolicy;
use crate::common::addr::Address;
use crate::config::{Geometry, ReplacementPolicy as PolicyType};

/// Cache line entry: tag, validity, dirty bit and logical stamps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
    recency: u64,
    filled: u64,
}

impl CacheLine {
    /// Tag of the block held by this line. Meaningless while the line is invalid.
    #[inline(always)]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Whether the line holds a block.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the line has been filled by a miss since construction.
    #[inline(always)]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clock value of the last hit or fill.
    #[inline(always)]
    pub const fn recency(&self) -> u64 {
        self.recency
    }

    /// Clock value of the last fill.
    #[inline(always)]
    pub const fn filled(&self) -> u64 {
        self.filled
    }

    #[inline(always)]
    fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    fn fill(&mut self, tag: u64, clock: u64) {
        self.tag = tag;
        self.valid = true;
        self.dirty = true;
        self.recency = clock;
        self.filled = clock;
    }
}

/// One set: a fixed number of lines, at most one valid line per tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// The lines of this set in way order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Number of lines currently holding a block.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    /// Way holding `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    fn first_invalid(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.valid)
    }
}

/// Result of one lookup cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The tag was present in the set.
    Hit,
    /// The tag was absent and an empty line was filled.
    Miss,
    /// The tag was absent and a valid line was overwritten.
    MissEvict,
}

impl Outcome {
    /// Whether the lookup found the block.
    #[inline(always)]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Whether the lookup overwrote a valid line.
    #[inline(always)]
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissEvict)
    }

    /// Marker appended to an echoed trace line in verbose mode.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Hit => " hit",
            Self::Miss => " miss",
            Self::MissEvict => " miss eviction",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker().trim_start())
    }
}

/// Set-associative cache with a pluggable replacement policy.
///
/// Shape is fixed at construction; only line contents change afterwards.
pub struct Cache {
    geometry: Geometry,
    sets: Vec<CacheSet>,
    clock: u64,
    policy: Box<dyn ReplacementPolicy>,
}

impl Cache {
    /// Creates an empty cache (all lines invalid) with the selected policy.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Validated `(s, E, b)` shape.
    /// * `policy` - Victim selection for full sets.
    pub fn new(geometry: Geometry, policy: PolicyType) -> Self {
        Self::with_policy(geometry, policies::from_config(policy))
    }

    /// Creates an empty cache driven by a caller-supplied policy.
    pub fn with_policy(geometry: Geometry, policy: Box<dyn ReplacementPolicy>) -> Self {
        debug!(
            sets = geometry.num_sets(),
            ways = geometry.lines_per_set(),
            block_bits = geometry.block_bits(),
            policy = policy.name(),
            "building cache"
        );
        Self {
            geometry,
            sets: (0..geometry.num_sets())
                .map(|_| CacheSet::new(geometry.lines_per_set()))
                .collect(),
            clock: 0,
            policy,
        }
    }

    /// The geometry this cache was built with.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Number of sets (`2^s`).
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Number of lines per set (`E`).
    pub const fn ways(&self) -> usize {
        self.geometry.lines_per_set()
    }

    /// Number of lookup cycles performed so far.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Name of the active replacement policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Read access to one set, or `None` if `set_index` is out of range.
    pub fn set(&self, set_index: usize) -> Option<&CacheSet> {
        self.sets.get(set_index)
    }

    /// Checks whether a block is resident, without touching any state.
    pub fn contains(&self, set_index: usize, tag: u64) -> bool {
        self.sets
            .get(set_index)
            .is_some_and(|set| set.find(tag).is_some())
    }

    /// Performs one lookup cycle.
    ///
    /// On a hit the matching line's recency is refreshed; its dirty bit is left
    /// alone. On a miss the lowest-indexed invalid line is filled, or, if the
    /// set is full, the policy's victim is overwritten.
    ///
    /// # Arguments
    ///
    /// * `set_index` - Set selected by the address; must be `< num_sets()`.
    /// * `tag` - Tag of the block being accessed.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is out of range. Indices produced by
    /// [`Address::decode`] with this cache's geometry are always in range.
    pub fn access(&mut self, set_index: usize, tag: u64) -> Outcome {
        self.clock += 1;
        let clock = self.clock;
        let set = &mut self.sets[set_index];

        if let Some(way) = set.find(tag) {
            set.lines[way].recency = clock;
            trace!(set_index, tag, way, "hit");
            return Outcome::Hit;
        }

        let (way, outcome) = match set.first_invalid() {
            Some(way) => (way, Outcome::Miss),
            None => (self.policy.victim(&set.lines), Outcome::MissEvict),
        };

        if outcome.is_eviction() {
            trace!(
                set_index,
                tag,
                way,
                evicted = set.lines[way].tag,
                policy = self.policy.name(),
                "miss, evicting"
            );
        } else {
            trace!(set_index, tag, way, "miss");
        }

        set.lines[way].fill(tag, clock);
        outcome
    }

    /// Decodes `addr` with this cache's geometry and performs one lookup cycle.
    pub fn access_address(&mut self, addr: Address) -> Outcome {
        let decoded = addr.decode(&self.geometry);
        self.access(decoded.set_index, decoded.tag)
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("geometry", &self.geometry)
            .field("clock", &self.clock)
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}
