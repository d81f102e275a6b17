//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline geometry and output settings.
//! 2. **Structures:** General (output) settings and cache settings.
//! 3. **Geometry:** The validated `(s, E, b)` triple the cache model is built from.
//!
//! Configuration is read from JSON (`csim --config`) or built from `Config::default()`
//! and then overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default number of set-index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default associativity (1 line per set = direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default number of block-offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;

    /// Largest accepted set-index bit count (about a million sets).
    ///
    /// Every set is allocated up front as its own line vector.
    pub const MAX_SET_BITS: u32 = 20;

    /// Largest accepted total line count, `2^s * E` (about 4M lines).
    ///
    /// Bounds the up-front line allocation.
    pub const MAX_LINES: usize = 1 << 22;

    /// File the `<hits> <misses> <evictions>` summary is written to.
    pub const RESULTS_FILE: &str = ".csim_results";
}

pub use defaults::{MAX_LINES, MAX_SET_BITS};

/// Cache replacement policy algorithms.
///
/// Specifies how a victim is chosen when a miss lands in a set whose lines
/// are all valid. Invalid lines are always filled first, lowest index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last hit or fill is furthest in the past.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line that was filled earliest, ignoring hits.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Most Recently Used replacement policy.
    ///
    /// Evicts the line touched most recently.
    #[serde(alias = "Mru", alias = "mru")]
    Mru,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use csim_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "general": { "verbose": true },
///     "cache": { "set_bits": 2, "lines_per_set": 4, "block_bits": 3, "policy": "Fifo" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.verbose);
/// assert_eq!(config.cache.lines_per_set, 4);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.geometry().unwrap().num_sets(), 4);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Output and reporting settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry and replacement policy
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Validates the cache section into a [`Geometry`].
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        self.cache.geometry()
    }
}

/// Output and reporting settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Echo each trace entry with its outcomes to stdout
    #[serde(default)]
    pub verbose: bool,

    /// Where the `<hits> <misses> <evictions>` summary is written
    #[serde(default = "GeneralConfig::default_results_file")]
    pub results_file: PathBuf,
}

impl GeneralConfig {
    /// Returns the default results file path.
    fn default_results_file() -> PathBuf {
        PathBuf::from(defaults::RESULTS_FILE)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            results_file: Self::default_results_file(),
        }
    }
}

/// Raw cache settings as supplied by the user.
///
/// Nothing here is validated; call [`CacheConfig::geometry`] before building a cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Number of set-index bits (`s`); the cache has `2^s` sets
    #[serde(default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// Number of lines per set (`E`, the associativity)
    #[serde(default = "CacheConfig::default_lines_per_set")]
    pub lines_per_set: usize,

    /// Number of block-offset bits (`b`); blocks are `2^b` bytes
    #[serde(default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,

    /// Victim selection for full sets
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default set-index bit count.
    fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    /// Returns the default associativity.
    fn default_lines_per_set() -> usize {
        defaults::LINES_PER_SET
    }

    /// Returns the default block-offset bit count.
    fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Validates the settings into a [`Geometry`].
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.set_bits, self.lines_per_set, self.block_bits)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            set_bits: defaults::SET_BITS,
            lines_per_set: defaults::LINES_PER_SET,
            block_bits: defaults::BLOCK_BITS,
            policy: ReplacementPolicy::default(),
        }
    }
}

/// A cache shape that is safe to allocate and index.
///
/// Holding a `Geometry` guarantees `E >= 1`, `s <= MAX_SET_BITS`,
/// `2^s * E <= MAX_LINES` and `s + b <= 64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    set_bits: u32,
    lines_per_set: usize,
    block_bits: u32,
}

impl Geometry {
    /// Validates and creates a geometry.
    ///
    /// # Arguments
    ///
    /// * `set_bits` - `s`, the number of set-index bits.
    /// * `lines_per_set` - `E`, the number of lines in each set.
    /// * `block_bits` - `b`, the number of block-offset bits.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `E == 0`, `s > MAX_SET_BITS`,
    /// `2^s * E > MAX_LINES` or `s + b > 64`.
    pub fn new(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Result<Self, ConfigError> {
        if lines_per_set == 0 {
            return Err(ConfigError::ZeroLinesPerSet);
        }
        if set_bits > defaults::MAX_SET_BITS {
            return Err(ConfigError::TooManySetBits {
                bits: set_bits,
                max: defaults::MAX_SET_BITS,
            });
        }
        let sets = 1usize << set_bits;
        if sets
            .checked_mul(lines_per_set)
            .is_none_or(|lines| lines > defaults::MAX_LINES)
        {
            return Err(ConfigError::TooManyLines {
                sets,
                lines_per_set,
                max: defaults::MAX_LINES,
            });
        }
        if set_bits.saturating_add(block_bits) > u64::BITS {
            return Err(ConfigError::AddressBitsOverflow {
                set_bits,
                block_bits,
            });
        }
        Ok(Self {
            set_bits,
            lines_per_set,
            block_bits,
        })
    }

    /// Number of set-index bits (`s`).
    #[inline(always)]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Number of lines per set (`E`).
    #[inline(always)]
    pub const fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    /// Number of block-offset bits (`b`).
    #[inline(always)]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of sets, `2^s`.
    #[inline(always)]
    pub const fn num_sets(&self) -> usize {
        1usize << self.set_bits
    }

    /// Block size in bytes, `2^b`, or `None` when it does not fit in a `u64`.
    pub const fn block_bytes(&self) -> Option<u64> {
        1u64.checked_shl(self.block_bits)
    }

    /// Total data capacity in bytes (`2^s * E * 2^b`), or `None` on overflow.
    pub fn capacity_bytes(&self) -> Option<u64> {
        (self.num_sets() as u64)
            .checked_mul(self.lines_per_set as u64)?
            .checked_mul(self.block_bytes()?)
    }
}

impl TryFrom<&CacheConfig> for Geometry {
    type Error = ConfigError;

    fn try_from(config: &CacheConfig) -> Result<Self, Self::Error> {
        config.geometry()
    }
}
