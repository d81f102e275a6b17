//! Set-associative cache trace simulator library.
//!
//! This crate replays memory-access traces against a configurable cache model:
//! 1. **Common:** Address decoding (tag / set index / block offset) and error types.
//! 2. **Config:** Cache geometry and replacement policy, deserializable from JSON.
//! 3. **Core:** Cache lines, sets, the cache itself and its replacement policies.
//! 4. **Simulation:** Trace parsing, trace loading and the per-entry access state machine.
//! 5. **Stats:** Hit, miss and eviction counters and their reporting formats.

/// Common types (addresses, decoded addresses, errors).
pub mod common;
/// Simulator configuration (defaults, geometry, replacement policy selection).
pub mod config;
/// Cache model (lines, sets, lookup, replacement policies).
pub mod core;
/// Trace parsing, loading and replay.
pub mod sim;
/// Hit/miss/eviction accounting and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::{Config, Geometry};
/// The simulated cache.
pub use crate::core::Cache;
/// Simulation context owning the cache and its counters.
pub use crate::sim::Simulator;
/// Final hit/miss/eviction triple.
pub use crate::stats::CacheStats;
