//! Trace replay.
//!
//! Provides the trace format parser, the trace file loader and the
//! `Simulator` that drives the cache with each trace entry.

/// Trace file loading.
pub mod loader;

/// Top-level simulator (cache + counters).
pub mod simulator;

/// Trace line format and streaming parser.
pub mod trace;

pub use simulator::{AccessResult, Simulator};
pub use trace::{HexMode, Operation, TraceEntry, TraceReader};
