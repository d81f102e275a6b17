//! Shared helpers for building caches, simulators and traces in tests.

use csim_core::config::{Geometry, ReplacementPolicy};
use csim_core::sim::{HexMode, Operation, Simulator, TraceEntry, trace};

/// Builds a validated geometry, panicking on invalid input.
pub fn geometry(s: u32, e: usize, b: u32) -> Geometry {
    Geometry::new(s, e, b).unwrap()
}

/// Builds an LRU simulator for `(s, E, b)`.
pub fn lru_sim(s: u32, e: usize, b: u32) -> Simulator {
    Simulator::new(geometry(s, e, b), ReplacementPolicy::Lru)
}

/// Parses a trace written inline in a test, strict mode.
pub fn parse(text: &str) -> Vec<TraceEntry> {
    trace::parse_str(text, HexMode::Strict).unwrap()
}

/// Shorthand for a load entry.
pub fn load(addr: u64) -> TraceEntry {
    TraceEntry::new(Operation::Load, addr)
}

/// Shorthand for a store entry.
pub fn store(addr: u64) -> TraceEntry {
    TraceEntry::new(Operation::Store, addr)
}

/// Shorthand for a modify entry.
pub fn modify(addr: u64) -> TraceEntry {
    TraceEntry::new(Operation::Modify, addr)
}

/// Shorthand for an instruction fetch entry.
pub fn fetch(addr: u64) -> TraceEntry {
    TraceEntry::new(Operation::Instruction, addr)
}
