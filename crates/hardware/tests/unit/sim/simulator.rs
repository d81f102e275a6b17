//! Simulator Unit Tests.
//!
//! Verifies the per-operation state machine (instruction, load, store,
//! modify), the replay drivers, and the end-to-end scenarios with known
//! hit/miss/eviction triples.

use csim_core::Simulator;
use csim_core::common::addr::Address;
use csim_core::common::error::TraceError;
use csim_core::config::{CacheConfig, ReplacementPolicy};
use csim_core::core::Outcome;
use csim_core::sim::{Operation, TraceEntry};
use csim_core::stats::CacheStats;
use pretty_assertions::assert_eq;

use crate::common::{fetch, geometry, load, lru_sim, modify, parse, store};

fn triple(stats: CacheStats) -> (u64, u64, u64) {
    stats.as_tuple()
}

// ══════════════════════════════════════════════════════════
// 1. Operation Semantics
// ══════════════════════════════════════════════════════════

#[test]
fn instruction_fetch_is_inert() {
    let mut sim = lru_sim(0, 1, 0);
    let result = sim.access(Operation::Instruction, Address::new(0x40));

    assert!(result.is_empty());
    assert_eq!(result.len(), 0);
    assert_eq!(sim.stats(), CacheStats::default());
    assert_eq!(sim.cache().clock(), 0);
}

/// An instruction fetch after a fill must not refresh recency either.
#[test]
fn instruction_fetch_does_not_touch_lru_order() {
    let mut sim = lru_sim(0, 2, 0);
    let _ = sim.process_entry(&load(1));
    let _ = sim.process_entry(&load(2));
    let _ = sim.process_entry(&fetch(1));
    let result = sim.process_entry(&load(3));

    assert_eq!(result.first(), Some(Outcome::MissEvict));
    assert!(!sim.cache().contains(0, 1));
}

#[test]
fn load_and_store_have_identical_effect() {
    let mut by_load = lru_sim(1, 1, 2);
    let mut by_store = lru_sim(1, 1, 2);

    for addr in [0x0, 0x4, 0x8, 0x0, 0x10, 0x4] {
        let a = by_load.process_entry(&load(addr));
        let b = by_store.process_entry(&store(addr));
        assert_eq!(a, b);
    }
    assert_eq!(by_load.stats(), by_store.stats());
}

#[test]
fn modify_cold_is_miss_then_hit() {
    let mut sim = lru_sim(0, 1, 0);
    let result = sim.process_entry(&modify(0x5));

    assert_eq!(result.len(), 2);
    assert_eq!(result.first(), Some(Outcome::Miss));
    assert_eq!(result.second(), Some(Outcome::Hit));
    assert_eq!(result.markers(), " miss hit");
}

#[test]
fn modify_warm_is_two_hits() {
    let mut sim = lru_sim(0, 1, 0);
    let _ = sim.process_entry(&load(0x5));
    let result = sim.process_entry(&modify(0x5));
    assert_eq!(result.markers(), " hit hit");
    assert_eq!(triple(sim.stats()), (2, 1, 0));
}

#[test]
fn modify_with_eviction_then_hit() {
    let mut sim = lru_sim(0, 1, 0);
    let _ = sim.process_entry(&load(0x1));
    let result = sim.process_entry(&modify(0x2));
    assert_eq!(result.markers(), " miss eviction hit");
    assert_eq!(triple(sim.stats()), (1, 2, 1));
}

#[test]
fn access_result_iterates_in_cycle_order() {
    let mut sim = lru_sim(0, 1, 0);
    let outcomes: Vec<_> = sim.process_entry(&modify(0x9)).iter().collect();
    assert_eq!(outcomes, vec![Outcome::Miss, Outcome::Hit]);
}

// ══════════════════════════════════════════════════════════
// 2. Reference Scenarios
// ══════════════════════════════════════════════════════════

/// s=2, E=1, b=0: 0x10, 0x14, 0x10 all map to set 0 with tags 4, 5, 4.
#[test]
fn scenario_direct_mapped_conflicts() {
    let mut sim = lru_sim(2, 1, 0);
    let mut markers = Vec::new();
    let stats = sim.run_with(parse(" L 0x10\n L 0x14\n L 0x10\n"), |_, result| {
        markers.push(result.markers());
    });

    assert_eq!(markers, vec![" miss", " miss eviction", " miss eviction"]);
    assert_eq!(triple(stats), (0, 3, 2));
}

/// s=0, E=1, b=0: a single cold modify is one miss and one hit.
#[test]
fn scenario_single_modify() {
    let mut sim = lru_sim(0, 1, 0);
    let stats = sim.run(parse(" M 0x5\n"));
    assert_eq!(triple(stats), (1, 1, 0));
}

/// Only the load changes counters.
#[test]
fn scenario_instructions_ignored() {
    let mut sim = lru_sim(0, 1, 0);
    let stats = sim.run(parse("I 0x0\n L 0x0\nI 0x4\n"));
    assert_eq!(triple(stats), (0, 1, 0));
}

/// The canonical `yi.trace` shipped with the cache lab, s=4 E=1 b=4.
#[test]
fn scenario_yi_trace() {
    let trace = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n";
    let mut sim = lru_sim(4, 1, 4);
    let mut echoed = Vec::new();
    let stats = sim.run_with(parse(trace), |entry, result| {
        echoed.push(format!("{}{}", entry.text, result.markers()));
    });

    assert_eq!(
        echoed,
        vec![
            "L 10,1 miss",
            "M 20,1 miss hit",
            "L 22,1 hit",
            "S 18,1 hit",
            "L 110,1 miss eviction",
            "L 210,1 miss eviction",
            "M 12,1 miss eviction hit",
        ]
    );
    assert_eq!(triple(stats), (4, 5, 3));
}

/// Two-way sets absorb the yi.trace conflicts that evict in a direct-mapped cache.
#[test]
fn scenario_yi_trace_two_way() {
    let trace = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n";
    let mut sim = lru_sim(4, 2, 4);
    let stats = sim.run(parse(trace));
    // set 1 sees tags 0, 1, 2 in that order; tag 0 is LRU when tag 2 arrives,
    // then M 12 (tag 0) misses and evicts tag 1.
    assert_eq!(triple(stats), (4, 5, 2));
}

// ══════════════════════════════════════════════════════════
// 3. Drivers
// ══════════════════════════════════════════════════════════

#[test]
fn stats_snapshot_matches_run_result() {
    let mut sim = lru_sim(1, 1, 1);
    let stats = sim.run(vec![load(0), store(2), modify(4), fetch(6)]);
    assert_eq!(sim.stats(), stats);
}

#[test]
fn try_run_stops_at_first_error() {
    let mut sim = lru_sim(0, 1, 0);
    let entries: Vec<Result<TraceEntry, TraceError>> = vec![
        Ok(load(0)),
        Err(TraceError::MissingAddress { line: 2 }),
        Ok(load(0)),
    ];
    let mut seen = 0;
    let err = sim
        .try_run_with(entries, |_, _| seen += 1)
        .unwrap_err();

    assert!(matches!(err, TraceError::MissingAddress { line: 2 }));
    assert_eq!(seen, 1);
    assert_eq!(triple(sim.stats()), (0, 1, 0));
}

#[test]
fn from_config_validates_geometry() {
    let config = CacheConfig {
        set_bits: 1,
        lines_per_set: 0,
        block_bits: 1,
        policy: ReplacementPolicy::Lru,
    };
    assert!(Simulator::from_config(&config).is_err());

    let config = CacheConfig {
        lines_per_set: 2,
        ..config
    };
    let sim = Simulator::from_config(&config).unwrap();
    assert_eq!(sim.cache().num_sets(), 2);
    assert_eq!(sim.cache().ways(), 2);
}

#[test]
fn policy_changes_outcome_under_pressure() {
    let trace = vec![load(1), load(2), load(1), load(3), load(1)];
    let run = |policy| {
        let mut sim = Simulator::new(geometry(0, 2, 0), policy);
        triple(sim.run(trace.clone()))
    };

    // LRU keeps tag 1 hot; MRU evicts it right after the hit; FIFO evicts it as oldest.
    assert_eq!(run(ReplacementPolicy::Lru), (2, 3, 1));
    assert_eq!(run(ReplacementPolicy::Mru), (1, 4, 2));
    assert_eq!(run(ReplacementPolicy::Fifo), (1, 4, 2));
}
