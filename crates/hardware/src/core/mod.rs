//! Cache model.
//!
//! This module contains the simulated cache: line and set storage, the
//! lookup cycle that classifies each access, and the replacement policies
//! that pick victims in full sets.

/// Set-associative cache (lines, sets, lookup, outcomes, replacement policies).
pub mod cache;

pub use self::cache::{Cache, CacheLine, CacheSet, Outcome};
