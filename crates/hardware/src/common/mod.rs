//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache model and the
//! trace front end:
//! 1. **Address Types:** A strong address type and its tag / set / offset decomposition.
//! 2. **Error Handling:** Configuration and trace errors reported to the caller.

/// Address type and decoding against a cache geometry.
pub mod addr;

/// Error types for configuration and trace handling.
pub mod error;

pub use addr::{Address, DecodedAddress};
pub use error::{ConfigError, TraceError};
