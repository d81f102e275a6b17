//! Configuration and trace error definitions.
//!
//! The cache model itself cannot fail once constructed. Everything that can go
//! wrong happens before or around it:
//! 1. **Configuration Errors:** Geometries that cannot be indexed safely, or config files
//!    that cannot be read or parsed.
//! 2. **Trace Errors:** Unreadable trace files and malformed trace lines. A corrupt trace
//!    makes the rest of the run meaningless, so callers abort on the first one.

use std::io;

use thiserror::Error;

/// Errors raised while building a cache geometry or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A set must hold at least one line.
    #[error("lines per set (E) must be at least 1")]
    ZeroLinesPerSet,

    /// The set count `2^s` would be too large to allocate.
    #[error("set index bits (s) = {bits} exceeds the maximum of {max}")]
    TooManySetBits {
        /// Requested set-index bit count.
        bits: u32,
        /// Largest supported set-index bit count.
        max: u32,
    },

    /// The cache would hold more lines than can be allocated up front.
    #[error("{sets} sets x {lines_per_set} lines per set exceeds the limit of {max} lines")]
    TooManyLines {
        /// Number of sets, `2^s`.
        sets: usize,
        /// Requested lines per set.
        lines_per_set: usize,
        /// Largest supported total line count.
        max: usize,
    },

    /// Set-index and block-offset bits together exceed the address width.
    #[error("s ({set_bits}) + b ({block_bits}) exceeds the 64-bit address width")]
    AddressBitsOverflow {
        /// Requested set-index bit count.
        set_bits: u32,
        /// Requested block-offset bit count.
        block_bits: u32,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while reading or parsing a trace.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("trace read failed: {0}")]
    Io(#[from] io::Error),

    /// The operation code is not one of `I`, `L`, `S`, `M`.
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation {
        /// Line number in the trace.
        line: usize,
        /// The offending operation token.
        op: String,
    },

    /// The line has an operation but no address.
    #[error("line {line}: missing address")]
    MissingAddress {
        /// Line number in the trace.
        line: usize,
    },

    /// The address is not a hexadecimal number that fits in 64 bits.
    #[error("line {line}: invalid address '{text}'")]
    InvalidAddress {
        /// Line number in the trace.
        line: usize,
        /// The offending address text.
        text: String,
    },

    /// The access size following the comma is not a decimal number.
    #[error("line {line}: invalid access size '{text}'")]
    InvalidSize {
        /// Line number in the trace.
        line: usize,
        /// The offending size text.
        text: String,
    },
}
