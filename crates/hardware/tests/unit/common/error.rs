//! # Error Message Tests
//!
//! The CLI shows these messages to the operator verbatim, so their wording is
//! part of the interface.

use csim_core::common::error::{ConfigError, TraceError};
use csim_core::config::Geometry;
use pretty_assertions::assert_eq;

#[test]
fn zero_lines_per_set_message() {
    let err = Geometry::new(2, 0, 2).unwrap_err();
    assert_eq!(err.to_string(), "lines per set (E) must be at least 1");
}

#[test]
fn too_many_set_bits_message() {
    let err = Geometry::new(40, 1, 0).unwrap_err();
    assert!(matches!(err, ConfigError::TooManySetBits { bits: 40, .. }));
    assert_eq!(
        err.to_string(),
        "set index bits (s) = 40 exceeds the maximum of 20"
    );
}

#[test]
fn too_many_lines_message() {
    let err = Geometry::new(10, 8192, 0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "1024 sets x 8192 lines per set exceeds the limit of 4194304 lines"
    );
}

#[test]
fn address_overflow_message() {
    let err = Geometry::new(10, 1, 60).unwrap_err();
    assert_eq!(
        err.to_string(),
        "s (10) + b (60) exceeds the 64-bit address width"
    );
}

#[test]
fn trace_error_messages_carry_line_numbers() {
    let err = TraceError::UnknownOperation {
        line: 7,
        op: "X".to_string(),
    };
    assert_eq!(err.to_string(), "line 7: unknown operation 'X'");

    let err = TraceError::InvalidAddress {
        line: 3,
        text: "zz".to_string(),
    };
    assert_eq!(err.to_string(), "line 3: invalid address 'zz'");

    assert_eq!(
        TraceError::MissingAddress { line: 1 }.to_string(),
        "line 1: missing address"
    );
}
