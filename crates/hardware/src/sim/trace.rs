//! Trace format and parser.
//!
//! Traces use the Valgrind "lackey" layout, one access per line:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! The operation is one of `I` (instruction fetch), `L` (load), `S` (store) or
//! `M` (modify), followed by a hexadecimal address and an optional `,size`.
//! Blank lines and Valgrind banner lines (`==pid== ...`) are skipped.

use std::fmt;
use std::io::{BufRead, Lines};

use crate::common::addr::Address;
use crate::common::error::TraceError;

/// Kind of memory access recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Instruction fetch; the data cache does not see it.
    Instruction,
    /// Data load.
    Load,
    /// Data store.
    Store,
    /// Data modify: a load followed by a store to the same address.
    Modify,
}

impl Operation {
    /// Parses a single-letter operation code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Self::Instruction),
            "L" => Some(Self::Load),
            "S" => Some(Self::Store),
            "M" => Some(Self::Modify),
            _ => None,
        }
    }

    /// The single-letter operation code.
    pub const fn code(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of cache lookup cycles the operation performs.
    pub const fn lookups(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How hexadecimal addresses are parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HexMode {
    /// Any non-hex character is an error.
    #[default]
    Strict,
    /// Non-hex characters count as the digit zero and overflow wraps.
    ///
    /// Matches the behavior of older trace tools that never rejected an address.
    Lenient,
}

/// One parsed trace line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// The access kind.
    pub op: Operation,
    /// The accessed byte address.
    pub address: Address,
    /// Access size in bytes, when the line carries one.
    pub size: Option<u32>,
    /// The line text with surrounding whitespace removed, echoed in verbose mode.
    pub text: String,
}

impl TraceEntry {
    /// Builds an entry without source text; the text is synthesised as `OP addr`.
    pub fn new(op: Operation, address: impl Into<Address>) -> Self {
        let address = address.into();
        Self {
            op,
            address,
            size: None,
            text: format!("{} {:x}", op.code(), address.val()),
        }
    }
}

/// Parses a hexadecimal address, with or without a `0x` prefix.
///
/// Returns `None` for empty input, and in strict mode for any non-hex
/// character or a value wider than 64 bits.
pub fn parse_hex(text: &str, mode: HexMode) -> Option<u64> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() {
        return None;
    }

    match mode {
        HexMode::Strict => {
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            u64::from_str_radix(digits, 16).ok()
        }
        HexMode::Lenient => Some(digits.chars().fold(0u64, |acc, c| {
            let digit = c.to_digit(16).map_or(0, u64::from);
            acc.wrapping_mul(16).wrapping_add(digit)
        })),
    }
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - Raw line text.
/// * `line_no` - 1-based line number used in error messages.
/// * `mode` - Address parsing mode.
///
/// # Returns
///
/// `Ok(None)` for lines that carry no access (blank or banner lines).
pub fn parse_line(line: &str, line_no: usize, mode: HexMode) -> Result<Option<TraceEntry>, TraceError> {
    let text = line.trim();
    if text.is_empty() || text.starts_with("==") {
        return Ok(None);
    }

    let (code, rest) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(code, rest)| (code, rest.trim()));

    let op = Operation::from_code(code).ok_or_else(|| TraceError::UnknownOperation {
        line: line_no,
        op: code.to_string(),
    })?;

    let (addr_text, size_text) = match rest.split_once(',') {
        Some((addr, size)) => (addr.trim(), Some(size.trim())),
        None => (rest, None),
    };
    if addr_text.is_empty() {
        return Err(TraceError::MissingAddress { line: line_no });
    }

    let address = parse_hex(addr_text, mode).ok_or_else(|| TraceError::InvalidAddress {
        line: line_no,
        text: addr_text.to_string(),
    })?;

    let size = size_text
        .map(|s| {
            s.parse::<u32>().map_err(|_| TraceError::InvalidSize {
                line: line_no,
                text: s.to_string(),
            })
        })
        .transpose()?;

    Ok(Some(TraceEntry {
        op,
        address: Address(address),
        size,
        text: text.to_string(),
    }))
}

/// Streaming trace parser over any buffered reader.
///
/// Yields one `Result` per access line; skipped lines produce nothing.
/// Callers are expected to stop at the first error.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    mode: HexMode,
}

impl<R: BufRead> TraceReader<R> {
    /// Creates a strict-mode reader.
    pub fn new(reader: R) -> Self {
        Self::with_mode(reader, HexMode::Strict)
    }

    /// Creates a reader with the given address parsing mode.
    pub fn with_mode(reader: R, mode: HexMode) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            mode,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            match parse_line(&line, self.line_no, self.mode) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parses a whole in-memory trace.
pub fn parse_str(text: &str, mode: HexMode) -> Result<Vec<TraceEntry>, TraceError> {
    TraceReader::with_mode(text.as_bytes(), mode).collect()
}
