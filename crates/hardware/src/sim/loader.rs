//! Trace file loader.
//!
//! Opens a trace file and wraps it in a streaming [`TraceReader`], so traces
//! of any length are replayed without being held in memory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::trace::{HexMode, TraceReader};
use crate::common::error::TraceError;

/// Opens a trace file for streaming.
///
/// # Arguments
///
/// * `path` - Path to the trace file.
/// * `mode` - Address parsing mode.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened. Parse errors are
/// reported later, by the reader, with the offending line number.
pub fn open_trace(path: impl AsRef<Path>, mode: HexMode) -> Result<TraceReader<BufReader<File>>, TraceError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    debug!(path = %path.display(), ?mode, "opened trace");
    Ok(TraceReader::with_mode(BufReader::new(file), mode))
}
