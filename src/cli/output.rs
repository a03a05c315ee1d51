//! Snapshot output.
//!
//! One JSON object per line, so the stream can be piped into `jq` or
//! replayed line by line.

use serde::Serialize;
use std::io::Write;

use crate::demos::DemoEngine;
use crate::error::LabResult;

/// One emitted snapshot.
#[derive(Debug, Serialize)]
pub struct Frame<'a, S> {
    /// Demo display name.
    pub demo: &'a str,
    /// Ticks since reset.
    pub step: u64,
    /// Checksum of `state`.
    pub checksum: u64,
    /// The snapshot itself.
    pub state: S,
}

/// Write the engine's current snapshot as a single JSON line.
///
/// # Errors
///
/// Returns error if serialization or the write fails.
pub fn write_frame<E: DemoEngine, W: Write>(out: &mut W, engine: &E) -> LabResult<()> {
    let frame = Frame {
        demo: engine.name(),
        step: engine.step_count(),
        checksum: engine.state_checksum(),
        state: engine.state(),
    };
    serde_json::to_writer(&mut *out, &frame)?;
    writeln!(out)?;
    Ok(())
}
