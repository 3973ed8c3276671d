// crates/weathervane-cli/src/logging.rs
// ============================================================================
// Module: Dispatch Logging
// Description: JSON-lines dispatch log sink for CLI and server output.
// Purpose: Surface dispatch events on stderr without touching stdout payloads.
// Dependencies: serde_json, weathervane-core
// ============================================================================

//! ## Overview
//! The binary records dispatch events as one JSON object per line on a
//! writer (stderr in production, a buffer in tests). The response payload on
//! stdout stays machine-readable because observability never mixes streams.
//! The sink is infallible by contract; write errors are swallowed rather
//! than failing a dispatch over logging.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use weathervane_core::DispatchEvent;
use weathervane_core::DispatchLog;

// ============================================================================
// SECTION: JSON-Lines Sink
// ============================================================================

/// Dispatch log sink writing one JSON object per line.
pub struct JsonLineLog {
    /// Destination writer behind a lock for `&self` recording.
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonLineLog {
    /// Creates a sink over an arbitrary writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }
}

impl DispatchLog for JsonLineLog {
    fn record(&self, event: &DispatchEvent) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
        }
    }
}

impl std::fmt::Debug for JsonLineLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLineLog").finish_non_exhaustive()
    }
}
