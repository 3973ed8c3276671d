// crates/weathervane-core/src/runtime/log.rs
// ============================================================================
// Module: Dispatch Log
// Description: Sink interface and typed events for dispatch observability.
// Purpose: Record payloads, recovered failures, and session-end reasons.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Dispatch logging goes through a sink trait so deployments can route
//! events anywhere without redesign: the CLI writes JSON lines to stderr,
//! tests collect events in memory, and the default sink drops them. Events
//! carry stable labels for filtering. Logging is the pipeline's only side
//! effect besides the returned response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Events
// ============================================================================

/// One dispatch observability event.
///
/// # Invariants
/// - Variants are stable for filtering and serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DispatchEvent {
    /// Inbound envelope payload, recorded before any handler runs.
    InboundRequest {
        /// The envelope as received, unknown fields included.
        payload: Value,
    },
    /// Outbound response payload, recorded after finalization.
    OutboundResponse {
        /// The finalized response.
        payload: Value,
    },
    /// A failure recovered by the error boundary.
    HandlerFailure {
        /// Top-level failure message.
        message: String,
        /// Source chain, outermost first.
        chain: Vec<String>,
    },
    /// Session teardown notification.
    SessionEnded {
        /// Reason reported by the platform, when present.
        reason: Option<String>,
    },
}

impl DispatchEvent {
    /// Returns a stable label for the event.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InboundRequest { .. } => "inbound_request",
            Self::OutboundResponse { .. } => "outbound_response",
            Self::HandlerFailure { .. } => "handler_failure",
            Self::SessionEnded { .. } => "session_ended",
        }
    }
}

/// Collects an error's source chain, outermost first.
#[must_use]
pub fn failure_chain(error: &dyn std::error::Error) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

// ============================================================================
// SECTION: Sink
// ============================================================================

/// Dispatch event sink.
///
/// Implementations must be cheap and infallible; the dispatcher never
/// blocks on logging.
pub trait DispatchLog: Send + Sync {
    /// Records one dispatch event.
    fn record(&self, event: &DispatchEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDispatchLog;

impl DispatchLog for NoopDispatchLog {
    fn record(&self, _event: &DispatchEvent) {}
}
