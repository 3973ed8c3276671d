// crates/weathervane-core/src/runtime/boundary.rs
// ============================================================================
// Module: Error Boundary
// Description: Catch-all recovery for failed or unclaimed requests.
// Purpose: Turn recoverable dispatch failures into a spoken error response.
// Dependencies: crate::core, crate::i18n, crate::runtime
// ============================================================================

//! ## Overview
//! The error boundary is the dispatch pipeline's single recovery layer. It
//! records the triggering failure's message and source chain, resolves the
//! generic localized error message, and answers with that message spoken and
//! reprompted, carrying no directives. If the boundary itself cannot resolve
//! a string the dispatch fails terminally; nothing catches boundary
//! failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::core::context::RequestContext;
use crate::core::response::Response;
use crate::i18n::message_keys;
use crate::runtime::log::DispatchEvent;
use crate::runtime::log::failure_chain;
use crate::runtime::registry::HandlerError;

// ============================================================================
// SECTION: Dispatch Failures
// ============================================================================

/// Recoverable conditions redirected to the error boundary.
///
/// # Invariants
/// - Variants are stable for logging and programmatic handling.
#[derive(Debug)]
pub enum DispatchFailure {
    /// No registered predicate accepted the request.
    NoHandlerMatched {
        /// Request type identifier that went unclaimed.
        kind: String,
        /// Intent name for intent-type requests.
        intent: Option<String>,
    },
    /// A claimed handler's action failed during execution.
    HandlerActionFailed {
        /// Stable label of the failing handler.
        handler: &'static str,
        /// The failure the action raised.
        source: HandlerError,
    },
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHandlerMatched {
                kind,
                intent: Some(intent),
            } => {
                write!(f, "no handler matched intent '{intent}' (request type '{kind}')")
            }
            Self::NoHandlerMatched {
                kind,
                intent: None,
            } => write!(f, "no handler matched request type '{kind}'"),
            Self::HandlerActionFailed {
                handler, ..
            } => write!(f, "handler '{handler}' action failed"),
        }
    }
}

impl std::error::Error for DispatchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoHandlerMatched { .. } => None,
            Self::HandlerActionFailed {
                source, ..
            } => Some(source),
        }
    }
}

// ============================================================================
// SECTION: Error Boundary
// ============================================================================

/// Catch-all recovery handler, conceptually registered last.
///
/// Its predicate always matches; the dispatcher invokes it only when no
/// registered handler claimed the request or the claimed action failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorBoundary;

impl ErrorBoundary {
    /// Recovers from a dispatch failure with a spoken error response.
    ///
    /// The triggering failure is recorded before recovery. The produced
    /// response carries only the generic localized error message, spoken and
    /// reprompted.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the generic error message itself cannot
    /// be resolved; the dispatcher treats that as unrecoverable.
    pub fn recover(
        &self,
        ctx: &RequestContext<'_>,
        failure: &DispatchFailure,
    ) -> Result<Response, HandlerError> {
        ctx.record(&DispatchEvent::HandlerFailure {
            message: failure.to_string(),
            chain: failure_chain(failure),
        });
        let localizer = ctx.localizer()?;
        let message = localizer.resolve(message_keys::ERROR_MESSAGE)?;
        Ok(Response::builder().speak(&message).reprompt(&message).finalize())
    }
}
