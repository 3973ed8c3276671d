// crates/weathervane-core/src/runtime/dispatcher.rs
// ============================================================================
// Module: Dispatcher
// Description: Per-request orchestration of interceptors, handlers, recovery.
// Purpose: Route one envelope end-to-end and fail closed on double faults.
// Dependencies: crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! One dispatch runs synchronously end-to-end: request interceptors in
//! registration order, first-match handler selection, error-boundary
//! recovery when the action fails or nothing matched, then response
//! observers. Handler failures are caught exactly once and redirected to
//! the boundary; a boundary failure terminates the dispatch with an
//! unrecoverable error. The dispatcher holds only read-only state and is
//! safe to share across concurrent invocations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::context::RequestContext;
use crate::core::request::RequestEnvelope;
use crate::core::response::Response;
use crate::core::response::ResponseEnvelope;
use crate::runtime::boundary::DispatchFailure;
use crate::runtime::boundary::ErrorBoundary;
use crate::runtime::interceptor::RequestInterceptor;
use crate::runtime::interceptor::ResponseInterceptor;
use crate::runtime::log::DispatchLog;
use crate::runtime::log::NoopDispatchLog;
use crate::runtime::registry::HandlerError;
use crate::runtime::registry::HandlerRegistry;
use crate::runtime::registry::RequestHandler;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Terminal dispatch errors.
///
/// # Invariants
/// - Raised only when the error boundary itself fails; recoverable failures
///   never surface here.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The boundary failed while recovering from a dispatch failure.
    #[error("unrecoverable dispatch failure (while recovering from: {failure})")]
    Unrecoverable {
        /// Description of the failure that triggered recovery.
        failure: String,
        /// The error the boundary raised.
        #[source]
        source: HandlerError,
    },
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Per-request orchestrator over registry, interceptors, and boundary.
///
/// # Invariants
/// - Constructed once at process start; read-only afterward.
/// - `Send + Sync`: concurrent invocations share it behind `Arc`.
pub struct Dispatcher {
    /// Ordered first-match handler registry.
    registry: HandlerRegistry,
    /// Pre-dispatch hooks in registration order.
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    /// Post-dispatch observers in registration order.
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    /// Catch-all recovery layer.
    boundary: ErrorBoundary,
    /// Event sink shared with every dispatch.
    log: Arc<dyn DispatchLog>,
}

impl Dispatcher {
    /// Starts building a dispatcher.
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Routes one envelope to one finalized response.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Unrecoverable`] when the error boundary
    /// itself fails; every other failure is recovered into a spoken error
    /// response.
    pub fn dispatch(&self, envelope: &RequestEnvelope) -> Result<Response, DispatchError> {
        let mut ctx = RequestContext::new(envelope, Arc::clone(&self.log));

        for interceptor in &self.request_interceptors {
            interceptor.process(&mut ctx);
        }

        let outcome = match self.registry.select(&ctx) {
            Some(handler) => Self::run_action(handler, &ctx),
            None => Err(DispatchFailure::NoHandlerMatched {
                kind: ctx.request().kind.clone(),
                intent: ctx.request().intent_name().map(str::to_string),
            }),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(failure) => {
                self.boundary.recover(&ctx, &failure).map_err(|source| {
                    DispatchError::Unrecoverable {
                        failure: failure.to_string(),
                        source,
                    }
                })?
            }
        };

        for interceptor in &self.response_interceptors {
            interceptor.process(&ctx, &response);
        }

        Ok(response)
    }

    /// Routes one envelope and wraps the response for the wire.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Unrecoverable`] under the same conditions as
    /// [`Dispatcher::dispatch`].
    pub fn dispatch_to_envelope(
        &self,
        envelope: &RequestEnvelope,
    ) -> Result<ResponseEnvelope, DispatchError> {
        self.dispatch(envelope).map(ResponseEnvelope::new)
    }

    /// Invokes a claimed handler, tagging failures with its label.
    fn run_action(
        handler: &dyn RequestHandler,
        ctx: &RequestContext<'_>,
    ) -> Result<Response, DispatchFailure> {
        handler.handle(ctx).map_err(|source| DispatchFailure::HandlerActionFailed {
            handler: handler.name(),
            source,
        })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.registry.len())
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder assembling a dispatcher at process start.
///
/// # Invariants
/// - Registration order of handlers and interceptors is evaluation order.
#[derive(Default)]
pub struct DispatcherBuilder {
    /// Handlers in registration order.
    registry: HandlerRegistry,
    /// Pre-dispatch hooks in registration order.
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    /// Post-dispatch observers in registration order.
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    /// Event sink; defaults to the no-op sink.
    log: Option<Arc<dyn DispatchLog>>,
}

impl DispatcherBuilder {
    /// Appends a handler at the end of the evaluation order.
    #[must_use]
    pub fn handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.registry.register(Box::new(handler));
        self
    }

    /// Appends an already-boxed handler at the end of the evaluation order.
    #[must_use]
    pub fn boxed_handler(mut self, handler: Box<dyn RequestHandler>) -> Self {
        self.registry.register(handler);
        self
    }

    /// Appends a request interceptor at the end of the chain.
    #[must_use]
    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    /// Appends a response observer at the end of the chain.
    #[must_use]
    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Box::new(interceptor));
        self
    }

    /// Sets the event sink shared with every dispatch.
    #[must_use]
    pub fn log(mut self, log: Arc<dyn DispatchLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Finalizes the dispatcher.
    #[must_use]
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            registry: self.registry,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            boundary: ErrorBoundary,
            log: self.log.unwrap_or_else(|| Arc::new(NoopDispatchLog)),
        }
    }
}
