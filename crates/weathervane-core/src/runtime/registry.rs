// crates/weathervane-core/src/runtime/registry.rs
// ============================================================================
// Module: Handler Registry
// Description: Handler trait and the ordered first-match registry.
// Purpose: Select exactly one action per dispatch by registration order.
// Dependencies: crate::core, crate::i18n, thiserror
// ============================================================================

//! ## Overview
//! A handler is an explicit predicate/action pair: `can_handle` examines
//! only the request's type and intent name, `handle` produces the response.
//! The registry tests predicates in registration order and short-circuits on
//! the first match; later matches are never considered. Registration happens
//! once at process start and the registry is read-only afterward.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::context::RequestContext;
use crate::core::response::Response;
use crate::i18n::LocalizeError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures a handler action can raise.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Message resolution failed inside the action.
    #[error(transparent)]
    Localize(#[from] LocalizeError),
    /// The action failed for a handler-specific reason.
    #[error("handler action failed: {0}")]
    Action(String),
}

// ============================================================================
// SECTION: Handler Trait
// ============================================================================

/// An explicit predicate/action pair tested against incoming requests.
pub trait RequestHandler: Send + Sync {
    /// Returns a stable label for failure logging.
    fn name(&self) -> &'static str;

    /// Returns whether this handler claims the request.
    ///
    /// Predicates examine only the request's `type` field and, for
    /// intent-type requests, the intent name.
    fn can_handle(&self, ctx: &RequestContext<'_>) -> bool;

    /// Produces the response for a claimed request.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the action fails; the dispatcher
    /// redirects the failure to the error boundary.
    fn handle(&self, ctx: &RequestContext<'_>) -> Result<Response, HandlerError>;
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Ordered first-match handler registry.
///
/// # Invariants
/// - Registration order is evaluation order; first true predicate wins.
/// - Initialized once at process start; read-only afterward.
#[derive(Default)]
pub struct HandlerRegistry {
    /// Handlers in registration order.
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler at the end of the evaluation order.
    pub fn register(&mut self, handler: Box<dyn RequestHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the first handler whose predicate claims the request.
    #[must_use]
    pub fn select(&self, ctx: &RequestContext<'_>) -> Option<&dyn RequestHandler> {
        self.handlers.iter().find(|handler| handler.can_handle(ctx)).map(|handler| &**handler)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry").field("len", &self.handlers.len()).finish()
    }
}
