// crates/weathervane-core/src/core/context.rs
// ============================================================================
// Module: Request Context
// Description: Per-dispatch context threaded through interceptors and handlers.
// Purpose: Carry the request, locale, localizer, and log handle explicitly.
// Dependencies: crate::core::request, crate::i18n, crate::runtime::log
// ============================================================================

//! ## Overview
//! A [`RequestContext`] is created once per dispatch and owned exclusively by
//! the dispatcher for the lifetime of that call. It replaces the source
//! platform's mutable per-request attribute bag with explicit typed state:
//! the localization interceptor installs a [`Localizer`] into a dedicated
//! slot, and every later-running interceptor and handler reads the same
//! instance bound to the request's locale.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::request::Request;
use crate::core::request::RequestEnvelope;
use crate::i18n::LocalizeError;
use crate::i18n::Localizer;
use crate::runtime::log::DispatchEvent;
use crate::runtime::log::DispatchLog;

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Per-dispatch context value.
///
/// # Invariants
/// - Never shared across concurrent dispatches; discarded once the response
///   is produced.
/// - `locale` is copied verbatim from the request envelope.
pub struct RequestContext<'a> {
    /// The inbound envelope being dispatched.
    envelope: &'a RequestEnvelope,
    /// Locale identifier taken verbatim from the request.
    locale: String,
    /// Localizer installed by the localization interceptor.
    localizer: Option<Localizer>,
    /// Dispatch log sink shared by this invocation.
    log: Arc<dyn DispatchLog>,
}

impl<'a> RequestContext<'a> {
    /// Wraps an envelope into a fresh context for one dispatch.
    #[must_use]
    pub fn new(envelope: &'a RequestEnvelope, log: Arc<dyn DispatchLog>) -> Self {
        Self {
            envelope,
            locale: envelope.request.locale.clone(),
            localizer: None,
            log,
        }
    }

    /// Returns the inbound envelope.
    #[must_use]
    pub const fn envelope(&self) -> &'a RequestEnvelope {
        self.envelope
    }

    /// Returns the request body driving routing.
    #[must_use]
    pub const fn request(&self) -> &'a Request {
        &self.envelope.request
    }

    /// Returns the request's locale identifier, verbatim.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns whether the requesting device can render visual documents.
    #[must_use]
    pub fn supports_visual(&self) -> bool {
        self.envelope.supports_visual()
    }

    /// Installs the localizer for this dispatch.
    ///
    /// Later installations replace earlier ones; the localization
    /// interceptor runs first, so handlers observe exactly one instance.
    pub fn install_localizer(&mut self, localizer: Localizer) {
        self.localizer = Some(localizer);
    }

    /// Returns the localizer installed for this dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizeError::NotInstalled`] when no localization
    /// interceptor has run for this dispatch.
    pub fn localizer(&self) -> Result<&Localizer, LocalizeError> {
        self.localizer.as_ref().ok_or(LocalizeError::NotInstalled)
    }

    /// Records a dispatch event through this invocation's log sink.
    pub fn record(&self, event: &DispatchEvent) {
        self.log.record(event);
    }
}
