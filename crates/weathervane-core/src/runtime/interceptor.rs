// crates/weathervane-core/src/runtime/interceptor.rs
// ============================================================================
// Module: Interceptor Chain
// Description: Pre/post hooks run around every dispatched request.
// Purpose: Install localization and record payloads without touching routing.
// Dependencies: crate::core, crate::i18n, crate::runtime::log, serde_json
// ============================================================================

//! ## Overview
//! Request interceptors run in registration order before any handler and may
//! mutate the context (never the request itself); this is how the localizer
//! is injected. Response interceptors run after the response is finalized
//! and observe it read-only by convention. Interceptors are total functions:
//! installing a localizer and recording payloads cannot fail, which keeps
//! the dispatch error set closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use crate::core::context::RequestContext;
use crate::core::response::Response;
use crate::i18n::Localizer;
use crate::i18n::StringCatalog;
use crate::i18n::UniformVariantSelector;
use crate::i18n::VariantSelector;
use crate::runtime::log::DispatchEvent;

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Pre-dispatch hook run before any handler.
pub trait RequestInterceptor: Send + Sync {
    /// Processes the context; may mutate it but not the request.
    fn process(&self, ctx: &mut RequestContext<'_>);
}

/// Post-dispatch hook run after the response is finalized.
///
/// Observers receive a shared reference; mutation of the finalized response
/// is not expressible through this seam.
pub trait ResponseInterceptor: Send + Sync {
    /// Observes the finalized response.
    fn process(&self, ctx: &RequestContext<'_>, response: &Response);
}

// ============================================================================
// SECTION: Localization Interceptor
// ============================================================================

/// Installs a per-request [`Localizer`] bound to the request's locale.
///
/// # Invariants
/// - Registered first, so every later-running interceptor and handler
///   shares one localizer for the whole request.
pub struct LocalizationInterceptor {
    /// Shared read-only catalog.
    catalog: Arc<StringCatalog>,
    /// Variant selection strategy handed to every localizer.
    selector: Arc<dyn VariantSelector>,
}

impl LocalizationInterceptor {
    /// Creates the interceptor with uniform OS-entropy variant selection.
    #[must_use]
    pub fn new(catalog: Arc<StringCatalog>) -> Self {
        Self::with_selector(catalog, Arc::new(UniformVariantSelector))
    }

    /// Creates the interceptor with an explicit selection strategy.
    #[must_use]
    pub fn with_selector(catalog: Arc<StringCatalog>, selector: Arc<dyn VariantSelector>) -> Self {
        Self {
            catalog,
            selector,
        }
    }
}

impl RequestInterceptor for LocalizationInterceptor {
    fn process(&self, ctx: &mut RequestContext<'_>) {
        let localizer =
            Localizer::new(Arc::clone(&self.catalog), ctx.locale(), Arc::clone(&self.selector));
        ctx.install_localizer(localizer);
    }
}

// ============================================================================
// SECTION: Logging Interceptors
// ============================================================================

/// Records every inbound envelope payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingRequestInterceptor;

impl RequestInterceptor for LoggingRequestInterceptor {
    fn process(&self, ctx: &mut RequestContext<'_>) {
        let payload = serde_json::to_value(ctx.envelope()).unwrap_or(Value::Null);
        ctx.record(&DispatchEvent::InboundRequest {
            payload,
        });
    }
}

/// Records every outbound response payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingResponseInterceptor;

impl ResponseInterceptor for LoggingResponseInterceptor {
    fn process(&self, ctx: &RequestContext<'_>, response: &Response) {
        let payload = serde_json::to_value(response).unwrap_or(Value::Null);
        ctx.record(&DispatchEvent::OutboundResponse {
            payload,
        });
    }
}
