// crates/weathervane-core/src/runtime/mod.rs
// ============================================================================
// Module: Dispatch Runtime
// Description: Handler registry, interceptor chain, error boundary, dispatcher.
// Purpose: Route one inbound envelope to one finalized response.
// Dependencies: crate::core, crate::i18n, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The runtime is the reusable heart of the skill: an ordered first-match
//! handler registry, pre/post interceptor chains, a catch-all error
//! boundary, and the dispatcher orchestrating them per request. All
//! components are registered at process start and shared read-only across
//! concurrent dispatches.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod boundary;
pub mod dispatcher;
pub mod interceptor;
pub mod log;
pub mod registry;


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use boundary::DispatchFailure;
pub use boundary::ErrorBoundary;
pub use dispatcher::DispatchError;
pub use dispatcher::Dispatcher;
pub use dispatcher::DispatcherBuilder;
pub use interceptor::LocalizationInterceptor;
pub use interceptor::LoggingRequestInterceptor;
pub use interceptor::LoggingResponseInterceptor;
pub use interceptor::RequestInterceptor;
pub use interceptor::ResponseInterceptor;
pub use log::DispatchEvent;
pub use log::DispatchLog;
pub use log::NoopDispatchLog;
pub use registry::HandlerError;
pub use registry::HandlerRegistry;
pub use registry::RequestHandler;
