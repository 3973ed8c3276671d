// crates/weathervane-core/src/lib.rs
// ============================================================================
// Module: Weathervane Core
// Description: Request routing, localization, and the built-in weather skill.
// Purpose: Provide the dispatch pipeline shared by every invocation surface.
// Dependencies: rand, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Weathervane Core implements the request-routing and localization pipeline
//! for a voice-assistant weather skill. An incoming platform envelope is
//! wrapped into a per-dispatch context, run through request interceptors
//! (locale resolution, payload logging), matched against an ordered handler
//! registry (first predicate wins), and recovered by a catch-all error
//! boundary when no handler claims the request or the claimed action fails.
//!
//! The handler registry and string catalog are built once at process start
//! and never mutated afterward; concurrent invocations share them read-only.
//! Inbound envelopes are untrusted platform input and are carried opaquely
//! beyond the fields the router reads.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod i18n;
pub mod runtime;
pub mod skill;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use self::core::DeviceContext;
pub use self::core::Directive;
pub use self::core::DocumentLink;
pub use self::core::EnvelopeContext;
pub use self::core::Intent;
pub use self::core::OutputSpeech;
pub use self::core::RenderDocumentPayload;
pub use self::core::Reprompt;
pub use self::core::Request;
pub use self::core::RequestContext;
pub use self::core::RequestEnvelope;
pub use self::core::Response;
pub use self::core::ResponseBuilder;
pub use self::core::ResponseEnvelope;
pub use self::core::SystemContext;
pub use self::core::VISUAL_INTERFACE;
pub use self::core::intents;
pub use self::core::request_types;
pub use self::i18n::LocaleStrings;
pub use self::i18n::LocalizeError;
pub use self::i18n::Localizer;
pub use self::i18n::MessageArg;
pub use self::i18n::MessageEntry;
pub use self::i18n::SeededVariantSelector;
pub use self::i18n::StringCatalog;
pub use self::i18n::UniformVariantSelector;
pub use self::i18n::VariantSelector;
pub use self::runtime::DispatchError;
pub use self::runtime::DispatchEvent;
pub use self::runtime::DispatchFailure;
pub use self::runtime::DispatchLog;
pub use self::runtime::Dispatcher;
pub use self::runtime::DispatcherBuilder;
pub use self::runtime::ErrorBoundary;
pub use self::runtime::HandlerError;
pub use self::runtime::HandlerRegistry;
pub use self::runtime::LocalizationInterceptor;
pub use self::runtime::LoggingRequestInterceptor;
pub use self::runtime::LoggingResponseInterceptor;
pub use self::runtime::NoopDispatchLog;
pub use self::runtime::RequestHandler;
pub use self::runtime::RequestInterceptor;
pub use self::runtime::ResponseInterceptor;
pub use self::skill::DocumentLinks;
pub use self::skill::SkillDefinition;
pub use self::skill::WeatherReport;
