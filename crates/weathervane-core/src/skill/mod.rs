// crates/weathervane-core/src/skill/mod.rs
// ============================================================================
// Module: Weather Skill
// Description: Built-in handlers and the assembled skill definition.
// Purpose: Wire catalog, report, and handlers into a ready dispatcher.
// Dependencies: crate::core, crate::i18n, crate::runtime
// ============================================================================

//! ## Overview
//! A [`SkillDefinition`] bundles the initialize-once objects (string
//! catalog, weather report, document links) and assembles them into a
//! [`Dispatcher`] with the built-in handler order: weather, help, exit,
//! fallback, session-ended. The definition is explicit configuration passed
//! by value, not hidden global state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod session;
pub mod weather;


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use session::ExitHandler;
pub use session::FallbackHandler;
pub use session::HelpHandler;
pub use session::SessionEndedHandler;
pub use weather::DocumentLinks;
pub use weather::WeatherAssets;
pub use weather::WeatherHandler;
pub use weather::WeatherReport;
pub use weather::assets_for;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::i18n::StringCatalog;
use crate::i18n::VariantSelector;
use crate::i18n::builtin_catalog;
use crate::runtime::dispatcher::Dispatcher;
use crate::runtime::interceptor::LocalizationInterceptor;
use crate::runtime::interceptor::LoggingRequestInterceptor;
use crate::runtime::interceptor::LoggingResponseInterceptor;
use crate::runtime::log::DispatchLog;
use crate::runtime::log::NoopDispatchLog;

// ============================================================================
// SECTION: Skill Definition
// ============================================================================

/// Initialize-once configuration assembled into a dispatcher.
///
/// # Invariants
/// - Built once at process start; the resulting dispatcher is shared
///   read-only across invocations.
#[derive(Debug, Clone)]
pub struct SkillDefinition {
    /// Speech content catalog.
    pub catalog: StringCatalog,
    /// Canned weather report values.
    pub report: WeatherReport,
    /// Rendering-document links.
    pub documents: DocumentLinks,
}

impl Default for SkillDefinition {
    fn default() -> Self {
        Self {
            catalog: builtin_catalog(),
            report: WeatherReport::default(),
            documents: DocumentLinks::default(),
        }
    }
}

impl SkillDefinition {
    /// Assembles the dispatcher with the given event sink.
    #[must_use]
    pub fn into_dispatcher(self, log: Arc<dyn DispatchLog>) -> Dispatcher {
        let catalog = Arc::new(self.catalog);
        self::assemble(catalog, self.report, self.documents, LocalizationInterceptor::new, log)
    }

    /// Assembles the dispatcher with an explicit variant selector.
    ///
    /// Used by tests to make variant-pool selection deterministic.
    #[must_use]
    pub fn into_dispatcher_with_selector(
        self,
        selector: Arc<dyn VariantSelector>,
        log: Arc<dyn DispatchLog>,
    ) -> Dispatcher {
        let catalog = Arc::new(self.catalog);
        self::assemble(
            catalog,
            self.report,
            self.documents,
            move |catalog| LocalizationInterceptor::with_selector(catalog, selector),
            log,
        )
    }

    /// Assembles the dispatcher with the no-op event sink.
    #[must_use]
    pub fn into_silent_dispatcher(self) -> Dispatcher {
        self.into_dispatcher(Arc::new(NoopDispatchLog))
    }
}

/// Wires interceptors and handlers in the skill's registration order.
fn assemble(
    catalog: Arc<StringCatalog>,
    report: WeatherReport,
    documents: DocumentLinks,
    localization: impl FnOnce(Arc<StringCatalog>) -> LocalizationInterceptor,
    log: Arc<dyn DispatchLog>,
) -> Dispatcher {
    Dispatcher::builder()
        .request_interceptor(localization(catalog))
        .request_interceptor(LoggingRequestInterceptor)
        .response_interceptor(LoggingResponseInterceptor)
        .handler(WeatherHandler::new(report, documents))
        .handler(HelpHandler)
        .handler(ExitHandler)
        .handler(FallbackHandler)
        .handler(SessionEndedHandler)
        .log(log)
        .build()
}
