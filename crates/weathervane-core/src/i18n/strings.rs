// crates/weathervane-core/src/i18n/strings.rs
// ============================================================================
// Module: Built-in Strings
// Description: Message keys and the built-in English/Italian catalog tables.
// Purpose: Ship the skill's default speech content as static data.
// Dependencies: crate::i18n::catalog
// ============================================================================

//! ## Overview
//! The built-in catalog carries the skill's speech content for the `en` and
//! `it` locales. Keys are referenced by the built-in handlers through
//! [`message_keys`]; [`REQUIRED_MESSAGE_KEYS`] lists every key a handler
//! call site can reach, which completeness validation checks per locale.
//! The tables are opaque configuration data, not routing logic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::i18n::catalog::LocaleStrings;
use crate::i18n::catalog::StringCatalog;

// ============================================================================
// SECTION: Message Keys
// ============================================================================

/// Message keys referenced by the built-in handlers.
pub mod message_keys {
    /// Skill display name.
    pub const SKILL_NAME: &str = "SKILL_NAME";
    /// Help prompt spoken for the help intent.
    pub const HELP_MESSAGE: &str = "HELP_MESSAGE";
    /// Reprompt paired with the help message.
    pub const HELP_REPROMPT: &str = "HELP_REPROMPT";
    /// Redirect spoken for unrecognized utterances.
    pub const FALLBACK_MESSAGE: &str = "FALLBACK_MESSAGE";
    /// Reprompt paired with the fallback message.
    pub const FALLBACK_REPROMPT: &str = "FALLBACK_REPROMPT";
    /// Generic error message spoken by the error boundary.
    pub const ERROR_MESSAGE: &str = "ERROR_MESSAGE";
    /// Farewell spoken for cancel/stop.
    pub const STOP_MESSAGE: &str = "STOP_MESSAGE";
    /// Weather report template with temperature and description arguments.
    pub const WEATHER_REPORT: &str = "WEATHER_REPORT";
}

/// Every key some handler call site can reach.
///
/// # Invariants
/// - Completeness validation requires each of these in every declared locale.
pub const REQUIRED_MESSAGE_KEYS: &[&str] = &[
    message_keys::HELP_MESSAGE,
    message_keys::HELP_REPROMPT,
    message_keys::FALLBACK_MESSAGE,
    message_keys::FALLBACK_REPROMPT,
    message_keys::ERROR_MESSAGE,
    message_keys::STOP_MESSAGE,
    message_keys::WEATHER_REPORT,
];

/// Fallback locale configured on the built-in catalog.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en";

// ============================================================================
// SECTION: Catalog Tables
// ============================================================================

/// Built-in English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    (message_keys::SKILL_NAME, "APL Weather"),
    (
        message_keys::HELP_MESSAGE,
        "You can say what's the weather, or, you can say exit... What can I help you with?",
    ),
    (message_keys::HELP_REPROMPT, "What can I help you with?"),
    (
        message_keys::FALLBACK_MESSAGE,
        "The APL Weather skill can't help you with that.  It can tell you the weather if you say \
         tell me the weather. What can I help you with?",
    ),
    (message_keys::FALLBACK_REPROMPT, "What can I help you with?"),
    (message_keys::ERROR_MESSAGE, "Sorry, an error occurred."),
    (message_keys::STOP_MESSAGE, "Goodbye!"),
    (
        message_keys::WEATHER_REPORT,
        "Right now it's {currentTemp} degrees and {weatherDescription}.",
    ),
];

/// Built-in Italian catalog entries.
///
/// The `WEATHER_REPORT` template names a `{temperature}` placeholder that the
/// weather handler does not supply; it stays literal in the resolved string,
/// matching the substitution policy for unresolved placeholders.
const CATALOG_IT: &[(&str, &str)] = &[
    (message_keys::SKILL_NAME, "APL Meteo"),
    (
        message_keys::HELP_MESSAGE,
        "Puoi chiedermi com'è il meteo o puoi chiudermi dicendo \"esci\"... Come posso aiutarti?",
    ),
    (message_keys::HELP_REPROMPT, "Come posso aiutarti?"),
    (
        message_keys::FALLBACK_MESSAGE,
        "Non posso aiutarti con questo. Posso dirti com'è il tempo, basta che mi chiedi: com'è il \
         meteo. Come posso aiutarti?",
    ),
    (message_keys::FALLBACK_REPROMPT, "Come posso aiutarti?"),
    (message_keys::ERROR_MESSAGE, "Spiacente, si è verificato un errore."),
    (message_keys::STOP_MESSAGE, "A presto!"),
    (
        message_keys::WEATHER_REPORT,
        "In questo momento ci sono {temperature} gradi e {weatherDescription}.",
    ),
];

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds a locale entry set from a static table.
fn locale_from_table(table: &[(&str, &str)]) -> LocaleStrings {
    let mut strings = LocaleStrings::new();
    for (key, value) in table {
        strings.insert(*key, *value);
    }
    strings
}

/// Builds the built-in catalog with English fallback.
#[must_use]
pub fn builtin_catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new();
    catalog.add_locale("en", locale_from_table(CATALOG_EN));
    catalog.add_locale("it", locale_from_table(CATALOG_IT));
    catalog.set_fallback_locale(Some(DEFAULT_FALLBACK_LOCALE.to_string()));
    catalog
}
