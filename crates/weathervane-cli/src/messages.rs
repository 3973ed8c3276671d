// crates/weathervane-cli/src/messages.rs
// ============================================================================
// Module: CLI Messages
// Description: Message catalog and translation helper for CLI output.
// Purpose: Centralize user-facing strings for consistent messaging.
// Dependencies: weathervane-core
// ============================================================================

//! ## Overview
//! All runtime CLI output is routed through a small message catalog backed
//! by the same [`StringCatalog`] type the skill speech uses. Missing keys
//! fall back to the key itself so diagnostics never vanish.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::OnceLock;

use weathervane_core::Localizer;
pub use weathervane_core::MessageArg;
use weathervane_core::StringCatalog;
use weathervane_core::UniformVariantSelector;
use weathervane_core::i18n::LocaleStrings;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Locale the CLI catalog is bound to.
const CLI_LOCALE: &str = "en";

/// Static English catalog entries for CLI output.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "weathervane {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("handle.input.read_failed", "Failed to read request envelope at {path}: {error}"),
    ("handle.input.stdin_failed", "Failed to read request envelope from stdin: {error}"),
    (
        "handle.input.too_large",
        "Refusing to read request envelope because it is {size} bytes (limit {limit}).",
    ),
    ("handle.input.parse_failed", "Failed to parse request envelope: {error}"),
    ("handle.dispatch_failed", "Dispatch failed: {error}"),
    ("handle.output.render_failed", "Failed to render response JSON: {error}"),
    ("serve.config.load_failed", "Failed to load config: {error}"),
    ("serve.bind.parse_failed", "Invalid bind address {bind}: {error}"),
    (
        "serve.bind.non_loopback_opt_in",
        "Refusing to bind to non-loopback address {bind}. Set --allow-non-loopback or {env}=1 to \
         opt in.",
    ),
    (
        "serve.bind.allow_env_invalid",
        "Invalid value for {env}: {value}. Expected true/false/1/0/yes/no/on/off.",
    ),
    (
        "serve.warn.network_exposed",
        "WARNING: Weathervane is exposed on the network at {bind}; this exposure is intentional.",
    ),
    ("serve.started", "Listening on {bind}"),
    ("serve.failed", "HTTP server failed: {error}"),
];

/// Returns the shared CLI catalog.
fn catalog() -> &'static Arc<StringCatalog> {
    static CATALOG: OnceLock<Arc<StringCatalog>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let mut strings = LocaleStrings::new();
        for (key, value) in CATALOG_EN {
            strings.insert(*key, *value);
        }
        let mut catalog = StringCatalog::new();
        catalog.add_locale(CLI_LOCALE, strings);
        catalog.set_fallback_locale(Some(CLI_LOCALE.to_string()));
        Arc::new(catalog)
    })
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Formats a CLI message from a key and named arguments.
///
/// Missing keys fall back to the key itself.
#[must_use]
pub fn message(key: &str, args: Vec<MessageArg>) -> String {
    let localizer =
        Localizer::new(Arc::clone(catalog()), CLI_LOCALE, Arc::new(UniformVariantSelector));
    localizer.resolve_with(key, &args).unwrap_or_else(|_| key.to_string())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized CLI message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A formatted [`String`] with placeholders substituted.
#[macro_export]
macro_rules! msg {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::messages::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::messages::message($key, args)
    }};
}
