// crates/weathervane-core/src/i18n/mod.rs
// ============================================================================
// Module: Localization
// Description: String catalog, per-request localizer, and built-in strings.
// Purpose: Resolve message keys to locale-specific strings with variant pools.
// Dependencies: rand, serde, thiserror
// ============================================================================

//! ## Overview
//! Localization is a flat key-value lookup: a [`StringCatalog`] maps
//! (locale, key) to one template string or to an ordered variant pool, and a
//! [`Localizer`] binds the catalog to a single request's locale, picking one
//! variant at random per resolution and substituting `{placeholder}` tokens.
//! The catalog is built once at process start and shared read-only across
//! concurrent dispatches.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod localizer;
pub mod strings;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use catalog::LocaleStrings;
pub use catalog::MessageArg;
pub use catalog::MessageEntry;
pub use catalog::StringCatalog;
pub use localizer::LocalizeError;
pub use localizer::Localizer;
pub use localizer::SeededVariantSelector;
pub use localizer::UniformVariantSelector;
pub use localizer::VariantSelector;
pub use strings::DEFAULT_FALLBACK_LOCALE;
pub use strings::REQUIRED_MESSAGE_KEYS;
pub use strings::builtin_catalog;
pub use strings::message_keys;
