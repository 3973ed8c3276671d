// crates/weathervane-core/src/i18n/catalog.rs
// ============================================================================
// Module: String Catalog
// Description: Locale-keyed message templates with variant pools.
// Purpose: Provide the read-only lookup table behind every localizer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The catalog maps locale → message key → entry, where an entry is either a
//! single template string or an ordered pool of candidate templates. Lookup
//! degrades from the exact locale to its bare language tag to the configured
//! fallback locale; only when every step misses does resolution fail.
//! Placeholder substitution replaces `{name}` tokens and leaves unresolved
//! tokens as literal text.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Variant pools preserve insertion order.
//! - Placeholder substitution is a single pass; no recursive expansion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Message Arguments
// ============================================================================

/// A named formatting argument substituted into message templates.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `currentTemp`).
/// - `value` is preformatted and safe for display.
#[derive(Debug, Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates.
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Substitutes `{name}` placeholders into a template.
///
/// Unresolved placeholders are left as literal text; substitution order is
/// the argument order, deterministically.
#[must_use]
pub fn interpolate(template: &str, args: &[MessageArg]) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Entries
// ============================================================================

/// One catalog entry: a single template or an ordered variant pool.
///
/// # Invariants
/// - Variant pools are non-empty once validated; an empty pool resolves as a
///   missing translation rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageEntry {
    /// A single template string.
    Single(String),
    /// An ordered pool of candidate templates, one chosen per resolution.
    Variants(Vec<String>),
}

impl MessageEntry {
    /// Returns the candidate templates (one for single entries).
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Single(text) => std::slice::from_ref(text),
            Self::Variants(pool) => pool.as_slice(),
        }
    }
}

/// Message entries for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleStrings {
    /// Entries keyed by message key.
    entries: BTreeMap<String, MessageEntry>,
}

impl LocaleStrings {
    /// Creates an empty locale entry set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a single-template entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), MessageEntry::Single(value.into()));
    }

    /// Inserts a variant-pool entry.
    pub fn insert_variants(&mut self, key: impl Into<String>, pool: Vec<String>) {
        self.entries.insert(key.into(), MessageEntry::Variants(pool));
    }

    /// Inserts an already-shaped entry.
    pub fn insert_entry(&mut self, key: impl Into<String>, entry: MessageEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Looks up an entry by message key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MessageEntry> {
        self.entries.get(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the locale has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all message keys in this locale.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Read-only string catalog shared by every dispatch.
///
/// # Invariants
/// - Constructed once at process start; never mutated afterward.
/// - Lookup order is exact locale, bare language tag, configured fallback.
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    /// Locale entry sets keyed by locale identifier.
    locales: BTreeMap<String, LocaleStrings>,
    /// Locale tried when neither the exact locale nor its language tag hits.
    fallback_locale: Option<String>,
}

impl StringCatalog {
    /// Creates an empty catalog with no fallback locale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds entries for a locale, replacing any previous set.
    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Sets the fallback locale (`None` disables fallback entirely).
    pub fn set_fallback_locale(&mut self, locale: Option<String>) {
        self.fallback_locale = locale;
    }

    /// Returns the configured fallback locale.
    #[must_use]
    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    /// Returns whether the catalog carries entries for the locale.
    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Returns the entry set for a locale, if any.
    #[must_use]
    pub fn locale_strings(&self, locale: &str) -> Option<&LocaleStrings> {
        self.locales.get(locale)
    }

    /// Returns all locale identifiers in deterministic order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Resolves an entry through the lookup chain.
    ///
    /// Tries the exact locale, then its bare language tag (for example,
    /// `en-US` degrades to `en`), then the configured fallback locale.
    #[must_use]
    pub fn entry(&self, locale: &str, key: &str) -> Option<&MessageEntry> {
        for candidate in self.lookup_chain(locale) {
            if let Some(entry) = self.locales.get(candidate).and_then(|strings| strings.get(key)) {
                return Some(entry);
            }
        }
        None
    }

    /// Returns the reference keys missing for a locale through the chain.
    ///
    /// Used by catalog completeness validation; the result is sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: &str, reference_keys: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = reference_keys
            .iter()
            .filter(|key| self.entry(locale, key).is_none())
            .map(|key| (*key).to_string())
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Builds the ordered, deduplicated lookup chain for a locale.
    fn lookup_chain<'a>(&'a self, locale: &'a str) -> Vec<&'a str> {
        let mut chain = Vec::with_capacity(3);
        if !locale.is_empty() {
            chain.push(locale);
        }
        if let Some(language) = bare_language_tag(locale)
            && !chain.contains(&language)
        {
            chain.push(language);
        }
        if let Some(fallback) = self.fallback_locale.as_deref()
            && !chain.contains(&fallback)
        {
            chain.push(fallback);
        }
        chain
    }
}

/// Extracts the bare language tag from a locale identifier.
///
/// Returns `None` for empty input or when the locale already is a bare tag.
fn bare_language_tag(locale: &str) -> Option<&str> {
    let language = locale.split(['-', '_']).next().unwrap_or("");
    if language.is_empty() || language == locale {
        None
    } else {
        Some(language)
    }
}
