// crates/weathervane-core/src/i18n/localizer.rs
// ============================================================================
// Module: Localizer
// Description: Per-request message resolution with random variant selection.
// Purpose: Bind the shared catalog to one locale for the span of a dispatch.
// Dependencies: crate::i18n::catalog, rand, thiserror
// ============================================================================

//! ## Overview
//! A [`Localizer`] is installed into the request context by the localization
//! interceptor at the very start of dispatch, so every later-running
//! interceptor and handler shares one instance bound to one locale. Variant
//! pools are resolved through an injected [`VariantSelector`], uniform and
//! OS-seeded by default and deterministic in tests. Selection happens on
//! every call; it is never cached within a request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::OsRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::i18n::catalog::MessageArg;
use crate::i18n::catalog::MessageEntry;
use crate::i18n::catalog::StringCatalog;
use crate::i18n::catalog::interpolate;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Localization errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizeError {
    /// No entry resolved for the key through the locale's lookup chain.
    #[error("missing translation for key '{key}' in locale '{locale}'")]
    MissingTranslation {
        /// Locale the resolution was bound to.
        locale: String,
        /// Message key that failed to resolve.
        key: String,
    },
    /// A localizer was requested before the localization interceptor ran.
    #[error("localizer has not been installed for this dispatch")]
    NotInstalled,
}

// ============================================================================
// SECTION: Variant Selection
// ============================================================================

/// Selection strategy for variant pools.
///
/// Injected so tests can pin the choice; the contract is that `pick`
/// returns an index strictly below `pool_len` for any `pool_len >= 1`.
pub trait VariantSelector: Send + Sync {
    /// Picks an index into a pool of the given length.
    fn pick(&self, pool_len: usize) -> usize;
}

/// Uniform selection from OS entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformVariantSelector;

impl VariantSelector for UniformVariantSelector {
    fn pick(&self, pool_len: usize) -> usize {
        if pool_len <= 1 {
            return 0;
        }
        OsRng.gen_range(0..pool_len)
    }
}

/// Deterministic selection from a fixed seed.
#[derive(Debug)]
pub struct SeededVariantSelector {
    /// Seeded generator shared behind a lock for `&self` picking.
    rng: Mutex<StdRng>,
}

impl SeededVariantSelector {
    /// Creates a selector seeded with the given value.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl VariantSelector for SeededVariantSelector {
    fn pick(&self, pool_len: usize) -> usize {
        if pool_len <= 1 {
            return 0;
        }
        self.rng.lock().map_or(0, |mut rng| rng.gen_range(0..pool_len))
    }
}

// ============================================================================
// SECTION: Localizer
// ============================================================================

/// Message resolver bound to one request's locale.
///
/// # Invariants
/// - One instance per dispatch; shares the process-wide catalog read-only.
#[derive(Clone)]
pub struct Localizer {
    /// Shared read-only catalog.
    catalog: Arc<StringCatalog>,
    /// Locale this resolver is bound to, verbatim from the request.
    locale: String,
    /// Variant selection strategy.
    selector: Arc<dyn VariantSelector>,
}

impl Localizer {
    /// Binds the catalog to a locale with the given selection strategy.
    #[must_use]
    pub fn new(catalog: Arc<StringCatalog>, locale: &str, selector: Arc<dyn VariantSelector>) -> Self {
        Self {
            catalog,
            locale: locale.to_string(),
            selector,
        }
    }

    /// Returns the locale this resolver is bound to.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Resolves a message key without formatting arguments.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizeError::MissingTranslation`] when the key cannot be
    /// resolved through the locale's lookup chain.
    pub fn resolve(&self, key: &str) -> Result<String, LocalizeError> {
        self.resolve_with(key, &[])
    }

    /// Resolves a message key and substitutes formatting arguments.
    ///
    /// Variant pools select one candidate uniformly at random on every call.
    /// Unresolved placeholders are left as literal text.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizeError::MissingTranslation`] when the key cannot be
    /// resolved through the locale's lookup chain.
    pub fn resolve_with(&self, key: &str, args: &[MessageArg]) -> Result<String, LocalizeError> {
        let entry = self.catalog.entry(&self.locale, key).ok_or_else(|| {
            LocalizeError::MissingTranslation {
                locale: self.locale.clone(),
                key: key.to_string(),
            }
        })?;
        let template = match entry {
            MessageEntry::Single(text) => Some(text),
            MessageEntry::Variants(pool) => {
                let index = self.selector.pick(pool.len());
                pool.get(index).or_else(|| pool.first())
            }
        };
        let Some(template) = template else {
            return Err(LocalizeError::MissingTranslation {
                locale: self.locale.clone(),
                key: key.to_string(),
            });
        };
        Ok(interpolate(template, args))
    }
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer").field("locale", &self.locale).finish_non_exhaustive()
    }
}
