// crates/weathervane-core/src/i18n/tests.rs
// ============================================================================
// Module: Localization Unit Tests
// Description: Unit tests for catalog lookup, interpolation, and selection.
// Purpose: Validate localization behavior with in-memory fixtures.
// Dependencies: weathervane-core, proptest
// ============================================================================

//! ## Overview
//! Exercises the catalog lookup chain, placeholder substitution, variant
//! pool selection, and built-in catalog completeness.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only localization assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use proptest::prelude::any;
use proptest::prelude::proptest;

use crate::i18n::LocaleStrings;
use crate::i18n::LocalizeError;
use crate::i18n::Localizer;
use crate::i18n::MessageArg;
use crate::i18n::REQUIRED_MESSAGE_KEYS;
use crate::i18n::SeededVariantSelector;
use crate::i18n::StringCatalog;
use crate::i18n::UniformVariantSelector;
use crate::i18n::VariantSelector;
use crate::i18n::builtin_catalog;
use crate::i18n::catalog::interpolate;
use crate::i18n::message_keys;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds a small catalog with two locales and an English fallback.
fn sample_catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new();

    let mut en = LocaleStrings::new();
    en.insert("GREETING", "Hello");
    en.insert("WELCOME", "Welcome, {name}!");
    en.insert_variants(
        "PROMPT",
        vec!["What next?".to_string(), "Anything else?".to_string(), "Go on.".to_string()],
    );
    catalog.add_locale("en", en);

    let mut it = LocaleStrings::new();
    it.insert("GREETING", "Ciao");
    catalog.add_locale("it", it);

    catalog.set_fallback_locale(Some("en".to_string()));
    catalog
}

/// Binds the sample catalog to a locale with a fixed seed.
fn localizer_for(locale: &str, seed: u64) -> Localizer {
    Localizer::new(Arc::new(sample_catalog()), locale, Arc::new(SeededVariantSelector::new(seed)))
}

// ============================================================================
// SECTION: Lookup Chain
// ============================================================================

#[test]
fn exact_locale_wins() {
    let localizer = localizer_for("it", 0);
    assert_eq!(localizer.resolve("GREETING").expect("resolve"), "Ciao");
}

#[test]
fn language_tag_degrades_region() {
    let localizer = localizer_for("it-IT", 0);
    assert_eq!(localizer.resolve("GREETING").expect("resolve"), "Ciao");
}

#[test]
fn underscore_region_separator_degrades() {
    let localizer = localizer_for("it_IT", 0);
    assert_eq!(localizer.resolve("GREETING").expect("resolve"), "Ciao");
}

#[test]
fn fallback_locale_covers_missing_key() {
    // "WELCOME" is absent from it; the chain lands on en.
    let localizer = localizer_for("it", 0);
    assert_eq!(
        localizer.resolve_with("WELCOME", &[MessageArg::new("name", "Alice")]).expect("resolve"),
        "Welcome, Alice!"
    );
}

#[test]
fn unknown_locale_falls_back_entirely() {
    let localizer = localizer_for("fr-FR", 0);
    assert_eq!(localizer.resolve("GREETING").expect("resolve"), "Hello");
}

#[test]
fn missing_key_fails_after_chain() {
    let localizer = localizer_for("en", 0);
    let err = localizer.resolve("ABSENT").expect_err("missing key");
    assert_eq!(
        err,
        LocalizeError::MissingTranslation {
            locale: "en".to_string(),
            key: "ABSENT".to_string(),
        }
    );
}

#[test]
fn disabled_fallback_fails_hard() {
    let mut catalog = sample_catalog();
    catalog.set_fallback_locale(None);
    let localizer =
        Localizer::new(Arc::new(catalog), "fr", Arc::new(SeededVariantSelector::new(0)));
    assert!(matches!(
        localizer.resolve("GREETING"),
        Err(LocalizeError::MissingTranslation { .. })
    ));
}

// ============================================================================
// SECTION: Interpolation
// ============================================================================

#[test]
fn single_key_resolution_is_idempotent() {
    let localizer = localizer_for("en", 0);
    let args = [MessageArg::new("name", "Bob")];
    let first = localizer.resolve_with("WELCOME", &args).expect("resolve");
    let second = localizer.resolve_with("WELCOME", &args).expect("resolve");
    assert_eq!(first, second);
}

#[test]
fn unresolved_placeholder_stays_literal() {
    let localizer = localizer_for("en", 0);
    assert_eq!(localizer.resolve("WELCOME").expect("resolve"), "Welcome, {name}!");
}

#[test]
fn interpolate_replaces_every_occurrence() {
    assert_eq!(interpolate("{x} and {x}", &[MessageArg::new("x", "A")]), "A and A");
}

#[test]
fn interpolate_leaves_unclosed_brace() {
    assert_eq!(interpolate("Hello {world", &[MessageArg::new("world", "x")]), "Hello {world");
}

#[test]
fn interpolate_without_args_returns_template() {
    assert_eq!(interpolate("Hello {name}", &[]), "Hello {name}");
}

// ============================================================================
// SECTION: Variant Selection
// ============================================================================

#[test]
fn variant_resolution_stays_in_pool() {
    let localizer = localizer_for("en", 7);
    for _ in 0..32 {
        let resolved = localizer.resolve("PROMPT").expect("resolve");
        assert!(
            ["What next?", "Anything else?", "Go on."].contains(&resolved.as_str()),
            "unexpected variant: {resolved}"
        );
    }
}

#[test]
fn seeded_selection_is_reproducible() {
    let first: Vec<String> = {
        let localizer = localizer_for("en", 42);
        (0..8).map(|_| localizer.resolve("PROMPT").expect("resolve")).collect()
    };
    let second: Vec<String> = {
        let localizer = localizer_for("en", 42);
        (0..8).map(|_| localizer.resolve("PROMPT").expect("resolve")).collect()
    };
    assert_eq!(first, second);
}

#[test]
fn uniform_selector_stays_in_bounds() {
    let selector = UniformVariantSelector;
    for len in 1..16 {
        for _ in 0..16 {
            assert!(selector.pick(len) < len);
        }
    }
}

#[test]
fn selector_handles_single_candidate() {
    assert_eq!(UniformVariantSelector.pick(1), 0);
    assert_eq!(SeededVariantSelector::new(0).pick(1), 0);
}

#[test]
fn empty_variant_pool_resolves_as_missing() {
    let mut catalog = StringCatalog::new();
    let mut en = LocaleStrings::new();
    en.insert_variants("EMPTY", Vec::new());
    catalog.add_locale("en", en);
    let localizer =
        Localizer::new(Arc::new(catalog), "en", Arc::new(SeededVariantSelector::new(0)));
    assert!(matches!(
        localizer.resolve("EMPTY"),
        Err(LocalizeError::MissingTranslation { .. })
    ));
}

// ============================================================================
// SECTION: Built-in Catalog
// ============================================================================

#[test]
fn builtin_catalog_is_complete_per_locale() {
    let catalog = builtin_catalog();
    for locale in ["en", "it"] {
        let missing = catalog.missing_keys(locale, REQUIRED_MESSAGE_KEYS);
        assert!(missing.is_empty(), "{locale} missing keys: {missing:?}");
    }
}

#[test]
fn builtin_english_help_strings() {
    let catalog = Arc::new(builtin_catalog());
    let localizer = Localizer::new(catalog, "en", Arc::new(SeededVariantSelector::new(0)));
    assert_eq!(
        localizer.resolve(message_keys::HELP_MESSAGE).expect("resolve"),
        "You can say what's the weather, or, you can say exit... What can I help you with?"
    );
    assert_eq!(
        localizer.resolve(message_keys::HELP_REPROMPT).expect("resolve"),
        "What can I help you with?"
    );
}

#[test]
fn builtin_italian_stop_message() {
    let catalog = Arc::new(builtin_catalog());
    let localizer = Localizer::new(catalog, "it", Arc::new(SeededVariantSelector::new(0)));
    assert_eq!(localizer.resolve(message_keys::STOP_MESSAGE).expect("resolve"), "A presto!");
}

#[test]
fn builtin_weather_report_substitution() {
    let catalog = Arc::new(builtin_catalog());
    let localizer = Localizer::new(catalog, "en", Arc::new(SeededVariantSelector::new(0)));
    let resolved = localizer
        .resolve_with(
            message_keys::WEATHER_REPORT,
            &[
                MessageArg::new("currentTemp", "70"),
                MessageArg::new("weatherDescription", "cloudy"),
            ],
        )
        .expect("resolve");
    assert_eq!(resolved, "Right now it's 70 degrees and cloudy.");
}

#[test]
fn builtin_italian_weather_template_keeps_unmatched_placeholder() {
    let catalog = Arc::new(builtin_catalog());
    let localizer = Localizer::new(catalog, "it", Arc::new(SeededVariantSelector::new(0)));
    let resolved = localizer
        .resolve_with(
            message_keys::WEATHER_REPORT,
            &[
                MessageArg::new("currentTemp", "70"),
                MessageArg::new("weatherDescription", "nuvoloso"),
            ],
        )
        .expect("resolve");
    assert_eq!(resolved, "In questo momento ci sono {temperature} gradi e nuvoloso.");
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn interpolation_never_panics(template in ".{0,64}", value in ".{0,16}") {
        let _ = interpolate(&template, &[MessageArg::new("arg", value)]);
    }

    #[test]
    fn variant_pick_always_lands_in_pool(seed in any::<u64>(), len in 1_usize..32) {
        let selector = SeededVariantSelector::new(seed);
        let index = selector.pick(len);
        assert!(index < len);
    }
}
