//! Catalog validation tests for weathervane-config.
// crates/weathervane-config/tests/catalog_validation.rs
// =============================================================================
// Module: Catalog Validation Tests
// Description: Validate catalog merge rules and completeness enforcement.
// Purpose: Ensure every declared locale covers the handler-referenced keys.
// =============================================================================

use weathervane_config::ConfigError;
use weathervane_config::SkillConfig;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<SkillConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn rejects_empty_variant_pool() -> TestResult {
    let toml = r#"
[catalog.locales.en]
HELP_MESSAGE = []
"#;
    assert_invalid(SkillConfig::from_toml_str(toml), "variant pool")?;
    Ok(())
}

#[test]
fn rejects_undeclared_fallback_locale() -> TestResult {
    let toml = r#"
[catalog]
fallback_locale = "de"
"#;
    assert_invalid(SkillConfig::from_toml_str(toml), "fallback locale 'de' is not declared")?;
    Ok(())
}

#[test]
fn rejects_incomplete_locale_without_fallback() -> TestResult {
    let toml = r#"
[catalog]
enable_fallback = false

[catalog.locales.fr]
HELP_MESSAGE = "Que puis-je faire ?"
"#;
    assert_invalid(SkillConfig::from_toml_str(toml), "misses required keys")?;
    Ok(())
}

#[test]
fn accepts_partial_locale_with_fallback() -> TestResult {
    let toml = r#"
[catalog.locales.fr]
HELP_MESSAGE = "Que puis-je faire ?"
"#;
    SkillConfig::from_toml_str(toml).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn rejects_empty_locale_tag() -> TestResult {
    let toml = r#"
[catalog.locales.""]
HELP_MESSAGE = "hi"
"#;
    assert_invalid(SkillConfig::from_toml_str(toml), "locale tags must be non-empty")?;
    Ok(())
}

#[test]
fn rejects_blank_weather_description() -> TestResult {
    let toml = r#"
[weather]
description = "  "
"#;
    assert_invalid(SkillConfig::from_toml_str(toml), "weather.description")?;
    Ok(())
}

#[test]
fn rejects_blank_document_link() -> TestResult {
    let toml = r#"
[documents]
visual = ""
"#;
    assert_invalid(SkillConfig::from_toml_str(toml), "documents.visual")?;
    Ok(())
}

#[test]
fn accepts_variant_pool_entries() -> TestResult {
    let toml = r#"
[catalog.locales.en]
HELP_REPROMPT = ["What can I help you with?", "Anything else?"]
"#;
    SkillConfig::from_toml_str(toml).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn disabled_fallback_with_complete_locales_is_valid() -> TestResult {
    let toml = r#"
[catalog]
enable_fallback = false
"#;
    // The built-in locales are each complete on their own.
    SkillConfig::from_toml_str(toml).map_err(|err| err.to_string())?;
    Ok(())
}
