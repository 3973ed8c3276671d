// crates/weathervane-config/src/lib.rs
// ============================================================================
// Module: Weathervane Configuration
// Description: TOML configuration model, loading guards, and validation.
// Purpose: Merge operator overrides over the built-in skill defaults.
// Dependencies: serde, thiserror, toml, weathervane-core
// ============================================================================

//! ## Overview
//! The skill's only configuration surface is the string catalog plus the
//! opaque skill data: the canned weather report and the rendering-document
//! links. Configuration is a TOML file merged over the built-in defaults;
//! loading is fail-closed (path, size, and encoding guards, unknown keys
//! rejected) and validation enforces catalog completeness before a
//! dispatcher is ever assembled. Configuration is read once at process start
//! and immutable afterward.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use weathervane_core::LocaleStrings;
use weathervane_core::MessageEntry;
use weathervane_core::SkillDefinition;
use weathervane_core::StringCatalog;
use weathervane_core::i18n::DEFAULT_FALLBACK_LOCALE;
use weathervane_core::i18n::REQUIRED_MESSAGE_KEYS;
use weathervane_core::i18n::builtin_catalog;
use weathervane_core::skill::DocumentLinks;
use weathervane_core::skill::WeatherReport;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default config filename probed when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "weathervane.toml";
/// Maximum accepted config path length in bytes.
pub const MAX_CONFIG_PATH_BYTES: usize = 4_096;
/// Maximum accepted config file size in bytes.
pub const MAX_CONFIG_FILE_BYTES: usize = 1_048_576;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config path exceeds the accepted length.
    #[error("config path exceeds max length ({actual} > {limit})")]
    PathTooLong {
        /// Actual path length in bytes.
        actual: usize,
        /// Maximum accepted length in bytes.
        limit: usize,
    },
    /// Config file could not be read.
    #[error("config io error for {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Config file exceeds the accepted size.
    #[error("config file exceeds size limit ({actual} > {limit})")]
    TooLarge {
        /// Actual file size in bytes.
        actual: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },
    /// Config file is not valid UTF-8.
    #[error("config file must be utf-8: {path}")]
    NotUtf8 {
        /// Path that failed decoding.
        path: String,
    },
    /// Config file failed TOML parsing (unknown keys included).
    #[error("config parse error: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },
    /// Config content failed validation.
    #[error("invalid config: {message}")]
    Invalid {
        /// Validation diagnostic.
        message: String,
    },
}

// ============================================================================
// SECTION: Model
// ============================================================================

/// Root configuration document.
///
/// # Invariants
/// - Unknown keys are rejected at parse time.
/// - `SkillConfig::default()` reproduces the built-in skill exactly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SkillConfig {
    /// Catalog overrides and fallback policy.
    pub catalog: CatalogConfig,
    /// Weather report overrides.
    pub weather: WeatherConfig,
    /// Rendering-document link overrides.
    pub documents: DocumentsConfig,
}

/// Catalog section: fallback policy plus per-locale entry overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CatalogConfig {
    /// Whether the fallback locale is consulted at all.
    ///
    /// Disabling it restores hard `MissingTranslation` failures for locales
    /// absent from the catalog.
    pub enable_fallback: Option<bool>,
    /// Fallback locale; defaults to the built-in `en`.
    pub fallback_locale: Option<String>,
    /// Locale tag → message key → entry (string or variant array).
    ///
    /// Entries merge over the built-in catalog key by key.
    pub locales: BTreeMap<String, BTreeMap<String, MessageEntry>>,
}

/// Weather section: overrides for the canned report values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WeatherConfig {
    /// Condition code selecting the paired assets.
    pub code: Option<u8>,
    /// Current temperature in degrees.
    pub temperature: Option<i32>,
    /// Spoken condition description.
    pub description: Option<String>,
}

/// Documents section: overrides for the rendering-document links.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DocumentsConfig {
    /// Visual document link.
    pub visual: Option<String>,
    /// Audio document link.
    pub audio: Option<String>,
    /// Correlation token attached to render directives.
    pub token: Option<String>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl SkillConfig {
    /// Loads configuration from a path, or probes the default filename.
    ///
    /// With `None`, the default filename is loaded when present and the
    /// built-in defaults are returned otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, decoded,
    /// parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads and validates one config file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let path_bytes = path.as_os_str().len();
        if path_bytes > MAX_CONFIG_PATH_BYTES {
            return Err(ConfigError::PathTooLong {
                actual: path_bytes,
                limit: MAX_CONFIG_PATH_BYTES,
            });
        }

        let bytes = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if bytes.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::TooLarge {
                actual: bytes.len(),
                limit: MAX_CONFIG_FILE_BYTES,
            });
        }
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8 {
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] on validation failures.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration against the merged catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a locale tag is empty, a
    /// variant pool is empty, the fallback locale is undeclared or
    /// incomplete, or (with fallback disabled) any declared locale misses a
    /// required message key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (locale, entries) in &self.catalog.locales {
            if locale.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "catalog locale tags must be non-empty".to_string(),
                });
            }
            for (key, entry) in entries {
                if entry.candidates().is_empty() {
                    return Err(ConfigError::Invalid {
                        message: format!("variant pool for '{key}' in locale '{locale}' is empty"),
                    });
                }
            }
        }

        if let Some(description) = &self.weather.description
            && description.trim().is_empty()
        {
            return Err(ConfigError::Invalid {
                message: "weather.description must be non-empty".to_string(),
            });
        }
        for (field, value) in [
            ("documents.visual", &self.documents.visual),
            ("documents.audio", &self.documents.audio),
            ("documents.token", &self.documents.token),
        ] {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                return Err(ConfigError::Invalid {
                    message: format!("{field} must be non-empty"),
                });
            }
        }

        let catalog = self.merged_catalog();
        match catalog.fallback_locale() {
            Some(fallback) => {
                if !catalog.has_locale(fallback) {
                    return Err(ConfigError::Invalid {
                        message: format!("fallback locale '{fallback}' is not declared"),
                    });
                }
                let missing = catalog.missing_keys(fallback, REQUIRED_MESSAGE_KEYS);
                if !missing.is_empty() {
                    return Err(ConfigError::Invalid {
                        message: format!(
                            "fallback locale '{fallback}' misses required keys: {}",
                            missing.join(", ")
                        ),
                    });
                }
            }
            None => {
                let locales: Vec<String> = catalog.locales().map(str::to_string).collect();
                for locale in locales {
                    let missing = catalog.missing_keys(&locale, REQUIRED_MESSAGE_KEYS);
                    if !missing.is_empty() {
                        return Err(ConfigError::Invalid {
                            message: format!(
                                "locale '{locale}' misses required keys: {}",
                                missing.join(", ")
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Builds the initialize-once skill definition from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when validation fails.
    pub fn build(&self) -> Result<SkillDefinition, ConfigError> {
        self.validate()?;
        Ok(SkillDefinition {
            catalog: self.merged_catalog(),
            report: self.weather_report(),
            documents: self.document_links(),
        })
    }

    /// Merges the configured locales and fallback over the built-in catalog.
    fn merged_catalog(&self) -> StringCatalog {
        let mut catalog = builtin_catalog();
        for (locale, entries) in &self.catalog.locales {
            let mut strings =
                catalog.locale_strings(locale).cloned().unwrap_or_else(LocaleStrings::new);
            for (key, entry) in entries {
                strings.insert_entry(key.clone(), entry.clone());
            }
            catalog.add_locale(locale.clone(), strings);
        }

        let fallback = if self.catalog.enable_fallback.unwrap_or(true) {
            Some(
                self.catalog
                    .fallback_locale
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FALLBACK_LOCALE.to_string()),
            )
        } else {
            None
        };
        catalog.set_fallback_locale(fallback);
        catalog
    }

    /// Applies the weather overrides over the built-in report.
    fn weather_report(&self) -> WeatherReport {
        let mut report = WeatherReport::default();
        if let Some(code) = self.weather.code {
            report.code = code;
        }
        if let Some(temperature) = self.weather.temperature {
            report.temperature = temperature;
        }
        if let Some(description) = &self.weather.description {
            report.description.clone_from(description);
        }
        report
    }

    /// Applies the document overrides over the built-in links.
    fn document_links(&self) -> DocumentLinks {
        let mut documents = DocumentLinks::default();
        if let Some(visual) = &self.documents.visual {
            documents.visual.clone_from(visual);
        }
        if let Some(audio) = &self.documents.audio {
            documents.audio.clone_from(audio);
        }
        if let Some(token) = &self.documents.token {
            documents.token.clone_from(token);
        }
        documents
    }
}
