// crates/weathervane-core/src/skill/weather.rs
// ============================================================================
// Module: Weather Handler
// Description: Primary skill action producing the multimodal weather report.
// Purpose: Pair the canned report with rendering assets and directives.
// Dependencies: crate::core, crate::i18n, crate::runtime, serde, serde_json
// ============================================================================

//! ## Overview
//! The weather handler claims both the launch request and the domain intent:
//! a bare session launch is an implicit request for the primary function.
//! The report values are hardcoded demo data; a production skill would pull
//! them from an API. The handler always attaches the audio
//! rendering-document directive and attaches the visual one only when the
//! requesting device advertises the visual interface. Directive datasources
//! are opaque JSON owned by the external rendering engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::core::context::RequestContext;
use crate::core::request::intents;
use crate::core::request::request_types;
use crate::core::response::Directive;
use crate::core::response::DocumentLink;
use crate::core::response::RenderDocumentPayload;
use crate::core::response::Response;
use crate::i18n::MessageArg;
use crate::i18n::message_keys;
use crate::runtime::registry::HandlerError;
use crate::runtime::registry::RequestHandler;

// ============================================================================
// SECTION: Document Links
// ============================================================================

/// Default link for the visual weather document.
pub const VISUAL_DOCUMENT_LINK: &str = "doc://alexa/apl/documents/weather_v";
/// Default link for the audio weather document.
pub const AUDIO_DOCUMENT_LINK: &str = "doc://alexa/apla/documents/weather_a";
/// Default client-side correlation token attached to render directives.
pub const RENDER_TOKEN: &str = "token";

/// Static rendering-document links and the shared render token.
///
/// # Invariants
/// - Links are opaque identifiers owned by the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLinks {
    /// Visual document link.
    pub visual: String,
    /// Audio document link.
    pub audio: String,
    /// Correlation token attached to both directives.
    pub token: String,
}

impl Default for DocumentLinks {
    fn default() -> Self {
        Self {
            visual: VISUAL_DOCUMENT_LINK.to_string(),
            audio: AUDIO_DOCUMENT_LINK.to_string(),
            token: RENDER_TOKEN.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Weather Report
// ============================================================================

/// Canned weather report values.
///
/// The values are hardcoded demo data, not specified behavior; they feed the
/// report template and the directive datasources verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Condition code selecting the paired assets.
    pub code: u8,
    /// Current temperature in degrees.
    pub temperature: i32,
    /// Spoken condition description.
    pub description: String,
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self {
            code: 1,
            temperature: 70,
            description: "cloudy".to_string(),
        }
    }
}

/// Sound and image assets paired with one condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherAssets {
    /// Sound-library URN played under the report.
    pub audio: &'static str,
    /// Background image shown on the visual surface.
    pub background_image: &'static str,
}

/// Returns the assets paired with a condition code.
///
/// Unknown codes carry no assets; the directives then reference empty
/// strings, matching the source data's behavior.
#[must_use]
pub const fn assets_for(code: u8) -> Option<WeatherAssets> {
    match code {
        1 => Some(WeatherAssets {
            audio: "soundbank://soundlibrary/animals/amzn_sfx_bird_forest_short_01",
            background_image: "https://images.pexels.com/photos/777211/winter-sunset-purple-sky-777211.jpeg",
        }),
        2 => Some(WeatherAssets {
            audio: "soundbank://soundlibrary/nature/amzn_sfx_rain_03",
            background_image: "https://images.pexels.com/photos/1089455/pexels-photo-1089455.jpeg",
        }),
        _ => None,
    }
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// Primary handler answering launch requests and the weather intent.
#[derive(Debug, Clone, Default)]
pub struct WeatherHandler {
    /// Canned report values.
    report: WeatherReport,
    /// Rendering-document links.
    documents: DocumentLinks,
}

impl WeatherHandler {
    /// Creates the handler with explicit report and document links.
    #[must_use]
    pub fn new(report: WeatherReport, documents: DocumentLinks) -> Self {
        Self {
            report,
            documents,
        }
    }
}

impl RequestHandler for WeatherHandler {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn can_handle(&self, ctx: &RequestContext<'_>) -> bool {
        let request = ctx.request();
        request.kind == request_types::LAUNCH || request.is_intent(intents::GET_WEATHER)
    }

    fn handle(&self, ctx: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let localizer = ctx.localizer()?;
        let ssml = localizer.resolve_with(
            message_keys::WEATHER_REPORT,
            &[
                MessageArg::new("currentTemp", self.report.temperature.to_string()),
                MessageArg::new("weatherDescription", self.report.description.clone()),
            ],
        )?;

        let assets = assets_for(self.report.code);
        let audio = assets.map_or("", |assets| assets.audio);
        let background_image = assets.map_or("", |assets| assets.background_image);

        let mut builder = Response::builder();
        if ctx.supports_visual() {
            builder = builder.directive(Directive::RenderDocument(RenderDocumentPayload {
                token: self.documents.token.clone(),
                document: DocumentLink::new(&self.documents.visual),
                datasources: json!({
                    "myData": {
                        "bgImage": background_image,
                        "currentTemp": self.report.temperature,
                        "weatherDescription": self.report.description,
                    }
                }),
            }));
        }
        builder = builder.directive(Directive::AudioRenderDocument(RenderDocumentPayload {
            token: self.documents.token.clone(),
            document: DocumentLink::new(&self.documents.audio),
            datasources: json!({
                "myData": {
                    "ssml": ssml,
                    "audio": audio,
                }
            }),
        }));
        Ok(builder.finalize())
    }
}
