// crates/weathervane-core/src/core/response.rs
// ============================================================================
// Module: Outbound Response Model
// Description: Response envelope, speech, reprompt, and rendering directives.
// Purpose: Assemble the outbound structure handlers build incrementally.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A response carries optional spoken output, an optional reprompt, and an
//! ordered list of rendering directives. Directive data payloads are opaque
//! JSON the core constructs but never interprets; their schemas belong to
//! the external rendering engine. Responses are built through
//! [`ResponseBuilder`], finalized once, and immutable afterward.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Response Envelope
// ============================================================================

/// Envelope schema version emitted on every response.
const RESPONSE_VERSION: &str = "1.0";

/// Outbound envelope wrapping one finalized response.
///
/// # Invariants
/// - `version` is always `"1.0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Envelope schema version.
    pub version: String,
    /// The finalized response body.
    pub response: Response,
}

impl ResponseEnvelope {
    /// Wraps a finalized response into the outbound envelope.
    #[must_use]
    pub fn new(response: Response) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response,
        }
    }
}

// ============================================================================
// SECTION: Speech
// ============================================================================

/// Spoken output kind marker.
///
/// # Invariants
/// - Variants are stable for serialization against the platform schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechKind {
    /// Synthesized speech markup.
    #[serde(rename = "SSML")]
    Ssml,
}

/// Spoken output attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    /// Output kind marker.
    #[serde(rename = "type")]
    pub kind: SpeechKind,
    /// Spoken text content.
    pub ssml: String,
}

impl OutputSpeech {
    /// Builds spoken output from resolved text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            kind: SpeechKind::Ssml,
            ssml: text.to_string(),
        }
    }
}

/// Reprompt wrapper re-spoken when the user stays silent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reprompt {
    /// Spoken reprompt content.
    #[serde(rename = "outputSpeech")]
    pub output_speech: OutputSpeech,
}

// ============================================================================
// SECTION: Directives
// ============================================================================

/// Document reference kind marker.
///
/// # Invariants
/// - Variants are stable for serialization against the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// Reference to a hosted rendering document.
    Link,
}

/// Static link to an externally hosted rendering document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    /// Reference kind marker.
    #[serde(rename = "type")]
    pub kind: LinkKind,
    /// Opaque document identifier.
    pub src: String,
}

impl DocumentLink {
    /// Builds a link from an opaque document identifier.
    #[must_use]
    pub fn new(src: &str) -> Self {
        Self {
            kind: LinkKind::Link,
            src: src.to_string(),
        }
    }
}

/// Payload shared by both rendering-document directive shapes.
///
/// # Invariants
/// - `datasources` is opaque to the core; it is constructed by handlers and
///   interpreted only by the external rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDocumentPayload {
    /// Client-side correlation token.
    pub token: String,
    /// Static link to the rendering document.
    pub document: DocumentLink,
    /// Opaque key-value data payload for the document.
    pub datasources: Value,
}

/// One discrete rendering instruction inside a response.
///
/// # Invariants
/// - Variants are stable for serialization against the platform schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    /// Visual rendering-document reference.
    #[serde(rename = "Alexa.Presentation.APL.RenderDocument")]
    RenderDocument(RenderDocumentPayload),
    /// Audio rendering-document reference.
    #[serde(rename = "Alexa.Presentation.APLA.RenderDocument")]
    AudioRenderDocument(RenderDocumentPayload),
}

impl Directive {
    /// Returns whether this is the visual rendering-document directive.
    #[must_use]
    pub const fn is_visual_render(&self) -> bool {
        matches!(self, Self::RenderDocument(_))
    }

    /// Returns whether this is the audio rendering-document directive.
    #[must_use]
    pub const fn is_audio_render(&self) -> bool {
        matches!(self, Self::AudioRenderDocument(_))
    }
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// One finalized outbound response.
///
/// # Invariants
/// - Immutable after [`ResponseBuilder::finalize`]; response interceptors
///   observe it but do not mutate it (documented convention).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    /// Spoken output, absent for silent responses.
    #[serde(rename = "outputSpeech", skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    /// Reprompt spoken when the user stays silent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    /// Ordered rendering directives.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    /// Whether the session should end after this response.
    #[serde(rename = "shouldEndSession", skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl Response {
    /// Starts building a response.
    #[must_use]
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    /// Returns an empty response with no speech and no directives.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the spoken text, if any.
    #[must_use]
    pub fn speech_text(&self) -> Option<&str> {
        self.output_speech.as_ref().map(|speech| speech.ssml.as_str())
    }

    /// Returns the reprompt text, if any.
    #[must_use]
    pub fn reprompt_text(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|reprompt| reprompt.output_speech.ssml.as_str())
    }
}

// ============================================================================
// SECTION: Response Builder
// ============================================================================

/// Incremental response builder.
///
/// # Invariants
/// - [`ResponseBuilder::finalize`] consumes the builder; the produced
///   [`Response`] is never touched again by the building handler.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    /// Response under construction.
    response: Response,
}

impl ResponseBuilder {
    /// Sets the spoken output.
    #[must_use]
    pub fn speak(mut self, text: &str) -> Self {
        self.response.output_speech = Some(OutputSpeech::new(text));
        self
    }

    /// Sets the reprompt and marks the session as staying open.
    #[must_use]
    pub fn reprompt(mut self, text: &str) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::new(text),
        });
        self.response.should_end_session = Some(false);
        self
    }

    /// Appends a rendering directive.
    #[must_use]
    pub fn directive(mut self, directive: Directive) -> Self {
        self.response.directives.push(directive);
        self
    }

    /// Explicitly sets the session-end flag.
    #[must_use]
    pub fn end_session(mut self, end: bool) -> Self {
        self.response.should_end_session = Some(end);
        self
    }

    /// Finalizes the response; the builder is consumed.
    #[must_use]
    pub fn finalize(self) -> Response {
        self.response
    }
}
