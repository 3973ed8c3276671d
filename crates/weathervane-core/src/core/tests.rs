// crates/weathervane-core/src/core/tests.rs
// ============================================================================
// Module: Core Model Unit Tests
// Description: Unit tests for envelope parsing and response assembly.
// Purpose: Validate wire-facing serde behavior against platform payloads.
// Dependencies: weathervane-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises envelope deserialization from platform-shaped JSON, capability
//! detection, opaque field preservation, and response builder behavior.

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
    reason = "Test-only serde assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::core::Directive;
use crate::core::DocumentLink;
use crate::core::RenderDocumentPayload;
use crate::core::Request;
use crate::core::RequestEnvelope;
use crate::core::Response;
use crate::core::ResponseEnvelope;
use crate::core::intents;
use crate::core::request_types;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// A platform-shaped intent envelope with visual capability.
fn visual_intent_envelope() -> Value {
    json!({
        "version": "1.0",
        "session": {"new": true, "sessionId": "amzn1.echo-api.session.1"},
        "context": {
            "System": {
                "device": {
                    "deviceId": "amzn1.ask.device.1",
                    "supportedInterfaces": {
                        "Alexa.Presentation.APL": {"runtime": {"maxVersion": "1.6"}}
                    }
                }
            }
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.1",
            "locale": "en-US",
            "intent": {"name": "GetWeatherIntent", "confirmationStatus": "NONE"}
        }
    })
}

// ============================================================================
// SECTION: Envelope Parsing
// ============================================================================

#[test]
fn parses_platform_intent_envelope() {
    let envelope: RequestEnvelope =
        serde_json::from_value(visual_intent_envelope()).expect("parse envelope");
    assert_eq!(envelope.request.kind, request_types::INTENT);
    assert_eq!(envelope.request.locale, "en-US");
    assert_eq!(envelope.request.intent_name(), Some(intents::GET_WEATHER));
    assert!(envelope.supports_visual());
}

#[test]
fn envelope_without_context_has_no_visual_support() {
    let envelope = RequestEnvelope::new(Request::launch("en"));
    assert!(!envelope.supports_visual());
    assert!(!envelope.supports_interface("Alexa.Presentation.APL"));
}

#[test]
fn unknown_request_type_parses() {
    let envelope: RequestEnvelope = serde_json::from_value(json!({
        "request": {"type": "Connections.Response", "locale": "en-GB"}
    }))
    .expect("parse envelope");
    assert_eq!(envelope.request.kind, "Connections.Response");
    assert_eq!(envelope.request.intent_name(), None);
}

#[test]
fn unknown_envelope_fields_round_trip() {
    let raw = visual_intent_envelope();
    let envelope: RequestEnvelope = serde_json::from_value(raw.clone()).expect("parse envelope");
    let reserialized = serde_json::to_value(&envelope).expect("serialize envelope");
    assert_eq!(reserialized["session"], raw["session"]);
    assert_eq!(reserialized["request"]["requestId"], raw["request"]["requestId"]);
    assert_eq!(
        reserialized["context"]["System"]["device"]["deviceId"],
        raw["context"]["System"]["device"]["deviceId"]
    );
}

#[test]
fn intent_name_is_none_for_non_intent_requests() {
    // A session-ended request never exposes an intent name, even if one is
    // present on the wire.
    let request = Request::session_ended("it", "USER_INITIATED");
    assert_eq!(request.intent_name(), None);
    assert!(!request.is_intent(intents::GET_WEATHER));
}

#[test]
fn missing_locale_defaults_to_empty() {
    let envelope: RequestEnvelope = serde_json::from_value(json!({
        "request": {"type": "SessionEndedRequest", "reason": "ERROR"}
    }))
    .expect("parse envelope");
    assert_eq!(envelope.request.locale, "");
    assert_eq!(envelope.request.reason.as_deref(), Some("ERROR"));
}

// ============================================================================
// SECTION: Response Assembly
// ============================================================================

#[test]
fn builder_assembles_speech_and_reprompt() {
    let response = Response::builder().speak("hello").reprompt("still there?").finalize();
    assert_eq!(response.speech_text(), Some("hello"));
    assert_eq!(response.reprompt_text(), Some("still there?"));
    assert_eq!(response.should_end_session, Some(false));
}

#[test]
fn speak_without_reprompt_leaves_session_flag_unset() {
    let response = Response::builder().speak("goodbye").finalize();
    assert_eq!(response.speech_text(), Some("goodbye"));
    assert_eq!(response.reprompt_text(), None);
    assert_eq!(response.should_end_session, None);
}

#[test]
fn empty_response_serializes_without_optional_fields() {
    let serialized = serde_json::to_value(Response::empty()).expect("serialize response");
    assert_eq!(serialized, json!({}));
}

#[test]
fn speech_serializes_with_ssml_marker() {
    let response = Response::builder().speak("hi").finalize();
    let serialized = serde_json::to_value(&response).expect("serialize response");
    assert_eq!(serialized["outputSpeech"], json!({"type": "SSML", "ssml": "hi"}));
}

#[test]
fn directives_serialize_with_platform_type_tags() {
    let payload = RenderDocumentPayload {
        token: "token".to_string(),
        document: DocumentLink::new("doc://example/visual"),
        datasources: json!({"myData": {"currentTemp": 70}}),
    };
    let visual = serde_json::to_value(Directive::RenderDocument(payload.clone()))
        .expect("serialize directive");
    assert_eq!(visual["type"], "Alexa.Presentation.APL.RenderDocument");
    assert_eq!(visual["document"], json!({"type": "Link", "src": "doc://example/visual"}));

    let audio = serde_json::to_value(Directive::AudioRenderDocument(payload))
        .expect("serialize directive");
    assert_eq!(audio["type"], "Alexa.Presentation.APLA.RenderDocument");
}

#[test]
fn response_envelope_carries_fixed_version() {
    let envelope = ResponseEnvelope::new(Response::empty());
    let serialized = serde_json::to_value(&envelope).expect("serialize envelope");
    assert_eq!(serialized, json!({"version": "1.0", "response": {}}));
}

#[test]
fn directive_kind_predicates() {
    let payload = RenderDocumentPayload {
        token: "token".to_string(),
        document: DocumentLink::new("doc://example/audio"),
        datasources: Value::Null,
    };
    let directive = Directive::AudioRenderDocument(payload);
    assert!(directive.is_audio_render());
    assert!(!directive.is_visual_render());
}
