// crates/weathervane-core/src/core/request.rs
// ============================================================================
// Module: Inbound Request Model
// Description: Platform request envelope, request body, and intent types.
// Purpose: Expose the enumerated routing fields while carrying the rest opaquely.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Inbound events arrive as a platform envelope whose schema is owned
//! externally. The router reads a small enumerated surface: the request
//! `type`, the request `locale`, the intent name for intent-type requests,
//! the session-end `reason`, and the device capability map. Everything else
//! is preserved in flattened maps so the logging interceptors can replay the
//! payload faithfully.
//!
//! Request `type` is deliberately a plain string rather than a closed enum:
//! unknown types must flow through routing and reach the error boundary, not
//! fail at the deserialization edge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Well-Known Identifiers
// ============================================================================

/// Well-known request `type` identifiers, matched by exact string equality.
pub mod request_types {
    /// Session launch with no spoken intent.
    pub const LAUNCH: &str = "LaunchRequest";
    /// Recognized spoken intent.
    pub const INTENT: &str = "IntentRequest";
    /// Session teardown notification.
    pub const SESSION_ENDED: &str = "SessionEndedRequest";
}

/// Well-known intent names, matched by exact string equality.
pub mod intents {
    /// Domain intent requesting the weather report.
    pub const GET_WEATHER: &str = "GetWeatherIntent";
    /// Built-in help intent.
    pub const HELP: &str = "AMAZON.HelpIntent";
    /// Built-in fallback intent for unrecognized utterances.
    pub const FALLBACK: &str = "AMAZON.FallbackIntent";
    /// Built-in cancel intent (merged with stop).
    pub const CANCEL: &str = "AMAZON.CancelIntent";
    /// Built-in stop intent (merged with cancel).
    pub const STOP: &str = "AMAZON.StopIntent";
}

/// Capability key a device advertises when it can render visual documents.
pub const VISUAL_INTERFACE: &str = "Alexa.Presentation.APL";

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Inbound platform envelope wrapping one request.
///
/// # Invariants
/// - Immutable for the duration of a dispatch.
/// - `extra` round-trips fields the router does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Envelope schema version as sent by the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Platform context (device capabilities live here).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<EnvelopeContext>,
    /// The request body driving routing.
    pub request: Request,
    /// Uninterpreted envelope fields, preserved for logging.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RequestEnvelope {
    /// Wraps a bare request into an envelope with no platform context.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            version: None,
            context: None,
            request,
            extra: BTreeMap::new(),
        }
    }

    /// Returns whether the requesting device advertises the named interface.
    #[must_use]
    pub fn supports_interface(&self, interface: &str) -> bool {
        self.context
            .as_ref()
            .and_then(|context| context.system.as_ref())
            .and_then(|system| system.device.as_ref())
            .is_some_and(|device| device.supported_interfaces.contains_key(interface))
    }

    /// Returns whether the requesting device can render visual documents.
    #[must_use]
    pub fn supports_visual(&self) -> bool {
        self.supports_interface(VISUAL_INTERFACE)
    }
}

/// Platform context section of the envelope.
///
/// # Invariants
/// - Only the device capability path is interpreted; the rest is opaque.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvelopeContext {
    /// Platform system context.
    #[serde(rename = "System", skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemContext>,
    /// Uninterpreted context fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// System context carrying the requesting device description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemContext {
    /// Requesting device description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceContext>,
    /// Uninterpreted system fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Device description with the advertised capability map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceContext {
    /// Interfaces the device supports, keyed by interface identifier.
    #[serde(rename = "supportedInterfaces", default)]
    pub supported_interfaces: BTreeMap<String, Value>,
    /// Uninterpreted device fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DeviceContext {
    /// Builds a device context advertising the given interfaces.
    #[must_use]
    pub fn with_interfaces(interfaces: &[&str]) -> Self {
        Self {
            supported_interfaces: interfaces
                .iter()
                .map(|name| ((*name).to_string(), Value::Object(serde_json::Map::new())))
                .collect(),
            extra: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: Request
// ============================================================================

/// One inbound request as read from the envelope.
///
/// # Invariants
/// - `kind` is compared verbatim against [`request_types`] identifiers.
/// - `locale` is taken verbatim from the wire; no validation or fallback
///   happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Discriminating request type identifier.
    #[serde(rename = "type")]
    pub kind: String,
    /// Locale identifier as sent by the platform.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub locale: String,
    /// Recognized intent for intent-type requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Session-end reason for session-ended requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Uninterpreted request fields, preserved for logging.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Request {
    /// Builds a launch request for the given locale.
    #[must_use]
    pub fn launch(locale: &str) -> Self {
        Self {
            kind: request_types::LAUNCH.to_string(),
            locale: locale.to_string(),
            intent: None,
            reason: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builds an intent request for the given locale and intent name.
    #[must_use]
    pub fn intent(locale: &str, name: &str) -> Self {
        Self {
            kind: request_types::INTENT.to_string(),
            locale: locale.to_string(),
            intent: Some(Intent::named(name)),
            reason: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builds a session-ended request for the given locale and reason.
    #[must_use]
    pub fn session_ended(locale: &str, reason: &str) -> Self {
        Self {
            kind: request_types::SESSION_ENDED.to_string(),
            locale: locale.to_string(),
            intent: None,
            reason: Some(reason.to_string()),
            extra: BTreeMap::new(),
        }
    }

    /// Returns the intent name when this is an intent-type request.
    #[must_use]
    pub fn intent_name(&self) -> Option<&str> {
        if self.kind == request_types::INTENT {
            self.intent.as_ref().map(|intent| intent.name.as_str())
        } else {
            None
        }
    }

    /// Returns whether this request carries the named intent.
    #[must_use]
    pub fn is_intent(&self, name: &str) -> bool {
        self.intent_name() == Some(name)
    }
}

/// Recognized intent extracted by the platform before dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name, matched verbatim against [`intents`] identifiers.
    pub name: String,
    /// Uninterpreted intent fields (slots and confirmation state).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Intent {
    /// Builds an intent with the given name and no slots.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extra: BTreeMap::new(),
        }
    }
}
