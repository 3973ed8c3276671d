// crates/weathervane-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Unit tests for argument parsing, policy, and HTTP handlers.
// Purpose: Validate binary behavior with in-memory fixtures.
// Dependencies: weathervane-cli, tempfile, tokio
// ============================================================================

//! ## Overview
//! Exercises CLI parsing, the serve policy, the message catalog, the
//! JSON-lines sink, and the HTTP handlers with direct invocations.

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
    reason = "Test-only CLI assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write as IoWrite;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::body::to_bytes;
use axum::extract::State;
use axum::http::StatusCode;
use clap::Parser;
use tempfile::NamedTempFile;
use weathervane_cli::logging::JsonLineLog;
use weathervane_cli::msg;
use weathervane_cli::serve_policy::DEFAULT_BIND;
use weathervane_cli::serve_policy::ServePolicyError;
use weathervane_cli::serve_policy::enforce_bind;
use weathervane_cli::serve_policy::parse_opt_in;
use weathervane_cli::serve_policy::resolve_allow_non_loopback;
use weathervane_config::SkillConfig;
use weathervane_core::DispatchEvent;
use weathervane_core::DispatchLog;
use weathervane_core::Request;
use weathervane_core::RequestEnvelope;
use weathervane_core::intents;

use super::Cli;
use super::Commands;
use super::read_envelope;
use crate::serve::ServeState;
use crate::serve::handle_dispatch;
use crate::serve::handle_health;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Shared in-memory writer for sink assertions.
#[derive(Clone, Default)]
struct SharedBuffer {
    /// Captured bytes.
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Returns the captured bytes as UTF-8 text.
    fn text(&self) -> String {
        String::from_utf8(self.bytes.lock().expect("buffer lock").clone()).expect("utf-8")
    }
}

impl IoWrite for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Builds the default-skill server state.
fn serve_state() -> Arc<ServeState> {
    let definition = SkillConfig::default().build().expect("default config builds");
    Arc::new(ServeState {
        dispatcher: Arc::new(definition.into_silent_dispatcher()),
    })
}

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn parses_handle_with_input_path() {
    let cli = Cli::try_parse_from(["weathervane", "handle", "--input", "req.json", "--pretty"])
        .expect("parse");
    let Some(Commands::Handle(command)) = cli.command else {
        panic!("expected handle command");
    };
    assert_eq!(command.input.as_deref(), Some(std::path::Path::new("req.json")));
    assert!(command.pretty);
}

#[test]
fn serve_defaults_to_loopback_bind() {
    let cli = Cli::try_parse_from(["weathervane", "serve"]).expect("parse");
    let Some(Commands::Serve(command)) = cli.command else {
        panic!("expected serve command");
    };
    assert_eq!(command.bind, DEFAULT_BIND);
    assert!(!command.allow_non_loopback);
}

#[test]
fn version_flag_parses_without_subcommand() {
    let cli = Cli::try_parse_from(["weathervane", "--version"]).expect("parse");
    assert!(cli.show_version);
    assert!(cli.command.is_none());
}

#[test]
fn config_validate_parses() {
    let cli = Cli::try_parse_from(["weathervane", "config", "validate"]).expect("parse");
    assert!(matches!(cli.command, Some(Commands::Config { .. })));
}

// ============================================================================
// SECTION: Envelope Input
// ============================================================================

#[test]
fn read_envelope_reads_file() {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(br#"{"request": {"type": "LaunchRequest", "locale": "en"}}"#)
        .expect("write");
    let raw = read_envelope(Some(file.path())).expect("read");
    assert!(raw.contains("LaunchRequest"));
}

#[test]
fn read_envelope_rejects_oversized_file() {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(&vec![b'x'; 1_048_577]).expect("write");
    let err = read_envelope(Some(file.path())).expect_err("oversized");
    assert!(err.to_string().contains("Refusing to read request envelope"));
}

#[test]
fn read_envelope_reports_missing_file() {
    let err =
        read_envelope(Some(std::path::Path::new("definitely-not-here.json"))).expect_err("missing");
    assert!(err.to_string().contains("Failed to read request envelope"));
}

// ============================================================================
// SECTION: Serve Policy
// ============================================================================

#[test]
fn loopback_bind_is_allowed_by_default() {
    let outcome = enforce_bind("127.0.0.1:3080", false).expect("loopback bind");
    assert!(!outcome.network_exposed);
}

#[test]
fn non_loopback_bind_is_refused_without_opt_in() {
    let err = enforce_bind("0.0.0.0:3080", false).expect_err("refused");
    assert!(matches!(err, ServePolicyError::NonLoopbackRefused { .. }));
}

#[test]
fn non_loopback_bind_is_allowed_with_opt_in() {
    let outcome = enforce_bind("0.0.0.0:3080", true).expect("opted-in bind");
    assert!(outcome.network_exposed);
}

#[test]
fn malformed_bind_is_rejected() {
    let err = enforce_bind("not-an-address", false).expect_err("malformed");
    assert!(matches!(err, ServePolicyError::InvalidBind { .. }));
}

#[test]
fn opt_in_values_parse() {
    for value in ["true", "1", "YES", "On"] {
        assert_eq!(parse_opt_in(value), Some(true), "{value}");
    }
    for value in ["false", "0", "no", "OFF"] {
        assert_eq!(parse_opt_in(value), Some(false), "{value}");
    }
    assert_eq!(parse_opt_in("maybe"), None);
}

#[test]
fn flag_wins_over_environment() {
    assert!(resolve_allow_non_loopback(true, Some("garbage")).expect("flag wins"));
}

#[test]
fn invalid_environment_value_is_rejected() {
    let err = resolve_allow_non_loopback(false, Some("maybe")).expect_err("invalid env");
    assert!(matches!(err, ServePolicyError::InvalidEnvValue { .. }));
}

// ============================================================================
// SECTION: Messages
// ============================================================================

#[test]
fn message_substitutes_placeholders() {
    assert_eq!(msg!("main.version", version = "0.1.0"), "weathervane 0.1.0");
}

#[test]
fn unknown_message_key_falls_back_to_key() {
    assert_eq!(msg!("no.such.key"), "no.such.key");
}

// ============================================================================
// SECTION: Dispatch Logging
// ============================================================================

#[test]
fn json_line_log_writes_one_line_per_event() {
    let buffer = SharedBuffer::default();
    let log = JsonLineLog::new(Box::new(buffer.clone()));
    log.record(&DispatchEvent::SessionEnded {
        reason: Some("USER_INITIATED".to_string()),
    });

    let text = buffer.text();
    assert_eq!(text.lines().count(), 1);
    let parsed: serde_json::Value = serde_json::from_str(text.trim()).expect("json line");
    assert_eq!(parsed["event"], "session_ended");
    assert_eq!(parsed["reason"], "USER_INITIATED");
}

// ============================================================================
// SECTION: HTTP Handlers
// ============================================================================

#[tokio::test]
async fn dispatch_route_answers_help() {
    let envelope = RequestEnvelope::new(Request::intent("en", intents::HELP));
    let response = handle_dispatch(State(serve_state()), Json(envelope)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let parsed: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(parsed["version"], "1.0");
    assert_eq!(
        parsed["response"]["outputSpeech"]["ssml"],
        "You can say what's the weather, or, you can say exit... What can I help you with?"
    );
}

#[tokio::test]
async fn dispatch_route_surfaces_unrecoverable_as_500() {
    let config = SkillConfig::from_toml_str("[catalog]\nenable_fallback = false\n")
        .expect("config parses");
    let definition = config.build().expect("config builds");
    let state = Arc::new(ServeState {
        dispatcher: Arc::new(definition.into_silent_dispatcher()),
    });

    // Locale absent from the catalog with fallback disabled: the boundary
    // cannot resolve its own message.
    let envelope = RequestEnvelope::new(Request::intent("de-DE", "UnknownIntent"));
    let response = handle_dispatch(State(state), Json(envelope)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_route_reports_ok() {
    let Json(body) = handle_health().await;
    assert_eq!(body["status"], "ok");
}
