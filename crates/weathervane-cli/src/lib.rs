// crates/weathervane-cli/src/lib.rs
// ============================================================================
// Module: Weathervane CLI Library
// Description: CLI message catalog, serve policy, and dispatch logging.
// Purpose: Share the binary's reusable surfaces with its unit tests.
// Dependencies: serde_json, thiserror, weathervane-core
// ============================================================================

//! ## Overview
//! The CLI library carries the surfaces the `weathervane` binary shares with
//! its tests: the CLI's own message catalog (routed through the same
//! [`weathervane_core::StringCatalog`] machinery the skill speech uses), the
//! loopback serve policy, and the JSON-lines dispatch log sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod logging;
pub mod messages;
pub mod serve_policy;
