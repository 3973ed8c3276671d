// crates/weathervane-cli/src/serve_policy.rs
// ============================================================================
// Module: Serve Policy
// Description: Loopback-only bind enforcement for the HTTP front end.
// Purpose: Require an explicit opt-in before exposing the skill on a network.
// Dependencies: crate::messages, std::net
// ============================================================================

//! ## Overview
//! The HTTP front end binds to loopback by default. Binding to a
//! non-loopback address requires the `--allow-non-loopback` flag or the
//! [`ALLOW_NON_LOOPBACK_ENV`] environment variable; anything else is refused
//! before a socket is ever opened.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::net::SocketAddr;

use crate::msg;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable opting in to non-loopback binds.
pub const ALLOW_NON_LOOPBACK_ENV: &str = "WEATHERVANE_ALLOW_NON_LOOPBACK";
/// Default loopback bind address for the HTTP front end.
pub const DEFAULT_BIND: &str = "127.0.0.1:3080";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Serve policy errors.
///
/// # Invariants
/// - Display output is the final user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServePolicyError {
    /// The bind address could not be parsed.
    InvalidBind {
        /// Offending bind string.
        bind: String,
        /// Parser diagnostic.
        message: String,
    },
    /// A non-loopback bind was requested without the explicit opt-in.
    NonLoopbackRefused {
        /// Refused bind address.
        bind: String,
    },
    /// The opt-in environment variable held an unrecognized value.
    InvalidEnvValue {
        /// Offending environment value.
        value: String,
    },
}

impl fmt::Display for ServePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::InvalidBind {
                bind,
                message,
            } => msg!("serve.bind.parse_failed", bind = bind, error = message),
            Self::NonLoopbackRefused {
                bind,
            } => {
                msg!("serve.bind.non_loopback_opt_in", bind = bind, env = ALLOW_NON_LOOPBACK_ENV)
            }
            Self::InvalidEnvValue {
                value,
            } => {
                msg!("serve.bind.allow_env_invalid", env = ALLOW_NON_LOOPBACK_ENV, value = value)
            }
        };
        f.write_str(&rendered)
    }
}

impl std::error::Error for ServePolicyError {}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Outcome of bind policy enforcement.
///
/// # Invariants
/// - `network_exposed` is true only after an explicit opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOutcome {
    /// The address the server may bind.
    pub addr: SocketAddr,
    /// Whether the bind leaves loopback.
    pub network_exposed: bool,
}

/// Parses a boolean opt-in value.
///
/// Accepts `true/false`, `1/0`, `yes/no`, and `on/off`, case-insensitively.
#[must_use]
pub fn parse_opt_in(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Resolves the non-loopback opt-in from the flag and environment.
///
/// The flag wins when set; otherwise the environment variable is consulted.
///
/// # Errors
///
/// Returns [`ServePolicyError::InvalidEnvValue`] when the environment value
/// is unrecognized.
pub fn resolve_allow_non_loopback(
    flag: bool,
    env_value: Option<&str>,
) -> Result<bool, ServePolicyError> {
    if flag {
        return Ok(true);
    }
    match env_value {
        None => Ok(false),
        Some(value) => parse_opt_in(value).ok_or_else(|| ServePolicyError::InvalidEnvValue {
            value: value.to_string(),
        }),
    }
}

/// Parses and polices a bind address.
///
/// # Errors
///
/// Returns [`ServePolicyError::InvalidBind`] for unparsable addresses and
/// [`ServePolicyError::NonLoopbackRefused`] for non-loopback binds without
/// the opt-in.
pub fn enforce_bind(bind: &str, allow_non_loopback: bool) -> Result<BindOutcome, ServePolicyError> {
    let addr: SocketAddr = bind.parse().map_err(|err: std::net::AddrParseError| {
        ServePolicyError::InvalidBind {
            bind: bind.to_string(),
            message: err.to_string(),
        }
    })?;
    let loopback = addr.ip().is_loopback();
    if !loopback && !allow_non_loopback {
        return Err(ServePolicyError::NonLoopbackRefused {
            bind: bind.to_string(),
        });
    }
    Ok(BindOutcome {
        addr,
        network_exposed: !loopback,
    })
}
