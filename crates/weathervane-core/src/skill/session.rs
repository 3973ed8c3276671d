// crates/weathervane-core/src/skill/session.rs
// ============================================================================
// Module: Session Handlers
// Description: Help, fallback, exit, and session-ended request handlers.
// Purpose: Cover the built-in conversational intents around the weather action.
// Dependencies: crate::core, crate::i18n, crate::runtime
// ============================================================================

//! ## Overview
//! These handlers answer the platform's built-in intents: help and fallback
//! speak a localized prompt with a reprompt, cancel and stop merge into one
//! farewell, and session-ended records the teardown reason and stays silent.
//! Each predicate matches on exact request type and intent name only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::context::RequestContext;
use crate::core::request::intents;
use crate::core::request::request_types;
use crate::core::response::Response;
use crate::i18n::message_keys;
use crate::runtime::log::DispatchEvent;
use crate::runtime::registry::HandlerError;
use crate::runtime::registry::RequestHandler;

// ============================================================================
// SECTION: Help
// ============================================================================

/// Answers the built-in help intent with usage guidance.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpHandler;

impl RequestHandler for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    fn can_handle(&self, ctx: &RequestContext<'_>) -> bool {
        ctx.request().is_intent(intents::HELP)
    }

    fn handle(&self, ctx: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let localizer = ctx.localizer()?;
        let message = localizer.resolve(message_keys::HELP_MESSAGE)?;
        let reprompt = localizer.resolve(message_keys::HELP_REPROMPT)?;
        Ok(Response::builder().speak(&message).reprompt(&reprompt).finalize())
    }
}

// ============================================================================
// SECTION: Fallback
// ============================================================================

/// Redirects unrecognized utterances back to the skill's capabilities.
///
/// The platform only sends the fallback intent in locales that support it;
/// elsewhere this predicate simply never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackHandler;

impl RequestHandler for FallbackHandler {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn can_handle(&self, ctx: &RequestContext<'_>) -> bool {
        ctx.request().is_intent(intents::FALLBACK)
    }

    fn handle(&self, ctx: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let localizer = ctx.localizer()?;
        let message = localizer.resolve(message_keys::FALLBACK_MESSAGE)?;
        let reprompt = localizer.resolve(message_keys::FALLBACK_REPROMPT)?;
        Ok(Response::builder().speak(&message).reprompt(&reprompt).finalize())
    }
}

// ============================================================================
// SECTION: Exit
// ============================================================================

/// Answers cancel and stop as one merged farewell case.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitHandler;

impl RequestHandler for ExitHandler {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn can_handle(&self, ctx: &RequestContext<'_>) -> bool {
        let request = ctx.request();
        request.is_intent(intents::CANCEL) || request.is_intent(intents::STOP)
    }

    fn handle(&self, ctx: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let localizer = ctx.localizer()?;
        let message = localizer.resolve(message_keys::STOP_MESSAGE)?;
        Ok(Response::builder().speak(&message).finalize())
    }
}

// ============================================================================
// SECTION: Session Ended
// ============================================================================

/// Records the session teardown reason and answers silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionEndedHandler;

impl RequestHandler for SessionEndedHandler {
    fn name(&self) -> &'static str {
        "session_ended"
    }

    fn can_handle(&self, ctx: &RequestContext<'_>) -> bool {
        ctx.request().kind == request_types::SESSION_ENDED
    }

    fn handle(&self, ctx: &RequestContext<'_>) -> Result<Response, HandlerError> {
        ctx.record(&DispatchEvent::SessionEnded {
            reason: ctx.request().reason.clone(),
        });
        Ok(Response::empty())
    }
}
