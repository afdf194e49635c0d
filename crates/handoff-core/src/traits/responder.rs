// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Responder trait for LLM backend integrations.

use async_trait::async_trait;

use crate::error::HandoffError;
use crate::settings::Settings;
use crate::types::{AiReply, ConversationContext};

/// Produces one AI reply for one admitted, AI-eligible message.
///
/// Implementations own backend selection, context shaping, and
/// normalization of every failure mode into [`HandoffError::Provider`].
/// The caller converts a returned error into a user-visible apology reply
/// rather than failing the request.
#[async_trait]
pub trait AiResponder: Send + Sync {
    async fn respond(
        &self,
        settings: &Settings,
        context: &ConversationContext,
    ) -> Result<AiReply, HandoffError>;
}
