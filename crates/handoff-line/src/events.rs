// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook payload types and extraction into channel-agnostic events.
//!
//! Only text message events with a usable event id, user id, and reply
//! token enter the pipeline; everything else (stickers, follows, joins,
//! redacted sources) is dropped silently -- it carries no actionable
//! payload and is not even considered for dedup.

use handoff_core::InboundEvent;
use serde::Deserialize;
use tracing::debug;

/// The webhook request body: a batch of events.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One raw webhook event, before gating.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub webhook_event_id: Option<String>,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

/// Who sent the event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type", default)]
    pub source_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// The message attached to a message event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Extract a pipeline-ready [`InboundEvent`], or `None` for events
    /// the pipeline ignores.
    pub fn to_inbound(&self) -> Option<InboundEvent> {
        if self.event_type != "message" {
            debug!(event_type = %self.event_type, "ignoring non-message event");
            return None;
        }
        let message = self.message.as_ref()?;
        if message.message_type != "text" {
            debug!(message_type = %message.message_type, "ignoring non-text message");
            return None;
        }
        let text = message.text.as_deref()?.to_string();
        let event_id = self.webhook_event_id.as_deref()?.to_string();
        let user_id = self.source.as_ref()?.user_id.as_deref()?.to_string();
        let reply_token = self.reply_token.as_deref()?.to_string();

        Some(InboundEvent {
            event_id,
            user_id,
            reply_token,
            text,
        })
    }
}
