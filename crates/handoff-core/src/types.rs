// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Handoff pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single inbound message event after channel-specific extraction.
///
/// Events missing an id or text never make it this far -- the channel
/// adapter drops them before the pipeline sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Upstream event id, unique per delivery attempt group. Dedup key.
    pub event_id: String,
    /// Opaque stable identifier for the end user.
    pub user_id: String,
    /// One-shot handle for replying to this specific message.
    pub reply_token: String,
    /// Message text.
    pub text: String,
}

/// Result of the deduplication gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitOutcome {
    /// First time this event id has been seen; processing continues.
    Admitted,
    /// Event id already recorded; processing stops with no side effects.
    Duplicate,
}

/// The exactly-one outcome the pipeline produces per inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redelivered event, silently skipped.
    Duplicate,
    /// Conversation handed to a human agent; acknowledgement sent.
    Handover { keyword: String },
    /// Human agent owns the conversation; message held silently.
    Hold,
    /// A reply was sent to the user (model answer or formatted AI error).
    Replied { text: String },
    /// AI disabled and no keyword hit; nothing sent, nothing written.
    Dropped,
}

/// Durable per-user conversation control state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub user_id: String,
    /// Last-known display name; best-effort, may be stale.
    pub nickname: Option<String>,
    /// True when a human agent owns the conversation.
    pub human_mode: bool,
    /// Set whenever handover is (re)triggered; drives timeout reversion.
    pub last_human_at: Option<DateTime<Utc>>,
}

impl ConversationState {
    /// Sentinel state for a user with no stored row: a brand-new
    /// conversation is implicitly in AI mode.
    pub fn fresh(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            nickname: None,
            human_mode: false,
            last_human_at: None,
        }
    }
}

/// Role of a logged conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A logged conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: i64,
    pub user_id: String,
    pub role: MessageRole,
    pub content: String,
    /// Opaque backend response reference, present on assistant turns
    /// produced by the continuation-style backend.
    pub response_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Context assembled for one AI call.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    /// Bounded window of prior turns, oldest first.
    pub history: Vec<HistoryTurn>,
    /// Reference from the most recent AI turn that produced one.
    pub previous_response_id: Option<String>,
    /// The new user message.
    pub message: String,
}

/// One prior turn in the history window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    pub role: MessageRole,
    pub content: String,
}

/// A normalized successful AI response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiReply {
    pub text: String,
    /// Continuation reference to persist for the next turn, if the
    /// backend issued one.
    pub response_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn fresh_state_is_ai_controlled() {
        let state = ConversationState::fresh("u1");
        assert!(!state.human_mode);
        assert!(state.last_human_at.is_none());
        assert!(state.nickname.is_none());
    }

    #[test]
    fn message_role_round_trips() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            assert_eq!(MessageRole::from_str(&s).unwrap(), role);
        }
        assert_eq!(MessageRole::User.to_string(), "user");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn message_role_serde_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
