// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-event decision pipeline.
//!
//! Every admitted event resolves to exactly one [`Outcome`]. Ordering is
//! fixed: dedup, keyword match, handover state, then the AI branch.
//! Side channels (profile fetch, agent fan-out, reply delivery) are
//! best-effort and never change which outcome an event resolves to.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use handoff_core::settings::Settings;
use handoff_core::types::{
    AdmitOutcome, ConversationContext, ConversationState, HistoryTurn, InboundEvent, MessageRole,
    Outcome,
};
use handoff_core::{AiResponder, ChannelClient, HandoffError};
use handoff_storage::Database;
use handoff_storage::queries::{conversations, events, messages};

use crate::keyword::{match_keyword, parse_list};

/// The decision pipeline, wired to durable state and the outbound adapters.
pub struct Engine {
    db: Database,
    channel: Arc<dyn ChannelClient>,
    responder: Arc<dyn AiResponder>,
}

impl Engine {
    pub fn new(
        db: Database,
        channel: Arc<dyn ChannelClient>,
        responder: Arc<dyn AiResponder>,
    ) -> Self {
        Self {
            db,
            channel,
            responder,
        }
    }

    /// Resolves one inbound event to its outcome.
    ///
    /// Errors returned here are storage-level only; AI failures become an
    /// apology [`Outcome::Replied`] instead of propagating.
    pub async fn handle_event(
        &self,
        settings: &Settings,
        event: &InboundEvent,
        now: DateTime<Utc>,
    ) -> Result<Outcome, HandoffError> {
        if events::admit(&self.db, &event.event_id, now).await? == AdmitOutcome::Duplicate {
            debug!(event_id = %event.event_id, "duplicate event skipped");
            return Ok(Outcome::Duplicate);
        }

        let keywords = parse_list(&settings.handover.keywords);
        if let Some(keyword) = match_keyword(&event.text, &keywords) {
            return self.hand_over(settings, event, keyword, now).await;
        }

        let state = conversations::get_conversation(&self.db, &event.user_id).await?;
        if state.human_mode {
            if !handover_expired(&state, settings.handover.timeout_minutes, now) {
                debug!(user_id = %event.user_id, "human mode active, holding message");
                return Ok(Outcome::Hold);
            }
            info!(user_id = %event.user_id, "handover timed out, reverting to AI");
            conversations::clear_human_mode(&self.db, &event.user_id, now).await?;
        }

        if !settings.ai.enabled {
            debug!(user_id = %event.user_id, "AI disabled, dropping message");
            return Ok(Outcome::Dropped);
        }

        self.ai_reply(settings, event, now).await
    }

    /// Transition to human control: persist the state, acknowledge the
    /// user, fan out to the configured agents.
    async fn hand_over(
        &self,
        settings: &Settings,
        event: &InboundEvent,
        keyword: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome, HandoffError> {
        let state = conversations::get_conversation(&self.db, &event.user_id).await?;

        let fetched = match self.channel.profile_name(&event.user_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(user_id = %event.user_id, error = %e, "profile fetch failed during handover");
                None
            }
        };

        // A None nickname keeps whatever the row already stores.
        conversations::upsert_handover(&self.db, &event.user_id, fetched.as_deref(), now).await?;
        info!(user_id = %event.user_id, %keyword, "conversation handed to human agents");

        if let Err(e) = self
            .channel
            .reply(&event.reply_token, &settings.handover.ack_message)
            .await
        {
            warn!(user_id = %event.user_id, error = %e, "handover acknowledgement delivery failed");
        }

        let display = fetched
            .or(state.nickname)
            .unwrap_or_else(|| settings.handover.fallback_nickname.clone());
        let notification = format!("{display} / {keyword} / {}", event.text);
        for agent_id in parse_list(&settings.handover.agent_ids) {
            if let Err(e) = self.channel.push(&agent_id, &notification).await {
                warn!(%agent_id, error = %e, "agent notification failed");
            }
        }

        Ok(Outcome::Handover {
            keyword: keyword.to_string(),
        })
    }

    /// The AI branch: assemble context, ask the responder, log the
    /// exchange, deliver the reply.
    async fn ai_reply(
        &self,
        settings: &Settings,
        event: &InboundEvent,
        now: DateTime<Utc>,
    ) -> Result<Outcome, HandoffError> {
        let history = messages::recent_messages(&self.db, &event.user_id, settings.ai.history_limit)
            .await?
            .into_iter()
            .map(|m| HistoryTurn {
                role: m.role,
                content: m.content,
            })
            .collect();
        let previous_response_id =
            messages::latest_response_id(&self.db, &event.user_id).await?;
        let context = ConversationContext {
            history,
            previous_response_id,
            message: event.text.clone(),
        };

        let text = match self.responder.respond(settings, &context).await {
            Ok(reply) => {
                // Only successful exchanges enter the history window.
                messages::append_message(
                    &self.db,
                    &event.user_id,
                    MessageRole::User,
                    &event.text,
                    None,
                    now,
                )
                .await?;
                messages::append_message(
                    &self.db,
                    &event.user_id,
                    MessageRole::Assistant,
                    &reply.text,
                    reply.response_id.as_deref(),
                    now,
                )
                .await?;
                reply.text
            }
            Err(e) => {
                warn!(user_id = %event.user_id, error = %e, "AI responder failed, sending apology");
                format!("Sorry, I could not come up with a reply right now. ({e})")
            }
        };

        if let Err(e) = self.channel.reply(&event.reply_token, &text).await {
            warn!(user_id = %event.user_id, error = %e, "reply delivery failed");
        }

        Ok(Outcome::Replied { text })
    }
}

/// True once the agent-silence window has fully elapsed. A human-mode row
/// without a timestamp counts as expired.
fn handover_expired(state: &ConversationState, timeout_minutes: i64, now: DateTime<Utc>) -> bool {
    match state.last_human_at {
        Some(since) => now - since >= Duration::minutes(timeout_minutes),
        None => true,
    }
}
