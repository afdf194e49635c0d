// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend dispatch and context shaping behind the [`AiResponder`] trait.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use handoff_core::settings::{Backend, PromptSettings, Settings};
use handoff_core::types::{AiReply, ConversationContext};
use handoff_core::{AiResponder, HandoffError};

use crate::chat::ChatClient;
use crate::responses::{ResponsesCallError, ResponsesClient};
use crate::types::ChatMessage;

const DOC_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The production [`AiResponder`]: routes each call to the configured
/// backend variant and assembles the instruction block.
///
/// The continuation-style variant falls back to the stateless one when
/// the endpoint cannot be reached at all. A reached endpoint that
/// rejects the call never falls back; retrying the same request against
/// a second endpoint would hide a configuration problem.
pub struct OpenAiResponder {
    chat: ChatClient,
    responses: ResponsesClient,
    docs: reqwest::Client,
}

impl OpenAiResponder {
    pub fn new() -> Result<Self, HandoffError> {
        Ok(Self {
            chat: ChatClient::new()?,
            responses: ResponsesClient::new()?,
            docs: reqwest::Client::builder()
                .timeout(DOC_FETCH_TIMEOUT)
                .build()
                .map_err(|e| HandoffError::Provider {
                    message: format!("failed to build HTTP client: {e}"),
                    source: Some(Box::new(e)),
                })?,
        })
    }

    /// Test-only constructor pinning each variant to its own mock server.
    #[cfg(test)]
    pub(crate) fn with_base_urls(chat_base: &str, responses_base: &str) -> Self {
        Self {
            chat: ChatClient::with_base_url(chat_base),
            responses: ResponsesClient::with_base_url(responses_base),
            docs: reqwest::Client::builder()
                .timeout(DOC_FETCH_TIMEOUT)
                .build()
                .unwrap(),
        }
    }

    /// Assembles the instruction block: system prompt, inline reference
    /// text, then the fetched reference document, joined by blank lines.
    async fn build_instructions(&self, prompt: &PromptSettings) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if !prompt.system_prompt.is_empty() {
            parts.push(prompt.system_prompt.clone());
        }
        if !prompt.reference_text.is_empty() {
            parts.push(prompt.reference_text.clone());
        }
        if let Some(url) = prompt.reference_url.as_deref()
            && let Some(doc) = self.fetch_reference(url).await
        {
            parts.push(doc);
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// Best-effort fetch of the reference document. Any failure degrades
    /// to answering without it.
    async fn fetch_reference(&self, url: &str) -> Option<String> {
        let response = match self.docs.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, error = %e, "reference document fetch failed, continuing without it");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!(%url, status = %response.status(), "reference document fetch failed, continuing without it");
            return None;
        }
        match response.text().await {
            Ok(body) if !body.is_empty() => Some(body),
            Ok(_) => None,
            Err(e) => {
                warn!(%url, error = %e, "reference document body unreadable, continuing without it");
                None
            }
        }
    }

    async fn chat_reply(
        &self,
        settings: &Settings,
        instructions: Option<&str>,
        context: &ConversationContext,
    ) -> Result<AiReply, HandoffError> {
        let window = context
            .history
            .len()
            .saturating_sub(settings.ai.history_limit);
        let mut messages = Vec::with_capacity(context.history.len() + 2);
        if let Some(instructions) = instructions {
            messages.push(ChatMessage::new("system", instructions));
        }
        for turn in &context.history[window..] {
            messages.push(ChatMessage::new(&turn.role.to_string(), &turn.content));
        }
        messages.push(ChatMessage::new("user", &context.message));

        let text = self.chat.complete(&settings.ai, messages).await?;
        Ok(AiReply {
            text,
            response_id: None,
        })
    }
}

#[async_trait]
impl AiResponder for OpenAiResponder {
    async fn respond(
        &self,
        settings: &Settings,
        context: &ConversationContext,
    ) -> Result<AiReply, HandoffError> {
        let instructions = self.build_instructions(&settings.prompt).await;

        match settings.ai.backend {
            Backend::Chat => self.chat_reply(settings, instructions.as_deref(), context).await,
            Backend::Responses => {
                let result = self
                    .responses
                    .create(
                        &settings.ai,
                        instructions.clone(),
                        &context.message,
                        context.previous_response_id.as_deref(),
                    )
                    .await;
                match result {
                    Ok(reply) => Ok(reply),
                    Err(ResponsesCallError::Api(e)) => Err(e),
                    Err(ResponsesCallError::Transport(e)) => {
                        warn!(error = %e, "responses endpoint unreachable, falling back to chat");
                        self.chat_reply(settings, instructions.as_deref(), context).await
                    }
                }
            }
        }
    }
}
