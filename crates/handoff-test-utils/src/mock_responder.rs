// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock AI responder for deterministic testing.
//!
//! `MockResponder` implements `AiResponder` with pre-configured replies
//! or errors, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use handoff_core::settings::Settings;
use handoff_core::types::{AiReply, ConversationContext};
use handoff_core::{AiResponder, HandoffError};

/// A mock AI responder that pops pre-configured results from a FIFO
/// queue. When the queue is empty, a default "mock reply" is returned.
pub struct MockResponder {
    results: Arc<Mutex<VecDeque<Result<AiReply, String>>>>,
    seen_contexts: Arc<Mutex<Vec<ConversationContext>>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
            seen_contexts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful reply without a continuation reference.
    pub async fn add_reply(&self, text: &str) {
        self.results.lock().await.push_back(Ok(AiReply {
            text: text.to_string(),
            response_id: None,
        }));
    }

    /// Queue a successful reply carrying a continuation reference.
    pub async fn add_reply_with_id(&self, text: &str, response_id: &str) {
        self.results.lock().await.push_back(Ok(AiReply {
            text: text.to_string(),
            response_id: Some(response_id.to_string()),
        }));
    }

    /// Queue a provider failure.
    pub async fn add_error(&self, message: &str) {
        self.results.lock().await.push_back(Err(message.to_string()));
    }

    /// Every context passed to `respond()`, in call order.
    pub async fn seen_contexts(&self) -> Vec<ConversationContext> {
        self.seen_contexts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.seen_contexts.lock().await.len()
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiResponder for MockResponder {
    async fn respond(
        &self,
        _settings: &Settings,
        context: &ConversationContext,
    ) -> Result<AiReply, HandoffError> {
        self.seen_contexts.lock().await.push(context.clone());
        match self.results.lock().await.pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(HandoffError::Provider {
                message,
                source: None,
            }),
            None => Ok(AiReply {
                text: "mock reply".to_string(),
                response_id: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queue_drains_in_order_then_defaults() {
        let responder = MockResponder::new();
        responder.add_reply("first").await;
        responder.add_error("boom").await;

        let settings = Settings::default();
        let context = ConversationContext::default();

        assert_eq!(
            responder.respond(&settings, &context).await.unwrap().text,
            "first"
        );
        assert!(responder.respond(&settings, &context).await.is_err());
        assert_eq!(
            responder.respond(&settings, &context).await.unwrap().text,
            "mock reply"
        );
        assert_eq!(responder.call_count().await, 3);
    }
}
