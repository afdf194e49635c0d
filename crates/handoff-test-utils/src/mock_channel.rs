// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging channel for deterministic testing.
//!
//! `MockChannel` implements `ChannelClient` with captured outbound
//! traffic and scriptable per-call failures.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use handoff_core::{ChannelClient, HandoffError};

/// A captured outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Reply token or push recipient id.
    pub target: String,
    pub text: String,
}

/// A mock messaging channel for testing.
///
/// Captures every `reply()` and `push()` for later assertion. Push
/// failures can be scripted per recipient, and profile lookups are fed
/// from a FIFO queue of scripted results.
pub struct MockChannel {
    replies: Arc<Mutex<Vec<SentMessage>>>,
    pushes: Arc<Mutex<Vec<SentMessage>>>,
    failing_push_targets: Arc<Mutex<HashSet<String>>>,
    fail_replies: Arc<Mutex<bool>>,
    profiles: Arc<Mutex<VecDeque<Result<Option<String>, String>>>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            pushes: Arc::new(Mutex::new(Vec::new())),
            failing_push_targets: Arc::new(Mutex::new(HashSet::new())),
            fail_replies: Arc::new(Mutex::new(false)),
            profiles: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// All captured replies, in send order.
    pub async fn replies(&self) -> Vec<SentMessage> {
        self.replies.lock().await.clone()
    }

    /// All captured pushes, in send order.
    pub async fn pushes(&self) -> Vec<SentMessage> {
        self.pushes.lock().await.clone()
    }

    /// Make every `push()` to the given recipient fail.
    pub async fn fail_pushes_to(&self, target: &str) {
        self.failing_push_targets
            .lock()
            .await
            .insert(target.to_string());
    }

    /// Make every `reply()` fail.
    pub async fn fail_replies(&self) {
        *self.fail_replies.lock().await = true;
    }

    /// Queue the next `profile_name()` result.
    pub async fn script_profile(&self, result: Result<Option<String>, &str>) {
        self.profiles
            .lock()
            .await
            .push_back(result.map_err(|e| e.to_string()));
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelClient for MockChannel {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), HandoffError> {
        if *self.fail_replies.lock().await {
            return Err(HandoffError::Channel {
                message: "scripted reply failure".to_string(),
                source: None,
            });
        }
        self.replies.lock().await.push(SentMessage {
            target: reply_token.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn push(&self, to: &str, text: &str) -> Result<(), HandoffError> {
        if self.failing_push_targets.lock().await.contains(to) {
            return Err(HandoffError::Channel {
                message: format!("scripted push failure for {to}"),
                source: None,
            });
        }
        self.pushes.lock().await.push(SentMessage {
            target: to.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn profile_name(&self, _user_id: &str) -> Result<Option<String>, HandoffError> {
        match self.profiles.lock().await.pop_front() {
            Some(Ok(name)) => Ok(name),
            Some(Err(message)) => Err(HandoffError::Channel {
                message,
                source: None,
            }),
            // Unscripted lookups behave like a user with no profile.
            None => Ok(None),
        }
    }
}
