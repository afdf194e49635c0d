// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel client trait for the outbound side of the messaging platform.

use async_trait::async_trait;

use crate::error::HandoffError;

/// Outbound operations against the messaging platform.
///
/// `reply` consumes a one-shot reply token tied to a specific inbound
/// message; `push` addresses a user or agent directly. Delivery failures
/// are not retried by the pipeline -- idempotent retry is the upstream
/// transport's job, bounded by the deduplicator.
#[async_trait]
pub trait ChannelClient: Send + Sync {
    /// Sends a text reply using the inbound message's reply token.
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), HandoffError>;

    /// Pushes a text message to a user or agent id.
    async fn push(&self, to: &str, text: &str) -> Result<(), HandoffError>;

    /// Fetches the user's display name, if the platform exposes one.
    async fn profile_name(&self, user_id: &str) -> Result<Option<String>, HandoffError>;
}
