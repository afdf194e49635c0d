// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LINE-style messaging channel adapter for the Handoff message router.
//!
//! Covers the three touchpoints with the platform: verifying inbound
//! webhook signatures over the raw body, extracting text message events
//! into the channel-agnostic [`handoff_core::InboundEvent`], and the
//! outbound reply / push / profile API.

pub mod client;
pub mod events;
pub mod signature;

pub use client::LineClient;
pub use events::{WebhookEvent, WebhookPayload};
