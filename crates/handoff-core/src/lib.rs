// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Handoff message router.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Handoff workspace. The decision pipeline
//! and all adapters (storage, messaging channel, LLM backends) build on the
//! seams defined here.

pub mod error;
pub mod settings;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HandoffError;
pub use settings::{Backend, Settings};
pub use types::{
    AdmitOutcome, AiReply, ConversationContext, ConversationState, HistoryTurn, InboundEvent,
    MessageRole, Outcome, StoredMessage,
};

// Re-export the adapter traits at crate root.
pub use traits::{AiResponder, ChannelClient, SettingsStore};
