// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits decoupling the decision pipeline from its collaborators.

pub mod channel;
pub mod responder;
pub mod settings;

pub use channel::ChannelClient;
pub use responder::AiResponder;
pub use settings::SettingsStore;
