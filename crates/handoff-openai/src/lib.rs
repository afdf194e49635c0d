// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-style LLM backends for the Handoff message router.
//!
//! Two interchangeable variants sit behind [`OpenAiResponder`]: the
//! stateless Chat Completions shape, which resends a bounded history
//! window on every call, and the continuation-style Responses shape,
//! which carries the conversation through an opaque previous-response
//! reference. Selection is a per-invocation settings value.

pub mod chat;
pub mod responder;
pub mod responses;
pub mod types;

pub use chat::ChatClient;
pub use responder::OpenAiResponder;
pub use responses::{ResponsesCallError, ResponsesClient};
