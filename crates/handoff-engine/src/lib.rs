// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decision pipeline for the Handoff message router.
//!
//! Resolves every admitted inbound event to exactly one outcome:
//! duplicate skip, human handover, silent hold, AI reply, or silent
//! drop. Storage is the only hard dependency; the messaging channel and
//! the AI responder plug in behind their traits.

pub mod engine;
pub mod keyword;

pub use engine::Engine;
pub use keyword::{match_keyword, parse_list};
