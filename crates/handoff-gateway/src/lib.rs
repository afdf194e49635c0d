// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP gateway for the Handoff message router.
//!
//! One authenticated endpoint (`POST /webhook`) receives signed event
//! batches from the messaging platform and drives them through the
//! decision pipeline sequentially; `GET /health` serves liveness.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, router, start_server};
