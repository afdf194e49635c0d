// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Handoff integration tests.
//!
//! Mock implementations of the pipeline's adapter traits for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockChannel`] - captures outbound replies and pushes, with scriptable failures
//! - [`MockResponder`] - returns pre-configured AI replies or errors
//! - [`StaticSettings`] / [`FailingSettings`] - settings stores for both fetch paths

pub mod mock_channel;
pub mod mock_responder;
pub mod settings;

pub use mock_channel::MockChannel;
pub use mock_responder::MockResponder;
pub use settings::{FailingSettings, StaticSettings};
