// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings store trait -- the per-invocation configuration read model.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandoffError;
use crate::settings::Settings;

/// Fetches the current settings snapshot for one invocation.
///
/// A fetch failure is batch-fatal: behavior is undefined without settings,
/// so the gateway answers 500 and processes no events.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn fetch(&self) -> Result<Arc<Settings>, HandoffError>;
}
