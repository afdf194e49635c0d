// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings stores for tests: one that always answers, one that never does.

use std::sync::Arc;

use async_trait::async_trait;

use handoff_core::settings::Settings;
use handoff_core::{HandoffError, SettingsStore};

/// A settings store that serves one fixed snapshot.
pub struct StaticSettings(Arc<Settings>);

impl StaticSettings {
    pub fn new(settings: Settings) -> Self {
        Self(Arc::new(settings))
    }
}

#[async_trait]
impl SettingsStore for StaticSettings {
    async fn fetch(&self) -> Result<Arc<Settings>, HandoffError> {
        Ok(Arc::clone(&self.0))
    }
}

/// A settings store whose every fetch fails, for exercising the
/// server-error path.
pub struct FailingSettings;

#[async_trait]
impl SettingsStore for FailingSettings {
    async fn fetch(&self) -> Result<Arc<Settings>, HandoffError> {
        Err(HandoffError::Config(
            "scripted settings fetch failure".to_string(),
        ))
    }
}
