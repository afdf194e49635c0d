// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Production [`SettingsStore`] backed by an `arc-swap` snapshot.
//!
//! The webhook handler fetches settings once per invocation through the
//! trait; this impl serves lock-free snapshots of the config loaded at
//! startup. Replacing the snapshot (e.g. after a config reload) takes
//! effect on the next invocation without restarting the process.

use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use handoff_core::{HandoffError, Settings, SettingsStore};

use crate::model::HandoffConfig;

/// Lock-free settings snapshot handle.
#[derive(Debug)]
pub struct SettingsHandle {
    current: ArcSwap<Settings>,
}

impl SettingsHandle {
    /// Create a handle seeded from a loaded config.
    pub fn new(config: &HandoffConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config.to_settings()),
        }
    }

    /// Replace the snapshot; readers see the new settings on their next fetch.
    pub fn replace(&self, config: &HandoffConfig) {
        self.current.store(Arc::new(config.to_settings()));
    }

    /// Current snapshot without going through the trait.
    pub fn snapshot(&self) -> Arc<Settings> {
        self.current.load_full()
    }
}

#[async_trait]
impl SettingsStore for SettingsHandle {
    async fn fetch(&self) -> Result<Arc<Settings>, HandoffError> {
        Ok(self.current.load_full())
    }
}
