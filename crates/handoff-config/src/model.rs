// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Handoff message router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages. The routing
//! sections (`ai`, `prompt`, `handover`, `channel`) are the runtime
//! [`Settings`] read model defined in `handoff-core`; the sections here add
//! startup-only concerns (process identity, listener, database path).

use handoff_core::settings::{AiSettings, ChannelSettings, HandoverSettings, PromptSettings};
use handoff_core::Settings;
use serde::{Deserialize, Serialize};

/// Top-level Handoff configuration.
///
/// Loaded from `handoff.toml` with `HANDOFF_*` environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HandoffConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Webhook listener settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// LLM backend selection and generation parameters.
    #[serde(default)]
    pub ai: AiSettings,

    /// System prompt and reference material.
    #[serde(default)]
    pub prompt: PromptSettings,

    /// Human-handover behavior.
    #[serde(default)]
    pub handover: HandoverSettings,

    /// Messaging-channel credentials.
    #[serde(default)]
    pub channel: ChannelSettings,
}

impl HandoffConfig {
    /// Extracts the runtime settings snapshot consumed per invocation.
    pub fn to_settings(&self) -> Settings {
        Settings {
            ai: self.ai.clone(),
            prompt: self.prompt.clone(),
            handover: self.handover.clone(),
            channel: self.channel.clone(),
        }
    }
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot process.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

/// Webhook listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_agent_name() -> String {
    "handoff".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_path() -> String {
    "handoff.db".to_string()
}
