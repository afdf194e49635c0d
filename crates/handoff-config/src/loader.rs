// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order: compiled defaults < `./handoff.toml` < `HANDOFF_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HandoffConfig;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "handoff.toml";

/// Load configuration from `./handoff.toml` with env var overrides.
pub fn load_config() -> Result<HandoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HandoffConfig::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HandoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HandoffConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HandoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HandoffConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HANDOFF_CHANNEL_CHANNEL_SECRET` must
/// map to `channel.channel_secret`, not `channel.channel.secret`.
fn env_provider() -> Env {
    Env::prefixed("HANDOFF_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped,
        // e.g. HANDOFF_AI_API_KEY -> "ai_api_key".
        let mapped = key
            .as_str()
            .replacen("agent_", "agent.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("ai_", "ai.", 1)
            .replacen("prompt_", "prompt.", 1)
            .replacen("handover_", "handover.", 1)
            .replacen("channel_", "channel.", 1);
        mapped.into()
    })
}
