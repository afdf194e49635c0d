// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The runtime settings read model consumed once per webhook invocation.
//!
//! Settings are an explicit value passed into every component call -- there
//! is no process-wide singleton. The production [`SettingsStore`] in
//! `handoff-config` snapshots these from the loaded TOML config; tests
//! construct them directly.
//!
//! [`SettingsStore`]: crate::traits::SettingsStore

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Everything the decision pipeline needs for one invocation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    pub ai: AiSettings,
    pub prompt: PromptSettings,
    pub handover: HandoverSettings,
    pub channel: ChannelSettings,
}

/// Which LLM backend variant handles AI replies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Stateless-history variant: full history window sent every call.
    #[default]
    Chat,
    /// Continuation-style variant: opaque previous-response reference
    /// carried across turns, falling back to `Chat` on transport failure.
    Responses,
}

/// LLM backend selection and generation parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AiSettings {
    /// Global AI-enabled flag. When false, AI-eligible messages are
    /// silently dropped.
    #[serde(default)]
    pub enabled: bool,

    /// Active backend variant.
    #[serde(default)]
    pub backend: Backend,

    /// API key for the LLM backend.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier (e.g. "gpt-4o-mini", "gpt-5-mini").
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature. Omitted from requests for model families
    /// that reject a temperature override.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Output-length cap, mapped to the parameter name the configured
    /// model family expects.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Reasoning effort for reasoning-model families ("low", "medium", "high").
    #[serde(default)]
    pub reasoning_effort: Option<String>,

    /// Text verbosity for model families that support it.
    #[serde(default)]
    pub verbosity: Option<String>,

    /// Maximum prior turns in the stateless variant's history window.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// API base URL, overridable for testing.
    #[serde(default = "default_ai_api_base")]
    pub api_base: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            backend: Backend::default(),
            api_key: String::new(),
            model: default_model(),
            temperature: None,
            max_output_tokens: default_max_output_tokens(),
            reasoning_effort: None,
            verbosity: None,
            history_limit: default_history_limit(),
            api_base: default_ai_api_base(),
        }
    }
}

/// Instruction material prefixed to every AI call.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromptSettings {
    /// System instruction for the model.
    #[serde(default)]
    pub system_prompt: String,

    /// Inline reference text appended to the instruction block.
    #[serde(default)]
    pub reference_text: String,

    /// Optional URL of a reference document fetched (best-effort) and
    /// inlined into the instruction block.
    #[serde(default)]
    pub reference_url: Option<String>,
}

/// Human-handover behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HandoverSettings {
    /// Comma-separated handover trigger keywords. Full-width commas are
    /// normalized before splitting.
    #[serde(default)]
    pub keywords: String,

    /// Minutes of agent silence before control reverts to AI.
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: i64,

    /// Comma-separated agent ids notified on handover.
    #[serde(default)]
    pub agent_ids: String,

    /// Fixed acknowledgement sent to the user when handover triggers.
    #[serde(default = "default_ack_message")]
    pub ack_message: String,

    /// Placeholder display name when the profile fetch fails and no
    /// nickname is stored.
    #[serde(default = "default_fallback_nickname")]
    pub fallback_nickname: String,
}

impl Default for HandoverSettings {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            timeout_minutes: default_timeout_minutes(),
            agent_ids: String::new(),
            ack_message: default_ack_message(),
            fallback_nickname: default_fallback_nickname(),
        }
    }
}

/// Messaging-channel credentials and endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSettings {
    /// Shared secret for webhook signature verification.
    #[serde(default)]
    pub channel_secret: String,

    /// Bearer token for outbound messaging API calls.
    #[serde(default)]
    pub channel_token: String,

    /// Messaging API base URL, overridable for testing.
    #[serde(default = "default_channel_api_base")]
    pub api_base: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            channel_secret: String::new(),
            channel_token: String::new(),
            api_base: default_channel_api_base(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_history_limit() -> usize {
    10
}

fn default_ai_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_timeout_minutes() -> i64 {
    30
}

fn default_ack_message() -> String {
    "A human agent will take over from here. Please hold on.".to_string()
}

fn default_fallback_nickname() -> String {
    "customer".to_string()
}

fn default_channel_api_base() -> String {
    "https://api.line.me".to_string()
}
