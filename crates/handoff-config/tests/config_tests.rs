// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Handoff configuration system.

use handoff_config::{load_and_validate_str, load_config_from_str};
use handoff_core::settings::Backend;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_handoff_config() {
    let toml = r#"
[agent]
name = "support-bot"
log_level = "debug"

[gateway]
host = "0.0.0.0"
port = 3000

[storage]
database_path = "/tmp/handoff-test.db"

[ai]
enabled = true
backend = "responses"
api_key = "sk-test-123"
model = "gpt-5-mini"
max_output_tokens = 2048
reasoning_effort = "low"
history_limit = 6

[prompt]
system_prompt = "You are a support assistant."
reference_text = "Opening hours: 9-17."
reference_url = "https://docs.example.com/faq.txt"

[handover]
keywords = "agent，human, help"
timeout_minutes = 45
agent_ids = "U111,U222"
ack_message = "Connecting you to a human."

[channel]
channel_secret = "shh"
channel_token = "tok"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "support-bot");
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 3000);
    assert_eq!(config.storage.database_path, "/tmp/handoff-test.db");
    assert!(config.ai.enabled);
    assert_eq!(config.ai.backend, Backend::Responses);
    assert_eq!(config.ai.model, "gpt-5-mini");
    assert_eq!(config.ai.history_limit, 6);
    assert_eq!(config.prompt.reference_url.as_deref(), Some("https://docs.example.com/faq.txt"));
    assert_eq!(config.handover.timeout_minutes, 45);
    assert_eq!(config.handover.agent_ids, "U111,U222");
    assert_eq!(config.channel.channel_secret, "shh");
}

/// Empty TOML falls back to compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty config should use defaults");
    assert_eq!(config.agent.name, "handoff");
    assert_eq!(config.gateway.port, 8080);
    assert!(!config.ai.enabled);
    assert_eq!(config.ai.backend, Backend::Chat);
    assert_eq!(config.handover.timeout_minutes, 30);
}

/// Unknown field in a section produces an error mentioning the bad key.
#[test]
fn unknown_field_in_handover_produces_error() {
    let toml = r#"
[handover]
keyowrds = "agent"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("keyowrds"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown backend value produces a deserialization error.
#[test]
fn unknown_backend_value_rejected() {
    let toml = r#"
[ai]
backend = "claude"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Semantic validation runs after deserialization.
#[test]
fn validation_catches_zero_timeout() {
    let toml = r#"
[handover]
timeout_minutes = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors
        .iter()
        .any(|e| e.to_string().contains("timeout_minutes")));
}

/// AI enabled without an api key fails validation with a clear message.
#[test]
fn validation_requires_api_key_when_ai_enabled() {
    let toml = r#"
[ai]
enabled = true
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(|e| e.to_string().contains("api_key")));
}

/// The full valid config also passes validation end to end.
#[test]
fn load_and_validate_accepts_minimal_config() {
    let toml = r#"
[channel]
channel_secret = "secret"
channel_token = "token"
"#;

    let config = load_and_validate_str(toml).expect("minimal config should validate");
    let settings = config.to_settings();
    assert_eq!(settings.channel.channel_secret, "secret");
}
