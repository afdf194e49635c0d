// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive timeouts and well-formed URLs.

use crate::diagnostic::ConfigError;
use crate::model::HandoffConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HandoffConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate bind address
    let addr = config.gateway.host.trim();
    if addr.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate handover timing
    if config.handover.timeout_minutes < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "handover.timeout_minutes must be at least 1, got {}",
                config.handover.timeout_minutes
            ),
        });
    }

    // Validate AI generation parameters
    if let Some(temp) = config.ai.temperature
        && !(0.0..=2.0).contains(&temp)
    {
        errors.push(ConfigError::Validation {
            message: format!("ai.temperature must be between 0.0 and 2.0, got {temp}"),
        });
    }

    if config.ai.max_output_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "ai.max_output_tokens must be greater than 0".to_string(),
        });
    }

    if config.ai.history_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "ai.history_limit must be greater than 0".to_string(),
        });
    }

    if let Some(ref effort) = config.ai.reasoning_effort
        && !matches!(effort.as_str(), "minimal" | "low" | "medium" | "high")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "ai.reasoning_effort must be one of minimal/low/medium/high, got `{effort}`"
            ),
        });
    }

    // AI enabled requires a key
    if config.ai.enabled && config.ai.api_key.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "ai.enabled is true but ai.api_key is empty".to_string(),
        });
    }

    // Validate reference URL scheme
    if let Some(ref url) = config.prompt.reference_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        errors.push(ConfigError::Validation {
            message: format!("prompt.reference_url must be an http(s) URL, got `{url}`"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
