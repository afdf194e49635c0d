// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the stateless-history Chat Completions variant.

use std::time::Duration;

use handoff_core::HandoffError;
use handoff_core::settings::AiSettings;

use crate::types::{
    ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse, is_reasoning_family,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat Completions client. Credentials and base URL arrive with the
/// settings on every call, so a hot-swapped API key takes effect on the
/// next message.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_override: Option<String>,
}

impl ChatClient {
    pub fn new() -> Result<Self, HandoffError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HandoffError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            base_override: None,
        })
    }

    /// Test-only constructor that pins the endpoint to a mock server.
    #[cfg(test)]
    pub(crate) fn with_base_url(base_url: &str) -> Self {
        let mut client = Self::new().unwrap();
        client.base_override = Some(base_url.to_string());
        client
    }

    fn base<'a>(&'a self, ai: &'a AiSettings) -> &'a str {
        self.base_override
            .as_deref()
            .unwrap_or(&ai.api_base)
            .trim_end_matches('/')
    }

    /// Sends the assembled conversation and returns the model's text.
    pub async fn complete(
        &self,
        ai: &AiSettings,
        messages: Vec<ChatMessage>,
    ) -> Result<String, HandoffError> {
        let url = format!("{}/v1/chat/completions", self.base(ai));
        let request = build_request(ai, messages);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&ai.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| HandoffError::Provider {
                message: format!("chat request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error("chat", status, &body));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| HandoffError::Provider {
            message: format!("failed to parse chat response: {e}"),
            source: Some(Box::new(e)),
        })?;

        parsed.text().ok_or_else(|| HandoffError::Provider {
            message: "model returned an empty reply".to_string(),
            source: None,
        })
    }
}

/// Shapes generation parameters for the configured model family.
pub(crate) fn build_request(ai: &AiSettings, messages: Vec<ChatMessage>) -> ChatRequest {
    if is_reasoning_family(&ai.model) {
        ChatRequest {
            model: ai.model.clone(),
            messages,
            temperature: None,
            max_tokens: None,
            max_completion_tokens: Some(ai.max_output_tokens),
        }
    } else {
        ChatRequest {
            model: ai.model.clone(),
            messages,
            temperature: ai.temperature,
            max_tokens: Some(ai.max_output_tokens),
            max_completion_tokens: None,
        }
    }
}

/// Turns a non-2xx endpoint response into a provider error, preferring
/// the structured error body when one is present.
pub(crate) fn api_error(endpoint: &str, status: reqwest::StatusCode, body: &str) -> HandoffError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => HandoffError::Provider {
            message: format!(
                "{endpoint} API error ({}): {}",
                parsed.error.type_, parsed.error.message
            ),
            source: None,
        },
        Err(_) => HandoffError::Provider {
            message: format!("{endpoint} API returned {status}: {body}"),
            source: None,
        },
    }
}
