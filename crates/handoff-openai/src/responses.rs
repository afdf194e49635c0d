// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the continuation-style Responses variant.
//!
//! Transport failures are reported separately from endpoint failures so
//! the responder can fall back to the stateless variant only when the
//! endpoint was never reached.

use std::time::Duration;

use handoff_core::HandoffError;
use handoff_core::settings::AiSettings;
use handoff_core::types::AiReply;

use crate::chat::api_error;
use crate::types::{
    ReasoningParams, ResponsesRequest, ResponsesResponse, TextParams, is_reasoning_family,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// How a Responses call failed.
#[derive(Debug)]
pub enum ResponsesCallError {
    /// The endpoint was never reached (connect, DNS, timeout). Eligible
    /// for fallback to the stateless variant.
    Transport(reqwest::Error),
    /// The endpoint answered and rejected the call, or sent an unusable
    /// body. Not eligible for fallback.
    Api(HandoffError),
}

/// Responses API client.
#[derive(Debug, Clone)]
pub struct ResponsesClient {
    http: reqwest::Client,
    base_override: Option<String>,
}

impl ResponsesClient {
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

    /// Sends the new message with its continuation reference and returns
    /// the reply plus the new reference to persist.
    pub async fn create(
        &self,
        ai: &AiSettings,
        instructions: Option<String>,
        input: &str,
        previous_response_id: Option<&str>,
    ) -> Result<AiReply, ResponsesCallError> {
        let url = format!("{}/v1/responses", self.base(ai));
        let request = build_request(ai, instructions, input, previous_response_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&ai.api_key)
            .json(&request)
            .send()
            .await
            .map_err(ResponsesCallError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResponsesCallError::Api(api_error(
                "responses", status, &body,
            )));
        }

        let parsed: ResponsesResponse = response.json().await.map_err(|e| {
            ResponsesCallError::Api(HandoffError::Provider {
                message: format!("failed to parse responses body: {e}"),
                source: Some(Box::new(e)),
            })
        })?;

        let text = parsed.text().ok_or_else(|| {
            ResponsesCallError::Api(HandoffError::Provider {
                message: "model returned an empty reply".to_string(),
                source: None,
            })
        })?;

        Ok(AiReply {
            text,
            response_id: Some(parsed.id),
        })
    }
}

/// Shapes generation parameters for the configured model family.
pub(crate) fn build_request(
    ai: &AiSettings,
    instructions: Option<String>,
    input: &str,
    previous_response_id: Option<&str>,
) -> ResponsesRequest {
    let reasoning = is_reasoning_family(&ai.model);
    ResponsesRequest {
        model: ai.model.clone(),
        input: input.to_string(),
        instructions,
        previous_response_id: previous_response_id.map(str::to_string),
        max_output_tokens: Some(ai.max_output_tokens),
        temperature: if reasoning { None } else { ai.temperature },
        reasoning: if reasoning {
            ai.reasoning_effort
                .clone()
                .map(|effort| ReasoningParams { effort })
        } else {
            None
        },
        text: if reasoning {
            ai.verbosity.clone().map(|verbosity| TextParams { verbosity })
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ai_settings(model: &str) -> AiSettings {
        AiSettings {
            enabled: true,
            api_key: "sk-test".into(),
            model: model.into(),
            temperature: Some(0.3),
            max_output_tokens: 256,
            reasoning_effort: Some("low".into()),
            verbosity: Some("medium".into()),
            ..AiSettings::default()
        }
    }

    #[test]
    fn reasoning_family_gets_effort_and_verbosity() {
        let req = build_request(&ai_settings("gpt-5-mini"), None, "hi", None);
        assert_eq!(req.temperature, None);
        assert_eq!(req.reasoning.as_ref().unwrap().effort, "low");
        assert_eq!(req.text.as_ref().unwrap().verbosity, "medium");
        assert_eq!(req.max_output_tokens, Some(256));
    }

    #[test]
    fn standard_family_keeps_temperature_and_skips_knobs() {
        let req = build_request(&ai_settings("gpt-4o-mini"), None, "hi", Some("resp-0"));
        assert_eq!(req.temperature, Some(0.3));
        assert!(req.reasoning.is_none());
        assert!(req.text.is_none());
        assert_eq!(req.previous_response_id.as_deref(), Some("resp-0"));
    }

    #[tokio::test]
    async fn create_forwards_continuation_reference() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .and(body_partial_json(serde_json::json!({
                "input": "next question",
                "previous_response_id": "resp-1",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "resp-2",
                "output": [{
                    "type": "message",
                    "content": [{ "type": "output_text", "text": "answer" }],
                }],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResponsesClient::with_base_url(&server.uri());
        let reply = client
            .create(&ai_settings("gpt-4o-mini"), None, "next question", Some("resp-1"))
            .await
            .unwrap();
        assert_eq!(reply.text, "answer");
        assert_eq!(reply.response_id.as_deref(), Some("resp-2"));
    }

    #[tokio::test]
    async fn endpoint_rejection_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Unknown parameter", "type": "invalid_request_error" },
            })))
            .mount(&server)
            .await;

        let client = ResponsesClient::with_base_url(&server.uri());
        let err = client
            .create(&ai_settings("gpt-4o-mini"), None, "hi", None)
            .await
            .unwrap_err();
        match err {
            ResponsesCallError::Api(e) => assert!(e.to_string().contains("Unknown parameter")),
            ResponsesCallError::Transport(_) => panic!("expected an API error"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Nothing listens on this port.
        let client = ResponsesClient::with_base_url("http://127.0.0.1:1");
        let err = client
            .create(&ai_settings("gpt-4o-mini"), None, "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ResponsesCallError::Transport(_)));
    }
}
