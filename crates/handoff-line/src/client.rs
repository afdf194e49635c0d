// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the messaging platform's outbound API.
//!
//! Implements [`ChannelClient`] over the reply / push / profile endpoints
//! with bearer-token auth. Reply delivery is fire-once: failures are
//! reported to the caller but never retried here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use handoff_core::settings::ChannelSettings;
use handoff_core::{ChannelClient, HandoffError};

/// Platform limit on a single text message.
const MAX_TEXT_LEN: usize = 5000;

/// Messaging platform API client.
#[derive(Debug, Clone)]
pub struct LineClient {
    http: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

impl LineClient {
    /// Creates a client from channel settings.
    pub fn new(settings: &ChannelSettings) -> Result<Self, HandoffError> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", settings.channel_token);
        headers.insert(
            "authorization",
            HeaderValue::from_str(&auth).map_err(|e| {
                HandoffError::Config(format!("invalid channel token header value: {e}"))
            })?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| HandoffError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn post_message(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<(), HandoffError> {
        let url = format!("{}{path}", self.api_base);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| HandoffError::Channel {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(%url, "message delivered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(HandoffError::Channel {
            message: format!("messaging API returned {status}: {body}"),
            source: None,
        })
    }
}

/// Clip text to the platform's per-message limit at a char boundary.
fn clip(text: &str) -> &str {
    match text.char_indices().nth(MAX_TEXT_LEN) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl ChannelClient for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), HandoffError> {
        self.post_message(
            "/v2/bot/message/reply",
            serde_json::json!({
                "replyToken": reply_token,
                "messages": [{ "type": "text", "text": clip(text) }],
            }),
        )
        .await
    }

    async fn push(&self, to: &str, text: &str) -> Result<(), HandoffError> {
        self.post_message(
            "/v2/bot/message/push",
            serde_json::json!({
                "to": to,
                "messages": [{ "type": "text", "text": clip(text) }],
            }),
        )
        .await
    }

    async fn profile_name(&self, user_id: &str) -> Result<Option<String>, HandoffError> {
        let url = format!("{}/v2/bot/profile/{user_id}", self.api_base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HandoffError::Channel {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HandoffError::Channel {
                message: format!("profile fetch returned {status}: {body}"),
                source: None,
            });
        }

        let profile: ProfileResponse =
            response.json().await.map_err(|e| HandoffError::Channel {
                message: format!("failed to parse profile response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(profile.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> LineClient {
        LineClient::new(&ChannelSettings {
            channel_secret: "secret".into(),
            channel_token: "test-token".into(),
            api_base: base_url.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn clip_respects_char_boundaries() {
        let long = "あ".repeat(MAX_TEXT_LEN + 10);
        assert_eq!(clip(&long).chars().count(), MAX_TEXT_LEN);
        assert_eq!(clip("short"), "short");
    }

    #[tokio::test]
    async fn reply_posts_token_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_partial_json(serde_json::json!({
                "replyToken": "rt-1",
                "messages": [{ "type": "text", "text": "hello" }],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.reply("rt-1", "hello").await.unwrap();
    }

    #[tokio::test]
    async fn push_failure_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/push"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "message": "invalid to" })),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.push("U-bad", "hi").await.unwrap_err();
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn profile_name_extracts_display_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/bot/profile/U123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "displayName": "Alice",
                "userId": "U123",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let name = client.profile_name("U123").await.unwrap();
        assert_eq!(name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn profile_fetch_404_is_an_error_for_the_caller() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/bot/profile/U404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.profile_name("U404").await.is_err());
    }
}
