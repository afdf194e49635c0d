// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook gateway.
//!
//! The webhook endpoint authenticates the raw body before parsing it:
//! settings fetch failure is 500 (no events processed), a bad or missing
//! signature is 401, an unparseable body is 400. Once the batch loop
//! starts the answer is always `200 OK`; per-event failures are logged
//! and never abort the remaining events.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};

use handoff_line::events::{WebhookEvent, WebhookPayload};
use handoff_line::signature;

use crate::server::GatewayState;

/// Header carrying the base64 HMAC-SHA256 of the raw body.
const SIGNATURE_HEADER: &str = "x-signature";

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /webhook
///
/// Verifies the platform signature over the raw bytes, then runs every
/// extractable text event through the pipeline in arrival order.
pub async fn post_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let settings = match state.settings.fetch().await {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "settings fetch failed, rejecting webhook batch");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !signature::verify(&settings.channel.channel_secret, &body, provided) {
        warn!("webhook signature verification failed");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "unparseable webhook body");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    for event in payload.events.iter().filter_map(WebhookEvent::to_inbound) {
        match state
            .engine
            .handle_event(&settings, &event, Utc::now())
            .await
        {
            Ok(outcome) => debug!(event_id = %event.event_id, ?outcome, "event processed"),
            Err(e) => {
                warn!(event_id = %event.event_id, error = %e, "event processing failed");
            }
        }
    }

    (StatusCode::OK, "OK").into_response()
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
