// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `serve` subcommand: wires storage, adapters, the pipeline, and
//! the webhook server together and runs until shutdown.

use std::sync::Arc;

use tracing::info;

use handoff_config::{HandoffConfig, SettingsHandle};
use handoff_core::HandoffError;
use handoff_engine::Engine;
use handoff_gateway::{GatewayState, ServerConfig, start_server};
use handoff_line::LineClient;
use handoff_openai::OpenAiResponder;
use handoff_storage::Database;

pub async fn run(config: HandoffConfig) -> Result<(), HandoffError> {
    let db = Database::open(&config.storage.database_path).await?;
    info!(path = %config.storage.database_path, "database opened");

    let settings = config.to_settings();
    let channel = Arc::new(LineClient::new(&settings.channel)?);
    let responder = Arc::new(OpenAiResponder::new()?);
    let engine = Arc::new(Engine::new(db, channel, responder));

    let handle = Arc::new(SettingsHandle::new(&config));
    let state = GatewayState::new(handle, engine);

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    start_server(&server_config, state).await
}
