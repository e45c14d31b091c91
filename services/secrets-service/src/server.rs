// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Router construction and server startup

use std::sync::Arc;

use anyhow::Result;
use dropshot::{ApiDescription, HttpServer, HttpServerStarter};

use crate::config::ServiceConfig;
use crate::context::ApiContext;
use crate::controller::Controller;
use crate::handlers::SecretsServiceImpl;

/// Build the route table from the `SecretsApi` trait
pub fn api_description() -> Result<ApiDescription<ApiContext>> {
    secrets_api::secrets_api_mod::api_description::<SecretsServiceImpl>()
        .map_err(|e| anyhow::anyhow!("Failed to create API description: {}", e))
}

/// Start serving the API with `controller` behind it
pub fn start_server(
    config: &ServiceConfig,
    controller: Arc<dyn Controller>,
) -> Result<HttpServer<ApiContext>> {
    let api = api_description()?;

    let log = config
        .logging()
        .to_logger("secrets-service")
        .map_err(|error| anyhow::anyhow!("failed to create logger: {}", error))?;

    let server = HttpServerStarter::new(&config.dropshot(), api, ApiContext::new(controller), &log)
        .map_err(|error| anyhow::anyhow!("failed to create server: {}", error))?
        .start();

    Ok(server)
}
