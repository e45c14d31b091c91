// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Secrets Service
//!
//! Serves the secrets API backed by the in-memory controller, optionally
//! preloaded from a seed file.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use secrets_service::config::{DEFAULT_LOG_FILTER, ServiceConfig};
use secrets_service::memory::{MemoryController, Seed};
use secrets_service::start_server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        ))
        .init();

    let controller = match &config.seed_file {
        Some(path) => {
            let seed = Seed::from_file(path)?;
            info!(
                seed_file = %path.display(),
                apps = seed.apps.len(),
                "Loading seed data"
            );
            MemoryController::from_seed(seed).context("Failed to load seed data")?
        }
        None => MemoryController::new(),
    };

    let server = start_server(&config, Arc::new(controller))?;

    info!(
        "Secrets service {} running on http://{}",
        env!("CARGO_PKG_VERSION"),
        server.local_addr()
    );

    server
        .await
        .map_err(|error| anyhow::anyhow!("server failed: {}", error))
}
