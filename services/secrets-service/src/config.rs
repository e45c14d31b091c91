// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Service configuration
//!
//! Every setting can be given as a command-line flag or through the
//! environment variable named next to it.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dropshot::{ConfigDropshot, ConfigLogging, ConfigLoggingLevel, HandlerTaskMode};

/// Default bind address for the HTTP server.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Default maximum request body size (bytes).
pub const DEFAULT_BODY_MAX_BYTES: usize = 1024 * 1024; // 1MB

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "secrets_service=info,dropshot=info";

/// Level for Dropshot's own request log
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl From<LogLevel> for ConfigLoggingLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => ConfigLoggingLevel::Trace,
            LogLevel::Debug => ConfigLoggingLevel::Debug,
            LogLevel::Info => ConfigLoggingLevel::Info,
            LogLevel::Warn => ConfigLoggingLevel::Warn,
            LogLevel::Error => ConfigLoggingLevel::Error,
            LogLevel::Critical => ConfigLoggingLevel::Critical,
        }
    }
}

/// Secrets service configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "secrets-service", version)]
#[command(about = "HTTP service for app secrets", long_about = None)]
pub struct ServiceConfig {
    /// Server bind address
    #[arg(long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: SocketAddr,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "REQUEST_BODY_MAX_BYTES", default_value_t = DEFAULT_BODY_MAX_BYTES)]
    pub request_body_max_bytes: usize,

    /// Level for the HTTP server's request log
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// JSON file of apps and secrets to preload
    #[arg(long, env = "SEED_FILE")]
    pub seed_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Configuration for tests and embedding: ephemeral port, quiet log
    pub fn ephemeral() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
            request_body_max_bytes: DEFAULT_BODY_MAX_BYTES,
            log_level: LogLevel::Error,
            seed_file: None,
        }
    }

    pub fn dropshot(&self) -> ConfigDropshot {
        ConfigDropshot {
            bind_address: self.bind_address,
            default_request_body_max_bytes: self.request_body_max_bytes,
            default_handler_task_mode: HandlerTaskMode::Detached,
            ..Default::default()
        }
    }

    pub fn logging(&self) -> ConfigLogging {
        ConfigLogging::StderrTerminal {
            level: self.log_level.into(),
        }
    }
}
