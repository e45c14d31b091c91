// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Secrets Service Library
//!
//! HTTP front end for the `SecretsApi` trait. The service itself has no
//! business logic: each handler binds the request to a typed input, calls
//! the matching [`controller::Controller`] method, and maps what comes back
//! to a status code and JSON body.
//!
//! # Modules
//!
//! - [`config`] - Command-line / environment configuration
//! - [`context`] - API context for request handlers
//! - [`controller`] - Business-logic interface and its input/output types
//! - [`handlers`] - `SecretsApi` implementation
//! - [`memory`] - In-memory controller used by the binary and tests
//! - [`respond`] - Response encoding
//! - [`server`] - Route table and server startup
//! - [`status`] - Per-operation status mapping

pub mod config;
pub mod context;
pub mod controller;
pub mod handlers;
pub mod memory;
pub mod respond;
pub mod server;
pub mod status;

pub use handlers::SecretsServiceImpl;
pub use server::{api_description, start_server};
