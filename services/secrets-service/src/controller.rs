// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Business-logic interface behind the HTTP handlers
//!
//! Handlers never decide what an operation does. They turn the request into
//! one of the input structs below, call the matching [`Controller`] method,
//! and encode whatever comes back. Controllers report failures by returning
//! one of the error models from `secrets_api` (e.g. `NotFound`) inside an
//! `anyhow::Error`; any other error is answered with a 500.

use anyhow::Result;
use async_trait::async_trait;
use dropshot::{RequestContext, ServerContext};
use serde::Serialize;
use tracing::Span;

use secrets_api::{
    App, AppList, CreateAppRequest, Health, PutSecretRequest, Secret, SecretList, SecretVersion,
    UpdateAppRequest, Uuid,
};

/// Per-request values handed to the controller with every input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Request id assigned by the HTTP server
    pub request_id: String,
    /// Name of the operation being served (the trait method name)
    pub operation_id: &'static str,
}

impl CallContext {
    pub fn new(request_id: impl Into<String>, operation_id: &'static str) -> Self {
        Self {
            request_id: request_id.into(),
            operation_id,
        }
    }

    pub fn for_request<C: ServerContext>(
        rqctx: &RequestContext<C>,
        operation_id: &'static str,
    ) -> Self {
        Self::new(rqctx.request_id.clone(), operation_id)
    }

    /// Span the controller call runs in
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "operation",
            operation = self.operation_id,
            request_id = %self.request_id,
        )
    }
}

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAppsInput {
    pub limit: usize,
    pub starting_after: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAppInput {
    pub body: CreateAppRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAppInput {
    pub app_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAppInput {
    pub app_id: Uuid,
    pub body: UpdateAppRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAppInput {
    pub app_id: Uuid,
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSecretsInput {
    pub app_id: Uuid,
    pub limit: usize,
    pub starting_after: Option<String>,
    pub include_values: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSecretsInput {
    pub app_id: Uuid,
    pub q: String,
    pub limit: usize,
    pub starting_after: Option<String>,
    pub include_values: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretInput {
    pub app_id: Uuid,
    pub key: String,
    pub version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutSecretInput {
    pub app_id: Uuid,
    pub key: String,
    pub body: PutSecretRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSecretInput {
    pub app_id: Uuid,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSecretVersionsInput {
    pub app_id: Uuid,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretVersionInput {
    pub app_id: Uuid,
    pub key: String,
    pub version: u32,
}

// ============================================================================
// Outputs
// ============================================================================

/// Result of `put_secret`; the variant picks the response status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PutSecretOutput {
    /// The key did not exist before
    Created(Secret),
    /// A new version was stored for an existing key
    Updated(Secret),
}

// ============================================================================
// Controller
// ============================================================================

/// One method per API operation
#[async_trait]
pub trait Controller: Send + Sync {
    async fn health_check(&self, call: &CallContext) -> Result<Health>;

    async fn list_apps(&self, call: &CallContext, input: ListAppsInput) -> Result<AppList>;

    async fn create_app(&self, call: &CallContext, input: CreateAppInput) -> Result<App>;

    async fn get_app(&self, call: &CallContext, input: GetAppInput) -> Result<App>;

    async fn update_app(&self, call: &CallContext, input: UpdateAppInput) -> Result<App>;

    async fn delete_app(&self, call: &CallContext, input: DeleteAppInput) -> Result<()>;

    async fn list_secrets(&self, call: &CallContext, input: ListSecretsInput)
    -> Result<SecretList>;

    async fn search_secrets(
        &self,
        call: &CallContext,
        input: SearchSecretsInput,
    ) -> Result<SecretList>;

    async fn get_secret(&self, call: &CallContext, input: GetSecretInput) -> Result<Secret>;

    async fn put_secret(&self, call: &CallContext, input: PutSecretInput)
    -> Result<PutSecretOutput>;

    async fn delete_secret(&self, call: &CallContext, input: DeleteSecretInput) -> Result<()>;

    async fn list_secret_versions(
        &self,
        call: &CallContext,
        input: ListSecretVersionsInput,
    ) -> Result<Vec<SecretVersion>>;

    async fn get_secret_version(
        &self,
        call: &CallContext,
        input: GetSecretVersionInput,
    ) -> Result<SecretVersion>;
}
