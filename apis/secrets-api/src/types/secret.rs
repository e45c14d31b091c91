// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Secret types

use super::common::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A secret stored under an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Secret {
    /// Secret key, unique within the app
    pub key: String,
    /// Secret value; omitted for write-only secrets and when values were not requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Version the returned value belongs to
    pub version: u32,
    /// Write-only secrets can be set but never read back
    pub write_only: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One page of secrets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SecretList {
    pub secrets: Vec<Secret>,
    /// Pass as `starting_after` to fetch the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_starting_after: Option<String>,
}

/// A historical value of a secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SecretVersion {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub created_at: Timestamp,
}

/// Request to create or replace a secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PutSecretRequest {
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub write_only: Option<bool>,
}

/// Query parameters for listing secrets
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListSecretsQuery {
    /// Maximum number of secrets to return (1-1000, default 100)
    pub limit: Option<u32>,
    /// Key of the last secret on the previous page
    pub starting_after: Option<String>,
    /// Include secret values in the response
    pub include_values: Option<bool>,
}

/// Query parameters for searching secrets
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchSecretsQuery {
    /// Case-insensitive term matched against keys and descriptions
    pub q: String,
    /// Maximum number of secrets to return (1-1000, default 100)
    pub limit: Option<u32>,
    /// Key of the last secret on the previous page
    pub starting_after: Option<String>,
    /// Include secret values in the response
    pub include_values: Option<bool>,
}

/// Query parameters for reading one secret
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSecretQuery {
    /// Version to read; the latest version when absent
    pub version: Option<u32>,
}
