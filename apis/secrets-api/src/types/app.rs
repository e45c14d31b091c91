// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! App types

use super::common::{Timestamp, Uuid};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An app owning a set of secrets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct App {
    /// App UUID
    pub id: Uuid,
    /// Unique app name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Locked apps reject changes to themselves and their secrets
    pub locked: bool,
    /// Number of secrets currently stored for the app
    pub secret_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One page of apps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AppList {
    pub apps: Vec<App>,
    /// Pass as `starting_after` to fetch the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_starting_after: Option<String>,
}

/// Request to create an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreateAppRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub locked: bool,
}

/// Request to update an app; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAppRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub locked: Option<bool>,
}

/// Query parameters for listing apps
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListAppsQuery {
    /// Maximum number of apps to return (1-1000, default 100)
    pub limit: Option<u32>,
    /// Name of the last app on the previous page
    pub starting_after: Option<String>,
}

/// Query parameters for deleting an app
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteAppQuery {
    /// Delete the app even if it still has secrets
    pub force: Option<bool>,
}
