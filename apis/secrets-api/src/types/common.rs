// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Path parameters and shared types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// UUID type
pub type Uuid = uuid::Uuid;

/// RFC3339 timestamp
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Page size used when a list request does not carry `limit`
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Largest accepted `limit` on list endpoints
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Service health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Health {
    /// "ok" when the service can answer requests
    pub status: String,
    /// Service version
    pub version: String,
}

/// Path parameter for app operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AppPath {
    /// App UUID
    pub app_id: Uuid,
}

/// Path parameters for secret operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SecretPath {
    /// App UUID
    pub app_id: Uuid,
    /// Secret key
    pub key: String,
}

/// Path parameters for a single secret version
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SecretVersionPath {
    /// App UUID
    pub app_id: Uuid,
    /// Secret key
    pub key: String,
    /// Version number (starts at 1)
    pub version: u32,
}
