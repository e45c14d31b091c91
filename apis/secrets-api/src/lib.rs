// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Dropshot API trait for the app secrets service.
//!
//! The secrets service stores named secrets under apps. The trait below is
//! the complete route table: every operation is one method, bound to an HTTP
//! method and path template by its `#[endpoint]` attribute.
//!
//! Endpoints answer with a raw `Response<Body>` because the status code is
//! picked per call from the type of the value or error the service produced
//! (for example `put_secret` answers 201 for a new key and 200 for a
//! replaced one). The documented status codes for each endpoint are listed
//! on the method.
//!
//! Error bodies always decode as [`ErrorBody`].

use dropshot::{Body, HttpError, Path, Query, RequestContext, TypedBody};
use http::Response;

pub mod types;
pub use types::*;

/// Secrets API
#[dropshot::api_description]
pub trait SecretsApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    // ========================================================================
    // System
    // ========================================================================

    /// Health check
    ///
    /// 200: [`Health`]
    #[endpoint {
        method = GET,
        path = "/v1/health",
        tags = ["system"],
    }]
    async fn health_check(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<Response<Body>, HttpError>;

    // ========================================================================
    // Apps
    // ========================================================================

    /// List apps
    ///
    /// Apps are ordered by name.
    ///
    /// 200: [`AppList`]; 400: bad `limit` or unknown `starting_after`
    #[endpoint {
        method = GET,
        path = "/v1/apps",
        tags = ["apps"],
    }]
    async fn list_apps(
        rqctx: RequestContext<Self::Context>,
        query: Query<ListAppsQuery>,
    ) -> Result<Response<Body>, HttpError>;

    /// Create an app
    ///
    /// 201: [`App`]; 400: invalid request; 409: name already taken
    #[endpoint {
        method = POST,
        path = "/v1/apps",
        tags = ["apps"],
    }]
    async fn create_app(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<CreateAppRequest>,
    ) -> Result<Response<Body>, HttpError>;

    /// Get an app
    ///
    /// 200: [`App`]; 404: no such app
    #[endpoint {
        method = GET,
        path = "/v1/apps/{app_id}",
        tags = ["apps"],
    }]
    async fn get_app(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
    ) -> Result<Response<Body>, HttpError>;

    /// Update an app
    ///
    /// 200: [`App`]; 400: invalid request; 403: app is locked; 404: no such app
    #[endpoint {
        method = PATCH,
        path = "/v1/apps/{app_id}",
        tags = ["apps"],
    }]
    async fn update_app(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        body: TypedBody<UpdateAppRequest>,
    ) -> Result<Response<Body>, HttpError>;

    /// Delete an app
    ///
    /// An app that still has secrets is only deleted with `force=true`.
    ///
    /// 204; 403: app is locked or not empty; 404: no such app
    #[endpoint {
        method = DELETE,
        path = "/v1/apps/{app_id}",
        tags = ["apps"],
    }]
    async fn delete_app(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        query: Query<DeleteAppQuery>,
    ) -> Result<Response<Body>, HttpError>;

    // ========================================================================
    // Secrets
    // ========================================================================

    /// List an app's secrets
    ///
    /// Secrets are ordered by key. Values are only included with
    /// `include_values=true`, and never for write-only secrets.
    ///
    /// 200: [`SecretList`]; 400: bad paging parameters; 404: no such app
    #[endpoint {
        method = GET,
        path = "/v1/apps/{app_id}/secrets",
        tags = ["secrets"],
    }]
    async fn list_secrets(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        query: Query<ListSecretsQuery>,
    ) -> Result<Response<Body>, HttpError>;

    /// Search an app's secrets
    ///
    /// 200: [`SecretList`]; 400: missing or empty `q`; 404: no such app
    #[endpoint {
        method = GET,
        path = "/v1/apps/{app_id}/search",
        tags = ["secrets"],
    }]
    async fn search_secrets(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        query: Query<SearchSecretsQuery>,
    ) -> Result<Response<Body>, HttpError>;

    /// Get a secret
    ///
    /// 200: [`Secret`]; 403: secret is write-only; 404: no such app, secret or version
    #[endpoint {
        method = GET,
        path = "/v1/apps/{app_id}/secrets/{key}",
        tags = ["secrets"],
    }]
    async fn get_secret(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
        query: Query<GetSecretQuery>,
    ) -> Result<Response<Body>, HttpError>;

    /// Create or replace a secret
    ///
    /// 201: [`Secret`] (new key); 200: [`Secret`] (new version of an existing
    /// key); 400: empty value; 403: app is locked; 404: no such app;
    /// 422: invalid key or oversized value
    #[endpoint {
        method = PUT,
        path = "/v1/apps/{app_id}/secrets/{key}",
        tags = ["secrets"],
    }]
    async fn put_secret(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
        body: TypedBody<PutSecretRequest>,
    ) -> Result<Response<Body>, HttpError>;

    /// Delete a secret and its history
    ///
    /// 204; 403: app is locked; 404: no such app or secret
    #[endpoint {
        method = DELETE,
        path = "/v1/apps/{app_id}/secrets/{key}",
        tags = ["secrets"],
    }]
    async fn delete_secret(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
    ) -> Result<Response<Body>, HttpError>;

    /// List the versions of a secret, newest first
    ///
    /// 200: list of [`SecretVersion`]; 404: no such app or secret
    #[endpoint {
        method = GET,
        path = "/v1/apps/{app_id}/secrets/{key}/versions",
        tags = ["secrets"],
    }]
    async fn list_secret_versions(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
    ) -> Result<Response<Body>, HttpError>;

    /// Get one version of a secret
    ///
    /// 200: [`SecretVersion`]; 404: no such app, secret or version
    #[endpoint {
        method = GET,
        path = "/v1/apps/{app_id}/secrets/{key}/versions/{version}",
        tags = ["secrets"],
    }]
    async fn get_secret_version(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretVersionPath>,
    ) -> Result<Response<Body>, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_operation() {
        let api = secrets_api_mod::stub_api_description().expect("stub api description");
        let spec = api
            .openapi("Secrets API", semver::Version::new(1, 0, 0))
            .json()
            .expect("openapi json");

        let expected = [
            ("/v1/health", "get", "health_check"),
            ("/v1/apps", "get", "list_apps"),
            ("/v1/apps", "post", "create_app"),
            ("/v1/apps/{app_id}", "get", "get_app"),
            ("/v1/apps/{app_id}", "patch", "update_app"),
            ("/v1/apps/{app_id}", "delete", "delete_app"),
            ("/v1/apps/{app_id}/secrets", "get", "list_secrets"),
            ("/v1/apps/{app_id}/search", "get", "search_secrets"),
            ("/v1/apps/{app_id}/secrets/{key}", "get", "get_secret"),
            ("/v1/apps/{app_id}/secrets/{key}", "put", "put_secret"),
            ("/v1/apps/{app_id}/secrets/{key}", "delete", "delete_secret"),
            (
                "/v1/apps/{app_id}/secrets/{key}/versions",
                "get",
                "list_secret_versions",
            ),
            (
                "/v1/apps/{app_id}/secrets/{key}/versions/{version}",
                "get",
                "get_secret_version",
            ),
        ];

        for (path, method, operation_id) in expected {
            assert_eq!(
                spec["paths"][path][method]["operationId"], operation_id,
                "{} {}",
                method, path
            );
        }
    }

    #[test]
    fn test_put_secret_request_defaults() {
        let body: PutSecretRequest = serde_json::from_str(r#"{"value": "hunter2"}"#).unwrap();
        assert_eq!(
            body,
            PutSecretRequest {
                value: "hunter2".to_string(),
                description: None,
                write_only: None,
            }
        );
    }

    #[test]
    fn test_secret_omits_missing_value() {
        let created_at = "2026-01-02T03:04:05Z".parse().unwrap();
        let secret = Secret {
            key: "DB_PASSWORD".to_string(),
            value: None,
            description: None,
            version: 3,
            write_only: true,
            created_at,
            updated_at: created_at,
        };
        let json = serde_json::to_value(&secret).unwrap();
        assert!(json.get("value").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["version"], 3);
        assert_eq!(json["created_at"], "2026-01-02T03:04:05Z");
    }
}
