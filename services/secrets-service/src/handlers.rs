// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP handlers
//!
//! Every handler follows the same steps: Dropshot has already extracted the
//! path, query and body (answering 400 itself when that fails), the handler
//! checks what the types cannot express, builds the controller input, and
//! hands the call to [`dispatch`].

use std::future::Future;

use anyhow::Result;
use dropshot::{Body, HttpError, Path, Query, RequestContext, TypedBody};
use http::{Response, StatusCode};
use secrets_api::{
    AppPath, CreateAppRequest, DEFAULT_PAGE_LIMIT, DeleteAppQuery, GetSecretQuery, ListAppsQuery,
    ListSecretsQuery, MAX_PAGE_LIMIT, PutSecretRequest, SearchSecretsQuery, SecretPath,
    SecretVersionPath, SecretsApi, UpdateAppRequest,
};
use serde::Serialize;
use tracing::Instrument;

use crate::context::ApiContext;
use crate::controller::{
    CallContext, CreateAppInput, DeleteAppInput, DeleteSecretInput, GetAppInput, GetSecretInput,
    GetSecretVersionInput, ListAppsInput, ListSecretVersionsInput, ListSecretsInput,
    PutSecretInput, SearchSecretsInput, UpdateAppInput,
};
use crate::respond::{encode, error_body};
use crate::status;

/// Secrets API implementation
///
/// This enum serves as the implementation type for the `SecretsApi` trait.
/// It contains no data - all state is behind the controller in `ApiContext`.
pub enum SecretsServiceImpl {}

/// Run one controller call and encode its result
///
/// The call runs inside the operation's span, and its outcome is logged
/// there once the status is known.
pub async fn dispatch<T, F>(
    call: &CallContext,
    controller_call: F,
    status_for: fn(&Result<T>) -> StatusCode,
) -> Result<Response<Body>, HttpError>
where
    T: Serialize,
    F: Future<Output = Result<T>>,
{
    let span = call.span();
    let result = controller_call.instrument(span.clone()).await;
    let status = status_for(&result);
    let result = result.map_err(|err| error_body(call, &err, status));

    span.in_scope(|| match &result {
        Ok(_) => tracing::info!(status = status.as_u16(), "request completed"),
        Err(body) => {
            if status.is_server_error() {
                tracing::error!(
                    status = status.as_u16(),
                    error_code = ?body.error_code,
                    error = %body.message,
                    "request failed"
                );
            } else {
                tracing::warn!(
                    status = status.as_u16(),
                    error_code = ?body.error_code,
                    error = %body.message,
                    "request rejected"
                );
            }
        }
    });

    encode(result, status)
}

/// Resolve an optional `limit` query parameter to a page size
fn page_limit(limit: Option<u32>) -> Result<usize, HttpError> {
    match limit.unwrap_or(DEFAULT_PAGE_LIMIT) {
        0 => Err(bad_request("limit must be at least 1")),
        n if n > MAX_PAGE_LIMIT => Err(bad_request(format!(
            "limit must be at most {}",
            MAX_PAGE_LIMIT
        ))),
        n => Ok(n as usize),
    }
}

fn bad_request(message: impl Into<String>) -> HttpError {
    HttpError::for_bad_request(Some("BadRequest".to_string()), message.into())
}

impl SecretsApi for SecretsServiceImpl {
    type Context = ApiContext;

    async fn health_check(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "health_check");
        let controller = rqctx.context().controller();

        dispatch(&call, controller.health_check(&call), status::health_check).await
    }

    async fn list_apps(
        rqctx: RequestContext<Self::Context>,
        query: Query<ListAppsQuery>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "list_apps");
        let query = query.into_inner();
        let input = ListAppsInput {
            limit: page_limit(query.limit)?,
            starting_after: query.starting_after,
        };
        let controller = rqctx.context().controller();

        dispatch(&call, controller.list_apps(&call, input), status::list_apps).await
    }

    async fn create_app(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<CreateAppRequest>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "create_app");
        let input = CreateAppInput {
            body: body.into_inner(),
        };
        let controller = rqctx.context().controller();

        dispatch(&call, controller.create_app(&call, input), status::create_app).await
    }

    async fn get_app(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "get_app");
        let input = GetAppInput {
            app_id: path.into_inner().app_id,
        };
        let controller = rqctx.context().controller();

        dispatch(&call, controller.get_app(&call, input), status::get_app).await
    }

    async fn update_app(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        body: TypedBody<UpdateAppRequest>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "update_app");
        let input = UpdateAppInput {
            app_id: path.into_inner().app_id,
            body: body.into_inner(),
        };
        let controller = rqctx.context().controller();

        dispatch(&call, controller.update_app(&call, input), status::update_app).await
    }

    async fn delete_app(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        query: Query<DeleteAppQuery>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "delete_app");
        let input = DeleteAppInput {
            app_id: path.into_inner().app_id,
            force: query.into_inner().force.unwrap_or(false),
        };
        let controller = rqctx.context().controller();

        dispatch(&call, controller.delete_app(&call, input), status::delete_app).await
    }

    async fn list_secrets(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        query: Query<ListSecretsQuery>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "list_secrets");
        let query = query.into_inner();
        let input = ListSecretsInput {
            app_id: path.into_inner().app_id,
            limit: page_limit(query.limit)?,
            starting_after: query.starting_after,
            include_values: query.include_values.unwrap_or(false),
        };
        let controller = rqctx.context().controller();

        dispatch(
            &call,
            controller.list_secrets(&call, input),
            status::list_secrets,
        )
        .await
    }

    async fn search_secrets(
        rqctx: RequestContext<Self::Context>,
        path: Path<AppPath>,
        query: Query<SearchSecretsQuery>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "search_secrets");
        let query = query.into_inner();

        let q = query.q.trim();
        if q.is_empty() {
            return Err(bad_request("search term q must not be empty"));
        }

        let input = SearchSecretsInput {
            app_id: path.into_inner().app_id,
            q: q.to_string(),
            limit: page_limit(query.limit)?,
            starting_after: query.starting_after,
            include_values: query.include_values.unwrap_or(false),
        };
        let controller = rqctx.context().controller();

        dispatch(
            &call,
            controller.search_secrets(&call, input),
            status::search_secrets,
        )
        .await
    }

    async fn get_secret(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
        query: Query<GetSecretQuery>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "get_secret");
        let path = path.into_inner();
        let input = GetSecretInput {
            app_id: path.app_id,
            key: path.key,
            version: query.into_inner().version,
        };
        let controller = rqctx.context().controller();

        dispatch(&call, controller.get_secret(&call, input), status::get_secret).await
    }

    async fn put_secret(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
        body: TypedBody<PutSecretRequest>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "put_secret");
        let path = path.into_inner();
        let input = PutSecretInput {
            app_id: path.app_id,
            key: path.key,
            body: body.into_inner(),
        };
        let controller = rqctx.context().controller();

        dispatch(&call, controller.put_secret(&call, input), status::put_secret).await
    }

    async fn delete_secret(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "delete_secret");
        let path = path.into_inner();
        let input = DeleteSecretInput {
            app_id: path.app_id,
            key: path.key,
        };
        let controller = rqctx.context().controller();

        dispatch(
            &call,
            controller.delete_secret(&call, input),
            status::delete_secret,
        )
        .await
    }

    async fn list_secret_versions(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretPath>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "list_secret_versions");
        let path = path.into_inner();
        let input = ListSecretVersionsInput {
            app_id: path.app_id,
            key: path.key,
        };
        let controller = rqctx.context().controller();

        dispatch(
            &call,
            controller.list_secret_versions(&call, input),
            status::list_secret_versions,
        )
        .await
    }

    async fn get_secret_version(
        rqctx: RequestContext<Self::Context>,
        path: Path<SecretVersionPath>,
    ) -> Result<Response<Body>, HttpError> {
        let call = CallContext::for_request(&rqctx, "get_secret_version");
        let path = path.into_inner();
        let input = GetSecretVersionInput {
            app_id: path.app_id,
            key: path.key,
            version: path.version,
        };
        let controller = rqctx.context().controller();

        dispatch(
            &call,
            controller.get_secret_version(&call, input),
            status::get_secret_version,
        )
        .await
    }
}
