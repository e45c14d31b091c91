// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Response encoding

use anyhow::{Error, Result};
use dropshot::{Body, HttpError};
use http::{Response, StatusCode, header};
use secrets_api::{ErrorBody, ErrorModel, InternalError};
use serde::Serialize;

use crate::controller::CallContext;
use crate::status::ErrorKind;

/// Encode a controller result as an HTTP response with the given status
///
/// 204 responses have no body. Other successes carry the JSON value;
/// errors carry their [`ErrorBody`], built with [`error_body`].
pub fn encode<T: Serialize>(
    result: Result<T, ErrorBody>,
    status: StatusCode,
) -> Result<Response<Body>, HttpError> {
    match result {
        Ok(_) if status == StatusCode::NO_CONTENT => Response::builder()
            .status(status)
            .body(Body::empty())
            .map_err(|e| HttpError::for_internal_error(format!("failed to build response: {}", e))),
        Ok(value) => json_response(status, &value),
        Err(body) => json_response(status, &body),
    }
}

/// Build the error body for `err` answered with `status`
pub fn error_body(call: &CallContext, err: &Error, status: StatusCode) -> ErrorBody {
    let kind = ErrorKind::of(err).filter(|kind| kind.status() == status);

    let (error_code, message) = match kind {
        Some(kind) => (
            kind.error_code(),
            kind.message(err)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
        ),
        // Unrecognized errors keep their full context chain
        None => (InternalError::ERROR_CODE, format!("{:#}", err)),
    };

    ErrorBody {
        request_id: call.request_id.clone(),
        error_code: Some(error_code.to_string()),
        message,
    }
}

fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, HttpError> {
    let body = serde_json::to_string(value)
        .map_err(|e| HttpError::for_internal_error(format!("failed to encode response: {}", e)))?;

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .map_err(|e| HttpError::for_internal_error(format!("failed to build response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};
    use secrets_api::{Forbidden, NotFound};

    fn call() -> CallContext {
        CallContext::new("req-123", "get_app")
    }

    #[test]
    fn test_declared_error_body() {
        let err = Error::from(NotFound::new("app 7 not found"));
        let body = error_body(&call(), &err, StatusCode::NOT_FOUND);

        assert_eq!(body.request_id, "req-123");
        assert_eq!(body.error_code.as_deref(), Some("NotFound"));
        assert_eq!(body.message, "app 7 not found");
    }

    #[test]
    fn test_unrecognized_error_body_embeds_message() {
        let err: Result<()> = Err(anyhow!("connection refused"));
        let err = err.context("querying backing store").unwrap_err();
        let body = error_body(&call(), &err, StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(body.error_code.as_deref(), Some("InternalError"));
        assert_eq!(body.message, "querying backing store: connection refused");
    }

    #[test]
    fn test_undeclared_model_reported_as_internal() {
        // A Forbidden that the operation does not declare is answered with 500
        let err = Error::from(Forbidden::new("not yours"));
        let body = error_body(&call(), &err, StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(body.error_code.as_deref(), Some("InternalError"));
        assert_eq!(body.message, "forbidden: not yours");
    }

    #[test]
    fn test_encode_statuses_and_headers() {
        let response = encode(Ok(vec![1, 2, 3]), StatusCode::OK).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let response = encode(Ok(()), StatusCode::NO_CONTENT).unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());

        let err = Error::from(NotFound::new("gone"));
        let body = error_body(&call(), &err, StatusCode::NOT_FOUND);
        let response = encode::<()>(Err(body), StatusCode::NOT_FOUND).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
