// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error models
//!
//! Each error a controller can report is its own type. Handlers tell them
//! apart by concrete type, so a controller signals "not found" by returning
//! a [`NotFound`] (usually wrapped in `anyhow::Error`), not by choosing a
//! status code itself.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Common surface of the error models
pub trait ErrorModel: std::error::Error + Send + Sync + 'static {
    /// Value written to `error_code` in error responses
    const ERROR_CODE: &'static str;

    fn message(&self) -> &str;
}

/// Error response body
///
/// Same shape as Dropshot's own error bodies, so clients decode
/// extractor failures and controller errors alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub message: String,
}

/// The request was syntactically valid but cannot be applied as given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("bad request: {message}")]
pub struct BadRequest {
    pub message: String,
}

/// The caller may not perform this change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("forbidden: {message}")]
pub struct Forbidden {
    pub message: String,
}

/// The named app, secret or version does not exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("not found: {message}")]
pub struct NotFound {
    pub message: String,
}

/// The request collides with existing state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("conflict: {message}")]
pub struct Conflict {
    pub message: String,
}

/// The body parsed but its content fails validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("unprocessable: {message}")]
pub struct Unprocessable {
    pub message: String,
}

/// The controller failed for reasons the caller cannot fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    pub message: String,
}

macro_rules! error_model {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                pub fn new(message: impl Into<String>) -> Self {
                    Self { message: message.into() }
                }
            }

            impl ErrorModel for $ty {
                const ERROR_CODE: &'static str = stringify!($ty);

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )*
    };
}

error_model!(BadRequest, Forbidden, NotFound, Conflict, Unprocessable, InternalError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_type_names() {
        assert_eq!(BadRequest::ERROR_CODE, "BadRequest");
        assert_eq!(NotFound::ERROR_CODE, "NotFound");
        assert_eq!(Unprocessable::ERROR_CODE, "Unprocessable");
        assert_eq!(InternalError::ERROR_CODE, "InternalError");
    }

    #[test]
    fn test_display_includes_message() {
        let err = NotFound::new("app 42 not found");
        assert_eq!(err.to_string(), "not found: app 42 not found");
        assert_eq!(err.message(), "app 42 not found");
    }

    #[test]
    fn test_error_body_without_code() {
        // Dropshot omits error_code for some extractor failures
        let body: ErrorBody = serde_json::from_str(
            r#"{"request_id": "r-1", "message": "unable to parse JSON body"}"#,
        )
        .unwrap();
        assert_eq!(body.error_code, None);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"request_id": "r-1", "message": "unable to parse JSON body"})
        );
    }
}
