// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Per-operation status mapping
//!
//! Each operation has one function here that picks the HTTP status for a
//! controller result. Success values map to the operation's documented
//! success status. Errors map by concrete type, but only types the operation
//! documents are honoured: anything else, including a known error model the
//! operation does not declare, becomes 500.

use anyhow::{Error, Result};
use http::StatusCode;
use secrets_api::{
    App, AppList, BadRequest, Conflict, ErrorModel, Forbidden, Health, InternalError, NotFound,
    Secret, SecretList, SecretVersion, Unprocessable,
};

use crate::controller::PutSecretOutput;

/// Error models a controller can return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Forbidden,
    NotFound,
    Conflict,
    Unprocessable,
    Internal,
}

impl ErrorKind {
    /// Identify the error model carried by `err`, if any
    pub fn of(err: &Error) -> Option<Self> {
        if err.is::<BadRequest>() {
            Some(Self::BadRequest)
        } else if err.is::<Forbidden>() {
            Some(Self::Forbidden)
        } else if err.is::<NotFound>() {
            Some(Self::NotFound)
        } else if err.is::<Conflict>() {
            Some(Self::Conflict)
        } else if err.is::<Unprocessable>() {
            Some(Self::Unprocessable)
        } else if err.is::<InternalError>() {
            Some(Self::Internal)
        } else {
            None
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(self) -> &'static str {
        match self {
            Self::BadRequest => BadRequest::ERROR_CODE,
            Self::Forbidden => Forbidden::ERROR_CODE,
            Self::NotFound => NotFound::ERROR_CODE,
            Self::Conflict => Conflict::ERROR_CODE,
            Self::Unprocessable => Unprocessable::ERROR_CODE,
            Self::Internal => InternalError::ERROR_CODE,
        }
    }

    /// The model's own message, without the Display prefix
    pub fn message(self, err: &Error) -> Option<&str> {
        match self {
            Self::BadRequest => err.downcast_ref::<BadRequest>().map(|e| e.message()),
            Self::Forbidden => err.downcast_ref::<Forbidden>().map(|e| e.message()),
            Self::NotFound => err.downcast_ref::<NotFound>().map(|e| e.message()),
            Self::Conflict => err.downcast_ref::<Conflict>().map(|e| e.message()),
            Self::Unprocessable => err.downcast_ref::<Unprocessable>().map(|e| e.message()),
            Self::Internal => err.downcast_ref::<InternalError>().map(|e| e.message()),
        }
    }
}

/// Status for an error, given the kinds the operation declares
pub fn for_error(err: &Error, declared: &[ErrorKind]) -> StatusCode {
    match ErrorKind::of(err) {
        Some(kind) if declared.contains(&kind) => kind.status(),
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn health_check(result: &Result<Health>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[]),
    }
}

pub fn list_apps(result: &Result<AppList>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[ErrorKind::BadRequest]),
    }
}

pub fn create_app(result: &Result<App>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::CREATED,
        Err(err) => for_error(err, &[ErrorKind::BadRequest, ErrorKind::Conflict]),
    }
}

pub fn get_app(result: &Result<App>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[ErrorKind::NotFound]),
    }
}

pub fn update_app(result: &Result<App>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(
            err,
            &[ErrorKind::BadRequest, ErrorKind::Forbidden, ErrorKind::NotFound],
        ),
    }
}

pub fn delete_app(result: &Result<()>) -> StatusCode {
    match result {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(err) => for_error(err, &[ErrorKind::Forbidden, ErrorKind::NotFound]),
    }
}

pub fn list_secrets(result: &Result<SecretList>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[ErrorKind::BadRequest, ErrorKind::NotFound]),
    }
}

pub fn search_secrets(result: &Result<SecretList>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[ErrorKind::BadRequest, ErrorKind::NotFound]),
    }
}

pub fn get_secret(result: &Result<Secret>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[ErrorKind::Forbidden, ErrorKind::NotFound]),
    }
}

pub fn put_secret(result: &Result<PutSecretOutput>) -> StatusCode {
    match result {
        Ok(PutSecretOutput::Created(_)) => StatusCode::CREATED,
        Ok(PutSecretOutput::Updated(_)) => StatusCode::OK,
        Err(err) => for_error(
            err,
            &[
                ErrorKind::BadRequest,
                ErrorKind::Forbidden,
                ErrorKind::NotFound,
                ErrorKind::Unprocessable,
            ],
        ),
    }
}

pub fn delete_secret(result: &Result<()>) -> StatusCode {
    match result {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(err) => for_error(err, &[ErrorKind::Forbidden, ErrorKind::NotFound]),
    }
}

pub fn list_secret_versions(result: &Result<Vec<SecretVersion>>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[ErrorKind::NotFound]),
    }
}

pub fn get_secret_version(result: &Result<SecretVersion>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(err) => for_error(err, &[ErrorKind::NotFound]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};
    use chrono::Utc;

    fn secret() -> Secret {
        let now = Utc::now();
        Secret {
            key: "TOKEN".to_string(),
            value: None,
            description: None,
            version: 1,
            write_only: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_error_kind_of_models() {
        assert_eq!(
            ErrorKind::of(&BadRequest::new("x").into()),
            Some(ErrorKind::BadRequest)
        );
        assert_eq!(
            ErrorKind::of(&Unprocessable::new("x").into()),
            Some(ErrorKind::Unprocessable)
        );
        assert_eq!(
            ErrorKind::of(&InternalError::new("x").into()),
            Some(ErrorKind::Internal)
        );
        assert_eq!(ErrorKind::of(&anyhow!("disk on fire")), None);
    }

    #[test]
    fn test_error_kind_survives_context() {
        let err: Result<()> = Err(Error::from(NotFound::new("app gone")));
        let err = err.context("loading app").unwrap_err();

        assert_eq!(ErrorKind::of(&err), Some(ErrorKind::NotFound));
        assert_eq!(ErrorKind::NotFound.message(&err), Some("app gone"));
    }

    #[test]
    fn test_declared_errors_map_to_their_status() {
        let cases: Vec<(Error, StatusCode)> = vec![
            (BadRequest::new("empty").into(), StatusCode::BAD_REQUEST),
            (Forbidden::new("locked").into(), StatusCode::FORBIDDEN),
            (NotFound::new("nope").into(), StatusCode::NOT_FOUND),
            (
                Unprocessable::new("bad key").into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(put_secret(&Err(err)), expected);
        }

        assert_eq!(
            create_app(&Err(Conflict::new("taken").into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            list_apps(&Err(BadRequest::new("marker").into())),
            StatusCode::BAD_REQUEST
        );
    }

    const ALL_KINDS: [ErrorKind; 6] = [
        ErrorKind::BadRequest,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::Unprocessable,
        ErrorKind::Internal,
    ];

    fn model(kind: ErrorKind) -> Error {
        match kind {
            ErrorKind::BadRequest => BadRequest::new("bad").into(),
            ErrorKind::Forbidden => Forbidden::new("forbidden").into(),
            ErrorKind::NotFound => NotFound::new("missing").into(),
            ErrorKind::Conflict => Conflict::new("taken").into(),
            ErrorKind::Unprocessable => Unprocessable::new("invalid").into(),
            ErrorKind::Internal => InternalError::new("broken").into(),
        }
    }

    type Mapper = fn(Error) -> StatusCode;

    #[test]
    fn test_every_mapper_against_every_model() {
        use ErrorKind::*;

        let table: [(&str, Mapper, &[(ErrorKind, StatusCode)]); 13] = [
            ("health_check", |e| health_check(&Err(e)), &[]),
            (
                "list_apps",
                |e| list_apps(&Err(e)),
                &[(BadRequest, StatusCode::BAD_REQUEST)],
            ),
            (
                "create_app",
                |e| create_app(&Err(e)),
                &[
                    (BadRequest, StatusCode::BAD_REQUEST),
                    (Conflict, StatusCode::CONFLICT),
                ],
            ),
            (
                "get_app",
                |e| get_app(&Err(e)),
                &[(NotFound, StatusCode::NOT_FOUND)],
            ),
            (
                "update_app",
                |e| update_app(&Err(e)),
                &[
                    (BadRequest, StatusCode::BAD_REQUEST),
                    (Forbidden, StatusCode::FORBIDDEN),
                    (NotFound, StatusCode::NOT_FOUND),
                ],
            ),
            (
                "delete_app",
                |e| delete_app(&Err(e)),
                &[
                    (Forbidden, StatusCode::FORBIDDEN),
                    (NotFound, StatusCode::NOT_FOUND),
                ],
            ),
            (
                "list_secrets",
                |e| list_secrets(&Err(e)),
                &[
                    (BadRequest, StatusCode::BAD_REQUEST),
                    (NotFound, StatusCode::NOT_FOUND),
                ],
            ),
            (
                "search_secrets",
                |e| search_secrets(&Err(e)),
                &[
                    (BadRequest, StatusCode::BAD_REQUEST),
                    (NotFound, StatusCode::NOT_FOUND),
                ],
            ),
            (
                "get_secret",
                |e| get_secret(&Err(e)),
                &[
                    (Forbidden, StatusCode::FORBIDDEN),
                    (NotFound, StatusCode::NOT_FOUND),
                ],
            ),
            (
                "put_secret",
                |e| put_secret(&Err(e)),
                &[
                    (BadRequest, StatusCode::BAD_REQUEST),
                    (Forbidden, StatusCode::FORBIDDEN),
                    (NotFound, StatusCode::NOT_FOUND),
                    (Unprocessable, StatusCode::UNPROCESSABLE_ENTITY),
                ],
            ),
            (
                "delete_secret",
                |e| delete_secret(&Err(e)),
                &[
                    (Forbidden, StatusCode::FORBIDDEN),
                    (NotFound, StatusCode::NOT_FOUND),
                ],
            ),
            (
                "list_secret_versions",
                |e| list_secret_versions(&Err(e)),
                &[(NotFound, StatusCode::NOT_FOUND)],
            ),
            (
                "get_secret_version",
                |e| get_secret_version(&Err(e)),
                &[(NotFound, StatusCode::NOT_FOUND)],
            ),
        ];

        for (operation, mapper, declared) in table {
            for kind in ALL_KINDS {
                let expected = declared
                    .iter()
                    .find(|(declared_kind, _)| *declared_kind == kind)
                    .map(|(_, status)| *status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(mapper(model(kind)), expected, "{} with {:?}", operation, kind);
            }
            assert_eq!(
                mapper(anyhow!("unrecognized")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "{} with an unrecognized error",
                operation
            );
        }
    }

    #[test]
    fn test_undeclared_model_maps_to_500() {
        // get_app only declares NotFound
        assert_eq!(
            get_app(&Err(Forbidden::new("no").into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        // health_check declares nothing
        assert_eq!(
            health_check(&Err(NotFound::new("no").into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unrecognized_error_maps_to_500() {
        let err = anyhow!("connection reset by peer");
        assert_eq!(get_secret(&Err(err)), StatusCode::INTERNAL_SERVER_ERROR);

        let io = std::io::Error::other("read failed");
        assert_eq!(
            delete_secret(&Err(io.into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_success_statuses() {
        assert_eq!(put_secret(&Ok(PutSecretOutput::Created(secret()))), StatusCode::CREATED);
        assert_eq!(put_secret(&Ok(PutSecretOutput::Updated(secret()))), StatusCode::OK);
        assert_eq!(delete_app(&Ok(())), StatusCode::NO_CONTENT);
        assert_eq!(delete_secret(&Ok(())), StatusCode::NO_CONTENT);
        assert_eq!(get_secret(&Ok(secret())), StatusCode::OK);
        assert_eq!(list_secret_versions(&Ok(Vec::new())), StatusCode::OK);
    }
}
