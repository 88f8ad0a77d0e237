// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Uniform API response envelope and error type.
//!
//! Every route responds with `{message, data?}`. Statuses come from a fixed
//! table of outcome kinds: 200 success, 400 bad request, 401 unauthorized,
//! 404 not found, 405 method not allowed, 500 internal error, plus 503 when
//! the RPC pool has no usable endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Response envelope shared by all routes.
///
/// `data` is omitted from the JSON body when absent, so error responses
/// carry only a `message`.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    /// Human-readable outcome description.
    pub message: String,
    /// Payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful envelope with a payload.
    pub fn ok(data: T) -> Self {
        Self {
            message: "SUCCESS".to_string(),
            data: Some(data),
        }
    }

    /// Envelope with a custom message and payload.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(Envelope::<()> {
            message: self.message,
            data: None,
        });
        (self.status, body).into_response()
    }
}
