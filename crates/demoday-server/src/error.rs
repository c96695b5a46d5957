// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP mapping for core errors.
//!
//! Every error leaves the boundary as a JSON body with a human-readable
//! `error` message and a machine-readable `code`; database failures also
//! carry flattened `details`. The status mapping is the single place
//! where error kinds meet HTTP.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use demoday_core::error::CoreError;

/// Newtype wrapper so core errors can implement `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

/// JSON body returned on every error path.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error kind.
    pub code: &'static str,
    /// Flattened backend details, present on persistence failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            CoreError::ValidationError { .. } | CoreError::InvalidStatusTransition { .. } => {
                StatusCode::BAD_REQUEST
            }
            CoreError::Forbidden { .. } => StatusCode::FORBIDDEN,
            CoreError::PresentationNotFound { .. }
            | CoreError::UserNotFound { .. }
            | CoreError::TeamNotFound { .. }
            | CoreError::ParticipantNotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::UserAlreadyExists { .. } | CoreError::TeamAlreadyExists { .. } => {
                StatusCode::CONFLICT
            }
            CoreError::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.0.error_code(), "Request failed: {}", self.0);
        } else {
            tracing::debug!(code = self.0.error_code(), "Request rejected: {}", self.0);
        }

        let details = match &self.0 {
            CoreError::DatabaseError { details, .. } => Some(details.clone()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
            code: self.0.error_code(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                CoreError::ValidationError {
                    field: "duration".to_string(),
                    message: "out of range".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::InvalidStatusTransition {
                    from: "completed".to_string(),
                    to: "scheduled".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::Forbidden {
                    reason: "wrong organization".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                CoreError::PresentationNotFound {
                    presentation_id: "p-1".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                CoreError::ParticipantNotFound {
                    username: "ghost".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                CoreError::TeamAlreadyExists {
                    team_name: "platform".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                CoreError::DatabaseError {
                    operation: "insert".to_string(),
                    details: "connection refused".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError(error).status(), expected);
        }
    }
}
