// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for demoday-core.
//!
//! Provides a unified error type with machine-readable codes. The HTTP
//! boundary maps each code to a status; the core never touches HTTP.

use std::fmt;

/// Result type using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur during request processing.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum CoreError {
    /// Input validation failed.
    ValidationError {
        /// The field that failed validation.
        field: String,
        /// The validation error message.
        message: String,
    },

    /// The presentation was not found.
    PresentationNotFound {
        /// The presentation ID that was not found.
        presentation_id: String,
    },

    /// A referenced user (creator or acting user) does not exist.
    UserNotFound {
        /// The username that was not found.
        username: String,
    },

    /// The referenced team does not exist in the organization.
    TeamNotFound {
        /// The team name that was not found.
        team_name: String,
    },

    /// A requested roster username does not resolve in the organization.
    ParticipantNotFound {
        /// The username that failed resolution.
        username: String,
    },

    /// The user exists but lacks permission or organizational scope.
    Forbidden {
        /// Why the request was denied.
        reason: String,
    },

    /// The requested status change is not a permitted edge.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// A member with this username is already registered.
    UserAlreadyExists {
        /// The username that already exists.
        username: String,
    },

    /// A team with this name already exists in the organization.
    TeamAlreadyExists {
        /// The team name that already exists.
        team_name: String,
    },

    /// Database operation failed.
    DatabaseError {
        /// The operation that failed.
        operation: String,
        /// Error details.
        details: String,
    },
}

impl CoreError {
    /// Get the error code string for this error type.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "VALIDATION_ERROR",
            Self::PresentationNotFound { .. } => "PRESENTATION_NOT_FOUND",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::TeamNotFound { .. } => "TEAM_NOT_FOUND",
            Self::ParticipantNotFound { .. } => "PARTICIPANT_NOT_FOUND",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::UserAlreadyExists { .. } => "USER_ALREADY_EXISTS",
            Self::TeamAlreadyExists { .. } => "TEAM_ALREADY_EXISTS",
            Self::DatabaseError { .. } => "DATABASE_ERROR",
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError { field, message } => {
                write!(f, "Validation error for '{}': {}", field, message)
            }
            Self::PresentationNotFound { presentation_id } => {
                write!(f, "Demo presentation '{}' not found", presentation_id)
            }
            Self::UserNotFound { username } => {
                write!(f, "User '{}' not found", username)
            }
            Self::TeamNotFound { team_name } => {
                write!(f, "Team '{}' not found in this organization", team_name)
            }
            Self::ParticipantNotFound { username } => {
                write!(f, "Intern '{}' not found in this organization", username)
            }
            Self::Forbidden { reason } => {
                write!(f, "Forbidden: {}", reason)
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Invalid status transition from '{}' to '{}'", from, to)
            }
            Self::UserAlreadyExists { username } => {
                write!(f, "User '{}' already exists", username)
            }
            Self::TeamAlreadyExists { team_name } => {
                write!(
                    f,
                    "Team '{}' already exists in this organization",
                    team_name
                )
            }
            Self::DatabaseError { operation, details } => {
                write!(f, "Database error during '{}': {}", operation, details)
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::DatabaseError {
            operation: "query".to_string(),
            details: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::DatabaseError {
            operation: "json".to_string(),
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let test_cases = vec![
            (
                CoreError::ValidationError {
                    field: "duration".to_string(),
                    message: "out of range".to_string(),
                },
                "VALIDATION_ERROR",
            ),
            (
                CoreError::PresentationNotFound {
                    presentation_id: "p-1".to_string(),
                },
                "PRESENTATION_NOT_FOUND",
            ),
            (
                CoreError::UserNotFound {
                    username: "jdoe".to_string(),
                },
                "USER_NOT_FOUND",
            ),
            (
                CoreError::TeamNotFound {
                    team_name: "platform".to_string(),
                },
                "TEAM_NOT_FOUND",
            ),
            (
                CoreError::ParticipantNotFound {
                    username: "ghost".to_string(),
                },
                "PARTICIPANT_NOT_FOUND",
            ),
            (
                CoreError::Forbidden {
                    reason: "wrong organization".to_string(),
                },
                "FORBIDDEN",
            ),
            (
                CoreError::InvalidStatusTransition {
                    from: "completed".to_string(),
                    to: "scheduled".to_string(),
                },
                "INVALID_STATUS_TRANSITION",
            ),
            (
                CoreError::UserAlreadyExists {
                    username: "jdoe".to_string(),
                },
                "USER_ALREADY_EXISTS",
            ),
            (
                CoreError::TeamAlreadyExists {
                    team_name: "platform".to_string(),
                },
                "TEAM_ALREADY_EXISTS",
            ),
            (
                CoreError::DatabaseError {
                    operation: "insert".to_string(),
                    details: "connection refused".to_string(),
                },
                "DATABASE_ERROR",
            ),
        ];

        for (error, expected_code) in test_cases {
            assert_eq!(
                error.error_code(),
                expected_code,
                "Error {:?} should have code {}",
                error,
                expected_code
            );
            assert!(!error.to_string().is_empty(), "Message should not be empty");
        }
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::ValidationError {
            field: "duration".to_string(),
            message: "must be between 15 and 240 minutes".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Validation error for 'duration': must be between 15 and 240 minutes"
        );

        let err = CoreError::ParticipantNotFound {
            username: "ghost".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Intern 'ghost' not found in this organization"
        );

        let err = CoreError::InvalidStatusTransition {
            from: "completed".to_string(),
            to: "scheduled".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition from 'completed' to 'scheduled'"
        );

        let err = CoreError::DatabaseError {
            operation: "insert".to_string(),
            details: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Database error during 'insert': connection refused"
        );
    }
}
