// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Field validators for presentation requests.
//!
//! Pure functions: given raw input they return pass/fail with a
//! field-specific message and never mutate their arguments. Callers apply
//! them fail-fast, so the first violated rule is the one reported. The
//! create path runs every validator; the update path runs only the
//! validators for fields present in the patch.

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::model::EvaluationCriterion;
use crate::protocol::CriterionInput;

/// Minimum presentation duration in minutes, inclusive.
pub const MIN_DURATION_MINUTES: i64 = 15;

/// Maximum presentation duration in minutes, inclusive.
pub const MAX_DURATION_MINUTES: i64 = 240;

/// Minimum points a criterion may award, inclusive.
pub const MIN_CRITERION_POINTS: i64 = 1;

/// Maximum points a criterion may award, inclusive.
pub const MAX_CRITERION_POINTS: i64 = 100;

/// Check a required string field and return its trimmed value.
///
/// Rejects absent, empty, and whitespace-only values.
pub fn required_string(field: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.trim().to_string()),
        _ => Err(CoreError::ValidationError {
            field: field.to_string(),
            message: "is required and must not be blank".to_string(),
        }),
    }
}

/// Check the duration bounds, [15, 240] minutes inclusive.
pub fn validate_duration(minutes: i64) -> Result<(), CoreError> {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(CoreError::ValidationError {
            field: "duration".to_string(),
            message: format!(
                "duration must be between {} and {} minutes",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            ),
        })
    }
}

/// Check the meeting link shape. An empty link is allowed; a non-empty
/// link must be an http(s) URL without embedded whitespace.
pub fn validate_meeting_link(link: &str) -> Result<(), CoreError> {
    if link.is_empty() {
        return Ok(());
    }
    let well_formed = (link.starts_with("http://") || link.starts_with("https://"))
        && !link.chars().any(char::is_whitespace);
    if well_formed {
        Ok(())
    } else {
        Err(CoreError::ValidationError {
            field: "meetingLink".to_string(),
            message: "meetingLink must be a valid http(s) URL".to_string(),
        })
    }
}

/// Validate the evaluation criteria array and return its normalized form.
///
/// The array must be non-empty; every `criterion` must be non-empty after
/// trimming; every `maxPoints` must be an integer-like value in [1, 100].
pub fn validate_criteria(criteria: &[CriterionInput]) -> Result<Vec<EvaluationCriterion>, CoreError> {
    if criteria.is_empty() {
        return Err(CoreError::ValidationError {
            field: "evaluationCriteria".to_string(),
            message: "at least one evaluation criterion is required".to_string(),
        });
    }

    let mut normalized = Vec::with_capacity(criteria.len());
    for entry in criteria {
        let name = match entry.criterion.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                return Err(CoreError::ValidationError {
                    field: "evaluationCriteria".to_string(),
                    message: "each criterion must have a non-empty name".to_string(),
                });
            }
        };

        let max_points = match entry.max_points {
            Some(points)
                if points.fract() == 0.0
                    && (MIN_CRITERION_POINTS as f64..=MAX_CRITERION_POINTS as f64)
                        .contains(&points) =>
            {
                points as i64
            }
            _ => {
                return Err(CoreError::ValidationError {
                    field: "evaluationCriteria".to_string(),
                    message: format!(
                        "maxPoints must be an integer between {} and {}",
                        MIN_CRITERION_POINTS, MAX_CRITERION_POINTS
                    ),
                });
            }
        };

        normalized.push(EvaluationCriterion {
            criterion: name,
            max_points,
            description: entry.description.clone().unwrap_or_default(),
        });
    }

    Ok(normalized)
}

/// Parse an RFC 3339 date string into a UTC timestamp.
pub fn parse_scheduled_date(field: &str, raw: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| CoreError::ValidationError {
            field: field.to_string(),
            message: "must be a valid ISO 8601 date".to_string(),
        })
}

/// Check that a scheduled date is strictly in the future.
///
/// Applies at create and at any update that changes the date; equality
/// with "now" is rejected.
pub fn validate_future_date(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), CoreError> {
    if date > now {
        Ok(())
    } else {
        Err(CoreError::ValidationError {
            field: "scheduledDate".to_string(),
            message: "scheduledDate must be in the future".to_string(),
        })
    }
}
