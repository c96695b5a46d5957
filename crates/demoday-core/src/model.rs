// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Domain value types for demo presentations.
//!
//! The presentation status state machine lives here, together with the
//! embedded document types (evaluation criteria, assigned-intern records,
//! reminders) that are stored as JSON inside the presentation row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default presentation duration in minutes when the client omits it.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// Default location when the client omits it.
pub const DEFAULT_LOCATION: &str = "Virtual";

/// Status stamped on a newly created roster entry.
pub const DEFAULT_ASSIGNMENT_STATUS: &str = "assigned";

/// Roles allowed to create and update presentations and teams.
pub const PRIVILEGED_ROLES: [&str; 2] = ["admin", "employee"];

/// Every role a member of the directory may hold.
pub const MEMBER_ROLES: [&str; 3] = ["admin", "employee", "intern"];

/// Returns true if the given role may create or update presentations.
pub fn is_privileged_role(role: &str) -> bool {
    PRIVILEGED_ROLES.contains(&role)
}

/// Lifecycle states of a demo presentation.
///
/// Permitted transitions:
///
/// ```text
/// draft       -> scheduled | cancelled
/// scheduled   -> in_progress | cancelled | draft
/// in_progress -> completed | cancelled
/// completed   -> (terminal)
/// cancelled   -> draft | scheduled
/// ```
///
/// `completed` has no outbound edges; `cancelled` presentations can be
/// reactivated into `draft` or `scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStatus {
    /// Created but not yet announced. Initial state, never client-settable.
    Draft,
    /// Announced with a confirmed slot.
    Scheduled,
    /// Currently being presented.
    InProgress,
    /// Finished. Terminal.
    Completed,
    /// Called off; may be reactivated.
    Cancelled,
}

impl PresentationStatus {
    /// All states, in declaration order.
    pub const ALL: [PresentationStatus; 5] = [
        PresentationStatus::Draft,
        PresentationStatus::Scheduled,
        PresentationStatus::InProgress,
        PresentationStatus::Completed,
        PresentationStatus::Cancelled,
    ];

    /// The stored string form of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            PresentationStatus::Draft => "draft",
            PresentationStatus::Scheduled => "scheduled",
            PresentationStatus::InProgress => "in_progress",
            PresentationStatus::Completed => "completed",
            PresentationStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a stored or requested status string. Returns `None` for
    /// anything outside the five known states.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(PresentationStatus::Draft),
            "scheduled" => Some(PresentationStatus::Scheduled),
            "in_progress" => Some(PresentationStatus::InProgress),
            "completed" => Some(PresentationStatus::Completed),
            "cancelled" => Some(PresentationStatus::Cancelled),
            _ => None,
        }
    }

    /// Returns true when the edge `self -> next` is in the permitted set.
    pub fn can_transition_to(self, next: Self) -> bool {
        use PresentationStatus::*;
        matches!(
            (self, next),
            (Draft, Scheduled)
                | (Draft, Cancelled)
                | (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (Scheduled, Draft)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
                | (Cancelled, Draft)
                | (Cancelled, Scheduled)
        )
    }
}

/// Check a requested status change against the permitted edge table.
///
/// Runs only when an update carries a `status` field; the denial message
/// names both states, including any edge attempting to leave `completed`.
pub fn check_transition(
    current: PresentationStatus,
    requested: PresentationStatus,
) -> Result<(), CoreError> {
    if current.can_transition_to(requested) {
        Ok(())
    } else {
        Err(CoreError::InvalidStatusTransition {
            from: current.as_str().to_string(),
            to: requested.as_str().to_string(),
        })
    }
}

/// A single evaluation criterion embedded in a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationCriterion {
    /// Criterion name, non-empty after trimming.
    pub criterion: String,
    /// Maximum attainable points, in [1, 100].
    pub max_points: i64,
    /// Optional free-text description.
    #[serde(default)]
    pub description: String,
}

/// A roster entry for one assigned intern.
///
/// Created when a username first enters the roster; carried forward
/// unchanged on subsequent roster updates that still contain the username;
/// removed only by omission from a full roster replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedIntern {
    /// Directory username of the intern.
    pub username: String,
    /// When the intern was first assigned. Never re-stamped.
    pub assigned_at: DateTime<Utc>,
    /// Per-assignment status string, `assigned` at creation.
    pub status: String,
    /// 1-based position in the deduplicated assignment list.
    pub presentation_order: i64,
}

/// Reminder offsets relative to the scheduled date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// 24 hours before the presentation.
    TwentyFourHours,
    /// 2 hours before the presentation.
    TwoHours,
    /// 30 minutes before the presentation.
    ThirtyMinutes,
}

impl ReminderKind {
    /// The stored string form of this reminder kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderKind::TwentyFourHours => "24_hours",
            ReminderKind::TwoHours => "2_hours",
            ReminderKind::ThirtyMinutes => "30_minutes",
        }
    }
}

/// A reminder record embedded in a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Which offset this reminder fires at.
    #[serde(rename = "type")]
    pub reminder_type: String,
    /// Whether the reminder has been sent.
    pub sent: bool,
}

impl Reminder {
    /// The three unsent reminders stamped onto every new presentation.
    pub fn defaults() -> Vec<Reminder> {
        [
            ReminderKind::TwentyFourHours,
            ReminderKind::TwoHours,
            ReminderKind::ThirtyMinutes,
        ]
        .into_iter()
        .map(|kind| Reminder {
            reminder_type: kind.as_str().to_string(),
            sent: false,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_all_variants() {
        for status in PresentationStatus::ALL {
            assert_eq!(PresentationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PresentationStatus::parse("unknown"), None);
        assert_eq!(PresentationStatus::parse(""), None);
        assert_eq!(PresentationStatus::parse("DRAFT"), None);
    }

    #[test]
    fn test_transition_table_is_exhaustive_and_exact() {
        use PresentationStatus::*;
        let allowed = [
            (Draft, Scheduled),
            (Draft, Cancelled),
            (Scheduled, InProgress),
            (Scheduled, Cancelled),
            (Scheduled, Draft),
            (InProgress, Completed),
            (InProgress, Cancelled),
            (Cancelled, Draft),
            (Cancelled, Scheduled),
        ];

        for current in PresentationStatus::ALL {
            for requested in PresentationStatus::ALL {
                let expected = allowed.contains(&(current, requested));
                assert_eq!(
                    current.can_transition_to(requested),
                    expected,
                    "edge {:?} -> {:?} should be {}",
                    current,
                    requested,
                    if expected { "allowed" } else { "denied" }
                );
            }
        }
    }

    #[test]
    fn test_completed_is_terminal() {
        for requested in PresentationStatus::ALL {
            assert!(!PresentationStatus::Completed.can_transition_to(requested));
        }
    }

    #[test]
    fn test_same_state_is_not_a_transition() {
        for status in PresentationStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_check_transition_names_both_states() {
        let err = check_transition(
            PresentationStatus::Completed,
            PresentationStatus::Scheduled,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("completed"));
        assert!(message.contains("scheduled"));
    }

    #[test]
    fn test_privileged_roles() {
        assert!(is_privileged_role("admin"));
        assert!(is_privileged_role("employee"));
        assert!(!is_privileged_role("intern"));
        assert!(!is_privileged_role(""));
    }

    #[test]
    fn test_reminder_defaults() {
        let reminders = Reminder::defaults();
        assert_eq!(reminders.len(), 3);
        assert_eq!(reminders[0].reminder_type, "24_hours");
        assert_eq!(reminders[1].reminder_type, "2_hours");
        assert_eq!(reminders[2].reminder_type, "30_minutes");
        assert!(reminders.iter().all(|r| !r.sent));
    }

    #[test]
    fn test_status_serde_wire_names() {
        let json = serde_json::to_string(&PresentationStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: PresentationStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, PresentationStatus::Cancelled);
    }

    #[test]
    fn test_assigned_intern_wire_names() {
        let entry = AssignedIntern {
            username: "jdoe".to_string(),
            assigned_at: Utc::now(),
            status: DEFAULT_ASSIGNMENT_STATUS.to_string(),
            presentation_order: 1,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("assignedAt").is_some());
        assert!(value.get("presentationOrder").is_some());
    }
}
