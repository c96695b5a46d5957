// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request and response types for the demoday API.
//!
//! Wire names are camelCase, matching the JSON contract the dashboard
//! clients speak. Client-supplied fields are all `Option` with serde
//! defaults so that presence is checked by the validators in
//! [`crate::validate`] with field-specific messages, instead of opaque
//! deserializer rejections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AssignedIntern, EvaluationCriterion, Reminder};
use crate::persistence::{PresentationRecord, TeamRecord, UserRecord};

// ============================================================================
// Presentation requests
// ============================================================================

/// One raw evaluation-criterion entry as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionInput {
    /// Criterion name.
    #[serde(default)]
    pub criterion: Option<String>,
    /// Maximum points; accepted as any JSON number, validated to be
    /// integer-like in [1, 100].
    #[serde(default)]
    pub max_points: Option<f64>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /api/demo-presentations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePresentationRequest {
    /// Presentation title. Required.
    #[serde(default)]
    pub title: Option<String>,
    /// Presentation description. Required.
    #[serde(default)]
    pub description: Option<String>,
    /// Owning team name. Required; must resolve in the organization.
    #[serde(default)]
    pub team_name: Option<String>,
    /// Organization name. Required.
    #[serde(default)]
    pub organization_name: Option<String>,
    /// Organization identifier. Required.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Username of the creator. Required; must hold a privileged role.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Scheduled date as an RFC 3339 string. Required; strictly future.
    #[serde(default)]
    pub scheduled_date: Option<String>,
    /// Duration in minutes, [15, 240]. Defaults to 30.
    #[serde(default)]
    pub duration: Option<i64>,
    /// Location. Defaults to "Virtual".
    #[serde(default)]
    pub location: Option<String>,
    /// Meeting URL. Defaults to empty; validated when non-empty.
    #[serde(default)]
    pub meeting_link: Option<String>,
    /// Requirement strings. Defaults to empty.
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    /// Evaluation criteria. Required, non-empty.
    #[serde(default)]
    pub evaluation_criteria: Option<Vec<CriterionInput>>,
    /// Usernames to assign. Defaults to empty.
    #[serde(default)]
    pub assigned_interns: Option<Vec<String>>,
    /// Tag strings. Defaults to empty.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Partial field set of `PUT /api/demo-presentations`.
///
/// Only fields present are validated and applied; everything else keeps
/// its stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationUpdates {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New scheduled date (RFC 3339); must be strictly future.
    #[serde(default)]
    pub scheduled_date: Option<String>,
    /// New duration in minutes, [15, 240].
    #[serde(default)]
    pub duration: Option<i64>,
    /// New location.
    #[serde(default)]
    pub location: Option<String>,
    /// New meeting URL; an empty string clears the link.
    #[serde(default)]
    pub meeting_link: Option<String>,
    /// Full replacement requirement list.
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    /// Full replacement criteria list.
    #[serde(default)]
    pub evaluation_criteria: Option<Vec<CriterionInput>>,
    /// Full replacement roster. Usernames omitted here are unassigned.
    #[serde(default)]
    pub assigned_interns: Option<Vec<String>>,
    /// Full replacement tag list.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Requested status; checked against the transition table.
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `PUT /api/demo-presentations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePresentationRequest {
    /// Identifier of the presentation to update. Required.
    #[serde(default)]
    pub presentation_id: Option<String>,
    /// Username performing the update. Required; must hold a privileged
    /// role in the presentation's organization.
    #[serde(default)]
    pub username: Option<String>,
    /// The sparse field set to apply. Required.
    #[serde(default)]
    pub updates: Option<PresentationUpdates>,
}

/// Filters for `GET /api/demo-presentations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPresentationsRequest {
    /// Restrict to one organization.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Restrict to one team.
    #[serde(default)]
    pub team_name: Option<String>,
    /// Restrict to one status.
    #[serde(default)]
    pub status: Option<String>,
    /// Page size; clamped to the handler's maximum.
    #[serde(default)]
    pub limit: Option<i64>,
    /// Page offset.
    #[serde(default)]
    pub offset: Option<i64>,
}

// ============================================================================
// Presentation responses
// ============================================================================

/// Reduced projection returned by create, update, and list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSummary {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Presentation title.
    pub title: String,
    /// Presentation description.
    pub description: String,
    /// Scheduled date.
    pub scheduled_date: DateTime<Utc>,
    /// Current status.
    pub status: String,
    /// Number of assigned interns.
    pub assigned_interns_count: i64,
}

impl PresentationSummary {
    /// Build the reduced projection from a stored record.
    pub fn from_record(record: &PresentationRecord) -> Self {
        Self {
            id: record.presentation_id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            scheduled_date: record.scheduled_date,
            status: record.status.clone(),
            assigned_interns_count: record.assigned_interns.0.len() as i64,
        }
    }
}

/// Full presentation document returned by `GET /api/demo-presentations/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoPresentation {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Presentation title.
    pub title: String,
    /// Presentation description.
    pub description: String,
    /// Owning team name.
    pub team_name: String,
    /// Organization name.
    pub organization_name: String,
    /// Organization identifier.
    pub organization_id: String,
    /// Username of the creator.
    pub created_by: String,
    /// Scheduled date.
    pub scheduled_date: DateTime<Utc>,
    /// Duration in minutes.
    pub duration: i64,
    /// Location.
    pub location: String,
    /// Meeting URL, possibly empty.
    pub meeting_link: String,
    /// Requirement strings.
    pub requirements: Vec<String>,
    /// Evaluation criteria.
    pub evaluation_criteria: Vec<EvaluationCriterion>,
    /// Assigned intern roster.
    pub assigned_interns: Vec<AssignedIntern>,
    /// Submissions (managed elsewhere; empty at creation).
    pub submissions: Vec<serde_json::Value>,
    /// Evaluations (managed elsewhere; empty at creation).
    pub evaluations: Vec<serde_json::Value>,
    /// Reminder records.
    pub reminders: Vec<Reminder>,
    /// Tag strings.
    pub tags: Vec<String>,
    /// Current status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl DemoPresentation {
    /// Build the full document view from a stored record.
    pub fn from_record(record: &PresentationRecord) -> Self {
        Self {
            id: record.presentation_id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            team_name: record.team_name.clone(),
            organization_name: record.organization_name.clone(),
            organization_id: record.organization_id.clone(),
            created_by: record.created_by.clone(),
            scheduled_date: record.scheduled_date,
            duration: record.duration_minutes,
            location: record.location.clone(),
            meeting_link: record.meeting_link.clone(),
            requirements: record.requirements.0.clone(),
            evaluation_criteria: record.evaluation_criteria.0.clone(),
            assigned_interns: record.assigned_interns.0.clone(),
            submissions: record.submissions.0.clone(),
            evaluations: record.evaluations.0.clone(),
            reminders: record.reminders.0.clone(),
            tags: record.tags.0.clone(),
            status: record.status.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response of `POST /api/demo-presentations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePresentationResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Reduced projection of the created document.
    pub demo_presentation: PresentationSummary,
}

/// Response of `PUT /api/demo-presentations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePresentationResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Reduced projection of the updated document.
    pub demo_presentation: PresentationSummary,
}

/// Response of `GET /api/demo-presentations/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPresentationResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The full document.
    pub demo_presentation: DemoPresentation,
}

/// Response of `GET /api/demo-presentations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPresentationsResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Total matching documents, ignoring pagination.
    pub total_count: i64,
    /// The requested page, newest scheduled date first.
    pub demo_presentations: Vec<PresentationSummary>,
}

// ============================================================================
// Teams and members
// ============================================================================

/// Body of `POST /api/teams`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    /// Team name. Required; unique per organization.
    #[serde(default)]
    pub team_name: Option<String>,
    /// Organization name. Required.
    #[serde(default)]
    pub organization_name: Option<String>,
    /// Organization identifier. Required.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Username of the creator. Required; must hold a privileged role.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Team projection returned by team endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    /// Team name.
    pub team_name: String,
    /// Organization name.
    pub organization_name: String,
    /// Organization identifier.
    pub organization_id: String,
    /// Username of the creator.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TeamSummary {
    /// Build the projection from a stored record.
    pub fn from_record(record: &TeamRecord) -> Self {
        Self {
            team_name: record.team_name.clone(),
            organization_name: record.organization_name.clone(),
            organization_id: record.organization_id.clone(),
            created_by: record.created_by.clone(),
            created_at: record.created_at,
        }
    }
}

/// Response of `POST /api/teams`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The created team.
    pub team: TeamSummary,
}

/// Filters for `GET /api/teams`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsRequest {
    /// Restrict to one organization.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Page size; clamped to the handler's maximum.
    #[serde(default)]
    pub limit: Option<i64>,
    /// Page offset.
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Response of `GET /api/teams`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Total matching teams, ignoring pagination.
    pub total_count: i64,
    /// The requested page.
    pub teams: Vec<TeamSummary>,
}

/// Body of `POST /api/members`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMemberRequest {
    /// Directory username. Required; unique.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name. Required.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Member role: `admin`, `employee`, or `intern`. Required.
    #[serde(default)]
    pub role: Option<String>,
    /// Organization name. Required.
    #[serde(default)]
    pub organization_name: Option<String>,
    /// Organization identifier. Required.
    #[serde(default)]
    pub organization_id: Option<String>,
}

/// Member projection returned by member endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    /// Directory username.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Member role.
    pub role: String,
    /// Organization name.
    pub organization_name: String,
    /// Organization identifier.
    pub organization_id: String,
}

impl MemberSummary {
    /// Build the projection from a stored record.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            full_name: record.full_name.clone(),
            role: record.role.clone(),
            organization_name: record.organization_name.clone(),
            organization_id: record.organization_id.clone(),
        }
    }
}

/// Response of `POST /api/members`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMemberResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The registered member.
    pub member: MemberSummary,
}

// ============================================================================
// Health
// ============================================================================

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Whether the service and its database are reachable.
    pub healthy: bool,
    /// Server version string.
    pub version: String,
    /// Milliseconds since the server started.
    pub uptime_ms: i64,
    /// Presentations currently scheduled or in progress.
    pub active_presentations: i64,
}
