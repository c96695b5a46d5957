// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Persistence interfaces and backends for demoday-core.
//!
//! This module defines the persistence abstraction and backend
//! implementations. The presentation aggregate is stored as one row with
//! its embedded lists in JSON columns; a write touches exactly one row,
//! so partial-field corruption within a document is not possible. There
//! is no optimistic-concurrency token: two concurrent updates to the same
//! presentation race with last-writer-wins semantics.

pub mod postgres;
pub mod sqlite;

pub use self::postgres::PostgresPersistence;
pub use self::sqlite::SqlitePersistence;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;

use crate::error::CoreError;
use crate::model::{AssignedIntern, EvaluationCriterion, PresentationStatus, Reminder};

/// Member record from the persistence layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    /// Directory username, unique across the deployment.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Member role (admin, employee, intern).
    pub role: String,
    /// Organization name the member belongs to.
    pub organization_name: String,
    /// Organization identifier the member belongs to.
    pub organization_id: String,
    /// When the member was registered.
    pub created_at: DateTime<Utc>,
}

/// Team record from the persistence layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamRecord {
    /// Team name, unique per organization.
    pub team_name: String,
    /// Organization name.
    pub organization_name: String,
    /// Organization identifier.
    pub organization_id: String,
    /// Username of the creator.
    pub created_by: String,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
}

/// Presentation record from the persistence layer.
///
/// Embedded lists are stored as JSON columns and owned by the aggregate;
/// nothing here is shared by reference across rows.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PresentationRecord {
    /// Unique identifier for the presentation.
    pub presentation_id: String,
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
    /// When the presentation is scheduled.
    pub scheduled_date: DateTime<Utc>,
    /// Duration in minutes, [15, 240].
    pub duration_minutes: i64,
    /// Location string.
    pub location: String,
    /// Meeting URL, possibly empty.
    pub meeting_link: String,
    /// Requirement strings.
    pub requirements: Json<Vec<String>>,
    /// Evaluation criteria, non-empty.
    pub evaluation_criteria: Json<Vec<EvaluationCriterion>>,
    /// Assigned intern roster.
    pub assigned_interns: Json<Vec<AssignedIntern>>,
    /// Submissions (managed elsewhere; empty at creation).
    pub submissions: Json<Vec<serde_json::Value>>,
    /// Evaluations (managed elsewhere; empty at creation).
    pub evaluations: Json<Vec<serde_json::Value>>,
    /// Reminder records.
    pub reminders: Json<Vec<Reminder>>,
    /// Tag strings.
    pub tags: Json<Vec<String>>,
    /// Current status (draft, scheduled, in_progress, completed, cancelled).
    pub status: String,
    /// When the presentation was created.
    pub created_at: DateTime<Utc>,
    /// When the presentation was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Sparse field set applied by [`Persistence::update_presentation`].
///
/// `None` fields keep their stored value; the whole patch is applied as a
/// single conditional UPDATE, so a patch either lands completely or not
/// at all. `updated_at` is always stamped.
#[derive(Debug, Clone)]
pub struct PresentationPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New scheduled date.
    pub scheduled_date: Option<DateTime<Utc>>,
    /// New duration in minutes.
    pub duration_minutes: Option<i64>,
    /// New location.
    pub location: Option<String>,
    /// New meeting URL; `Some("")` clears the link.
    pub meeting_link: Option<String>,
    /// Full replacement requirement list.
    pub requirements: Option<Vec<String>>,
    /// Full replacement criteria list.
    pub evaluation_criteria: Option<Vec<EvaluationCriterion>>,
    /// Full replacement roster.
    pub assigned_interns: Option<Vec<AssignedIntern>>,
    /// Full replacement tag list.
    pub tags: Option<Vec<String>>,
    /// New status, already checked against the transition table.
    pub status: Option<PresentationStatus>,
    /// Update timestamp, always applied.
    pub updated_at: DateTime<Utc>,
}

impl PresentationPatch {
    /// An empty patch that only bumps `updated_at`.
    pub fn empty(updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            description: None,
            scheduled_date: None,
            duration_minutes: None,
            location: None,
            meeting_link: None,
            requirements: None,
            evaluation_criteria: None,
            assigned_interns: None,
            tags: None,
            status: None,
            updated_at,
        }
    }
}

/// Persistence interface used by the request handlers.
#[allow(missing_docs)]
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), CoreError>;

    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>, CoreError>;

    /// Resolve a username inside an organization. Both organization
    /// fields must match.
    async fn find_user_in_org(
        &self,
        username: &str,
        organization_name: &str,
        organization_id: &str,
    ) -> Result<Option<UserRecord>, CoreError>;

    async fn insert_team(&self, team: &TeamRecord) -> Result<(), CoreError>;

    async fn find_team(
        &self,
        team_name: &str,
        organization_name: &str,
        organization_id: &str,
    ) -> Result<Option<TeamRecord>, CoreError>;

    async fn list_teams(
        &self,
        organization_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TeamRecord>, CoreError>;

    async fn count_teams(&self, organization_id: Option<&str>) -> Result<i64, CoreError>;

    async fn insert_presentation(&self, record: &PresentationRecord) -> Result<(), CoreError>;

    async fn get_presentation(
        &self,
        presentation_id: &str,
    ) -> Result<Option<PresentationRecord>, CoreError>;

    /// Apply a sparse patch to one presentation. Returns false when no
    /// row with the given id exists.
    async fn update_presentation(
        &self,
        presentation_id: &str,
        patch: &PresentationPatch,
    ) -> Result<bool, CoreError>;

    async fn list_presentations(
        &self,
        organization_id: Option<&str>,
        team_name: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PresentationRecord>, CoreError>;

    async fn count_presentations(
        &self,
        organization_id: Option<&str>,
        team_name: Option<&str>,
        status: Option<&str>,
    ) -> Result<i64, CoreError>;

    /// Presentations currently scheduled or in progress.
    async fn count_active_presentations(&self) -> Result<i64, CoreError>;

    async fn health_check_db(&self) -> Result<bool, CoreError>;
}
