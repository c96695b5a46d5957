// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! PostgreSQL-backed persistence implementation.

use sqlx::PgPool;
use sqlx::types::Json;

use crate::error::CoreError;

use super::{Persistence, PresentationPatch, PresentationRecord, TeamRecord, UserRecord};

/// PostgreSQL-backed persistence provider.
#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Create a new PostgreSQL persistence provider from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Persistence for PostgresPersistence {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, full_name, role, organization_name, organization_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(&user.role)
        .bind(&user.organization_name)
        .bind(&user.organization_id)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>, CoreError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT username, full_name, role, organization_name, organization_id, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_user_in_org(
        &self,
        username: &str,
        organization_name: &str,
        organization_id: &str,
    ) -> Result<Option<UserRecord>, CoreError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT username, full_name, role, organization_name, organization_id, created_at
            FROM users
            WHERE username = $1 AND organization_name = $2 AND organization_id = $3
            "#,
        )
        .bind(username)
        .bind(organization_name)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_team(&self, team: &TeamRecord) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO teams (team_name, organization_name, organization_id, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&team.team_name)
        .bind(&team.organization_name)
        .bind(&team.organization_id)
        .bind(&team.created_by)
        .bind(team.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_team(
        &self,
        team_name: &str,
        organization_name: &str,
        organization_id: &str,
    ) -> Result<Option<TeamRecord>, CoreError> {
        let record = sqlx::query_as::<_, TeamRecord>(
            r#"
            SELECT team_name, organization_name, organization_id, created_by, created_at
            FROM teams
            WHERE team_name = $1 AND organization_name = $2 AND organization_id = $3
            "#,
        )
        .bind(team_name)
        .bind(organization_name)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_teams(
        &self,
        organization_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TeamRecord>, CoreError> {
        let records = sqlx::query_as::<_, TeamRecord>(
            r#"
            SELECT team_name, organization_name, organization_id, created_by, created_at
            FROM teams
            WHERE ($1::TEXT IS NULL OR organization_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(organization_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn count_teams(&self, organization_id: Option<&str>) -> Result<i64, CoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM teams
            WHERE ($1::TEXT IS NULL OR organization_id = $1)
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn insert_presentation(&self, record: &PresentationRecord) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO presentations (
                presentation_id, title, description, team_name, organization_name,
                organization_id, created_by, scheduled_date, duration_minutes, location,
                meeting_link, requirements, evaluation_criteria, assigned_interns,
                submissions, evaluations, reminders, tags, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            "#,
        )
        .bind(&record.presentation_id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.team_name)
        .bind(&record.organization_name)
        .bind(&record.organization_id)
        .bind(&record.created_by)
        .bind(record.scheduled_date)
        .bind(record.duration_minutes)
        .bind(&record.location)
        .bind(&record.meeting_link)
        .bind(&record.requirements)
        .bind(&record.evaluation_criteria)
        .bind(&record.assigned_interns)
        .bind(&record.submissions)
        .bind(&record.evaluations)
        .bind(&record.reminders)
        .bind(&record.tags)
        .bind(&record.status)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_presentation(
        &self,
        presentation_id: &str,
    ) -> Result<Option<PresentationRecord>, CoreError> {
        let record = sqlx::query_as::<_, PresentationRecord>(
            r#"
            SELECT presentation_id, title, description, team_name, organization_name,
                   organization_id, created_by, scheduled_date, duration_minutes, location,
                   meeting_link, requirements, evaluation_criteria, assigned_interns,
                   submissions, evaluations, reminders, tags, status, created_at, updated_at
            FROM presentations
            WHERE presentation_id = $1
            "#,
        )
        .bind(presentation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update_presentation(
        &self,
        presentation_id: &str,
        patch: &PresentationPatch,
    ) -> Result<bool, CoreError> {
        let result = sqlx::query(
            r#"
            UPDATE presentations
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                scheduled_date = COALESCE($3, scheduled_date),
                duration_minutes = COALESCE($4, duration_minutes),
                location = COALESCE($5, location),
                meeting_link = COALESCE($6, meeting_link),
                requirements = COALESCE($7, requirements),
                evaluation_criteria = COALESCE($8, evaluation_criteria),
                assigned_interns = COALESCE($9, assigned_interns),
                tags = COALESCE($10, tags),
                status = COALESCE($11, status),
                updated_at = $12
            WHERE presentation_id = $13
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.scheduled_date)
        .bind(patch.duration_minutes)
        .bind(&patch.location)
        .bind(&patch.meeting_link)
        .bind(patch.requirements.as_ref().map(Json))
        .bind(patch.evaluation_criteria.as_ref().map(Json))
        .bind(patch.assigned_interns.as_ref().map(Json))
        .bind(patch.tags.as_ref().map(Json))
        .bind(patch.status.map(|status| status.as_str()))
        .bind(patch.updated_at)
        .bind(presentation_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_presentations(
        &self,
        organization_id: Option<&str>,
        team_name: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PresentationRecord>, CoreError> {
        let records = sqlx::query_as::<_, PresentationRecord>(
            r#"
            SELECT presentation_id, title, description, team_name, organization_name,
                   organization_id, created_by, scheduled_date, duration_minutes, location,
                   meeting_link, requirements, evaluation_criteria, assigned_interns,
                   submissions, evaluations, reminders, tags, status, created_at, updated_at
            FROM presentations
            WHERE ($1::TEXT IS NULL OR organization_id = $1)
              AND ($2::TEXT IS NULL OR team_name = $2)
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY scheduled_date DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(organization_id)
        .bind(team_name)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn count_presentations(
        &self,
        organization_id: Option<&str>,
        team_name: Option<&str>,
        status: Option<&str>,
    ) -> Result<i64, CoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM presentations
            WHERE ($1::TEXT IS NULL OR organization_id = $1)
              AND ($2::TEXT IS NULL OR team_name = $2)
              AND ($3::TEXT IS NULL OR status = $3)
            "#,
        )
        .bind(organization_id)
        .bind(team_name)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_active_presentations(&self) -> Result<i64, CoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM presentations
            WHERE status IN ('scheduled', 'in_progress')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn health_check_db(&self) -> Result<bool, CoreError> {
        Ok(sqlx::query("SELECT 1").execute(&self.pool).await.is_ok())
    }
}
