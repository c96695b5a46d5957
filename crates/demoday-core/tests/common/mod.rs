// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Common test infrastructure for demoday-core integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;

use demoday_core::handlers::PresentationHandlerState;
use demoday_core::persistence::{Persistence, SqlitePersistence, TeamRecord, UserRecord};
use demoday_core::protocol::{CreatePresentationRequest, CriterionInput};

pub const ORG_NAME: &str = "Acme Robotics";
pub const ORG_ID: &str = "org-1";

/// Open a fresh in-memory SQLite database with all migrations applied.
pub async fn sqlite_persistence() -> SqlitePersistence {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");
    demoday_core::migrations::run_sqlite(&pool)
        .await
        .expect("Failed to run migrations");
    SqlitePersistence::new(pool)
}

pub fn make_user(username: &str, role: &str, org_name: &str, org_id: &str) -> UserRecord {
    UserRecord {
        username: username.to_string(),
        full_name: format!("{} Example", username),
        role: role.to_string(),
        organization_name: org_name.to_string(),
        organization_id: org_id.to_string(),
        created_at: Utc::now(),
    }
}

pub fn make_team(team_name: &str, org_name: &str, org_id: &str) -> TeamRecord {
    TeamRecord {
        team_name: team_name.to_string(),
        organization_name: org_name.to_string(),
        organization_id: org_id.to_string(),
        created_by: "mentor1".to_string(),
        created_at: Utc::now(),
    }
}

/// Seed the default directory: one mentor, two interns, one team.
pub async fn seed_directory(persistence: &dyn Persistence) {
    for user in [
        make_user("mentor1", "employee", ORG_NAME, ORG_ID),
        make_user("intern-a", "intern", ORG_NAME, ORG_ID),
        make_user("intern-b", "intern", ORG_NAME, ORG_ID),
    ] {
        persistence.insert_user(&user).await.expect("seed user");
    }
    persistence
        .insert_team(&make_team("platform", ORG_NAME, ORG_ID))
        .await
        .expect("seed team");
}

pub fn handler_state(persistence: Arc<dyn Persistence>) -> PresentationHandlerState {
    PresentationHandlerState::new(persistence)
}

pub fn criterion(name: &str, points: f64) -> CriterionInput {
    CriterionInput {
        criterion: Some(name.to_string()),
        max_points: Some(points),
        description: None,
    }
}

pub fn future_date() -> String {
    (Utc::now() + Duration::days(7)).to_rfc3339()
}

/// A valid create request against the seeded directory.
pub fn create_request() -> CreatePresentationRequest {
    CreatePresentationRequest {
        title: Some("Demo A".to_string()),
        description: Some("First demo of the cohort".to_string()),
        team_name: Some("platform".to_string()),
        organization_name: Some(ORG_NAME.to_string()),
        organization_id: Some(ORG_ID.to_string()),
        created_by: Some("mentor1".to_string()),
        scheduled_date: Some(future_date()),
        evaluation_criteria: Some(vec![criterion("Clarity", 20.0)]),
        ..Default::default()
    }
}
