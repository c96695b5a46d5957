// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Tests for the SQLite persistence backend.

mod common;

use chrono::{Duration, Utc};
use sqlx::types::Json;

use common::{ORG_ID, ORG_NAME, make_team, make_user, sqlite_persistence};
use demoday_core::model::{AssignedIntern, EvaluationCriterion, Reminder};
use demoday_core::persistence::{Persistence, PresentationPatch, PresentationRecord};

fn sample_presentation(presentation_id: &str, status: &str) -> PresentationRecord {
    let now = Utc::now();
    PresentationRecord {
        presentation_id: presentation_id.to_string(),
        title: "Sprint Demo".to_string(),
        description: "End of sprint showcase".to_string(),
        team_name: "platform".to_string(),
        organization_name: ORG_NAME.to_string(),
        organization_id: ORG_ID.to_string(),
        created_by: "mentor1".to_string(),
        scheduled_date: now + Duration::days(7),
        duration_minutes: 45,
        location: "Room 4".to_string(),
        meeting_link: "https://meet.example.com/demo".to_string(),
        requirements: Json(vec!["slides".to_string(), "live demo".to_string()]),
        evaluation_criteria: Json(vec![EvaluationCriterion {
            criterion: "Clarity".to_string(),
            max_points: 20,
            description: "How clear was the talk".to_string(),
        }]),
        assigned_interns: Json(vec![AssignedIntern {
            username: "intern-a".to_string(),
            assigned_at: now,
            status: "assigned".to_string(),
            presentation_order: 1,
        }]),
        submissions: Json(Vec::new()),
        evaluations: Json(Vec::new()),
        reminders: Json(Reminder::defaults()),
        tags: Json(vec!["cohort-7".to_string()]),
        status: status.to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_user_round_trip_and_org_scoping() {
    let persistence = sqlite_persistence().await;

    let user = make_user("mentor1", "employee", ORG_NAME, ORG_ID);
    persistence.insert_user(&user).await.unwrap();

    let loaded = persistence.get_user("mentor1").await.unwrap().unwrap();
    assert_eq!(loaded.username, "mentor1");
    assert_eq!(loaded.role, "employee");
    assert_eq!(loaded.organization_id, ORG_ID);

    assert!(persistence.get_user("ghost").await.unwrap().is_none());

    // Organization scoping requires both fields to match
    assert!(
        persistence
            .find_user_in_org("mentor1", ORG_NAME, ORG_ID)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        persistence
            .find_user_in_org("mentor1", "Wrong Name", ORG_ID)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        persistence
            .find_user_in_org("mentor1", ORG_NAME, "org-2")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_team_round_trip() {
    let persistence = sqlite_persistence().await;

    persistence
        .insert_team(&make_team("platform", ORG_NAME, ORG_ID))
        .await
        .unwrap();

    let team = persistence
        .find_team("platform", ORG_NAME, ORG_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(team.team_name, "platform");

    assert!(
        persistence
            .find_team("platform", ORG_NAME, "org-2")
            .await
            .unwrap()
            .is_none()
    );

    assert_eq!(persistence.count_teams(Some(ORG_ID)).await.unwrap(), 1);
    assert_eq!(persistence.count_teams(Some("org-2")).await.unwrap(), 0);
    assert_eq!(persistence.count_teams(None).await.unwrap(), 1);

    let teams = persistence.list_teams(Some(ORG_ID), 10, 0).await.unwrap();
    assert_eq!(teams.len(), 1);
}

#[tokio::test]
async fn test_presentation_round_trip() {
    let persistence = sqlite_persistence().await;

    let record = sample_presentation("p-1", "draft");
    persistence.insert_presentation(&record).await.unwrap();

    let loaded = persistence.get_presentation("p-1").await.unwrap().unwrap();
    assert_eq!(loaded.title, record.title);
    assert_eq!(loaded.duration_minutes, 45);
    assert_eq!(loaded.requirements.0, record.requirements.0);
    assert_eq!(loaded.evaluation_criteria.0, record.evaluation_criteria.0);
    assert_eq!(loaded.assigned_interns.0, record.assigned_interns.0);
    assert_eq!(loaded.reminders.0, record.reminders.0);
    assert_eq!(loaded.tags.0, record.tags.0);
    assert_eq!(loaded.status, "draft");

    assert!(persistence.get_presentation("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_sparse_patch_applies_only_present_fields() {
    let persistence = sqlite_persistence().await;
    persistence
        .insert_presentation(&sample_presentation("p-1", "draft"))
        .await
        .unwrap();

    let mut patch = PresentationPatch::empty(Utc::now());
    patch.title = Some("Renamed Demo".to_string());
    let updated = persistence.update_presentation("p-1", &patch).await.unwrap();
    assert!(updated);

    let loaded = persistence.get_presentation("p-1").await.unwrap().unwrap();
    assert_eq!(loaded.title, "Renamed Demo");
    assert_eq!(loaded.description, "End of sprint showcase");
    assert_eq!(loaded.duration_minutes, 45);
    assert_eq!(loaded.status, "draft");
    assert_eq!(loaded.assigned_interns.0.len(), 1);
}

#[tokio::test]
async fn test_patch_can_clear_meeting_link() {
    let persistence = sqlite_persistence().await;
    persistence
        .insert_presentation(&sample_presentation("p-1", "draft"))
        .await
        .unwrap();

    let mut patch = PresentationPatch::empty(Utc::now());
    patch.meeting_link = Some(String::new());
    persistence.update_presentation("p-1", &patch).await.unwrap();

    let loaded = persistence.get_presentation("p-1").await.unwrap().unwrap();
    assert_eq!(loaded.meeting_link, "");
}

#[tokio::test]
async fn test_patch_replaces_roster_wholesale() {
    let persistence = sqlite_persistence().await;
    persistence
        .insert_presentation(&sample_presentation("p-1", "draft"))
        .await
        .unwrap();

    let mut patch = PresentationPatch::empty(Utc::now());
    patch.assigned_interns = Some(vec![AssignedIntern {
        username: "intern-b".to_string(),
        assigned_at: Utc::now(),
        status: "assigned".to_string(),
        presentation_order: 1,
    }]);
    persistence.update_presentation("p-1", &patch).await.unwrap();

    let loaded = persistence.get_presentation("p-1").await.unwrap().unwrap();
    assert_eq!(loaded.assigned_interns.0.len(), 1);
    assert_eq!(loaded.assigned_interns.0[0].username, "intern-b");
}

#[tokio::test]
async fn test_patch_missing_presentation_returns_false() {
    let persistence = sqlite_persistence().await;

    let patch = PresentationPatch::empty(Utc::now());
    let updated = persistence
        .update_presentation("missing", &patch)
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test]
async fn test_list_and_count_filters() {
    let persistence = sqlite_persistence().await;

    let mut draft = sample_presentation("p-1", "draft");
    draft.scheduled_date = Utc::now() + Duration::days(1);
    let mut scheduled = sample_presentation("p-2", "scheduled");
    scheduled.scheduled_date = Utc::now() + Duration::days(2);
    let mut other_team = sample_presentation("p-3", "scheduled");
    other_team.team_name = "firmware".to_string();
    other_team.scheduled_date = Utc::now() + Duration::days(3);

    for record in [&draft, &scheduled, &other_team] {
        persistence.insert_presentation(record).await.unwrap();
    }

    // Status filter
    let listed = persistence
        .list_presentations(None, None, Some("scheduled"), 10, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);

    // Team filter
    let listed = persistence
        .list_presentations(Some(ORG_ID), Some("platform"), None, 10, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);

    // Ordered newest scheduled date first
    let listed = persistence
        .list_presentations(None, None, None, 10, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].presentation_id, "p-3");
    assert_eq!(listed[2].presentation_id, "p-1");

    // Pagination
    let listed = persistence
        .list_presentations(None, None, None, 2, 2)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    assert_eq!(
        persistence
            .count_presentations(None, None, Some("scheduled"))
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        persistence
            .count_presentations(Some("org-2"), None, None)
            .await
            .unwrap(),
        0
    );
    assert_eq!(persistence.count_active_presentations().await.unwrap(), 2);
}

#[tokio::test]
async fn test_health_check() {
    let persistence = sqlite_persistence().await;
    assert!(persistence.health_check_db().await.unwrap());
}
