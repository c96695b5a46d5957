// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Roster reconciliation for assigned interns.
//!
//! Takes the requested username list, cleans it up, resolves every unique
//! username against the member directory, and merges the result with the
//! existing roster so that entries which were already assigned keep their
//! original assignment metadata.
//!
//! The result is a full replacement list: usernames omitted from the
//! request are dropped from the roster. This matches the observed product
//! behavior (set-replace, not set-union); switching to an additive merge
//! would be a behavior change and needs product sign-off first.

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::model::{AssignedIntern, DEFAULT_ASSIGNMENT_STATUS};
use crate::persistence::Persistence;

/// Trim the requested usernames, drop blank entries, and deduplicate
/// preserving first-occurrence order.
pub fn normalize_usernames(requested: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for raw in requested {
        let username = raw.trim();
        if username.is_empty() {
            continue;
        }
        if seen.iter().any(|existing: &String| existing == username) {
            continue;
        }
        seen.push(username.to_string());
    }
    seen
}

/// Build the replacement roster for a presentation.
///
/// Every unique username must resolve to a member of the organization;
/// the first resolution failure aborts the whole reconciliation and no
/// partial roster is ever returned. Entries already present in the prior
/// roster are carried forward unchanged (same `assignedAt`, `status`, and
/// `presentationOrder`); new entries are stamped with `now`, the default
/// assignment status, and their 1-based position in the deduplicated
/// input list.
///
/// Lookups are awaited one at a time; they are side-effect-free reads, so
/// this is a latency choice, not a correctness one, and it keeps the
/// reported missing username deterministic.
pub async fn reconcile_roster(
    persistence: &dyn Persistence,
    organization_name: &str,
    organization_id: &str,
    requested: &[String],
    existing: &[AssignedIntern],
    now: DateTime<Utc>,
) -> Result<Vec<AssignedIntern>, CoreError> {
    let usernames = normalize_usernames(requested);

    let mut roster = Vec::with_capacity(usernames.len());
    for (index, username) in usernames.iter().enumerate() {
        let resolved = persistence
            .find_user_in_org(username, organization_name, organization_id)
            .await?;
        if resolved.is_none() {
            return Err(CoreError::ParticipantNotFound {
                username: username.clone(),
            });
        }

        if let Some(prior) = existing.iter().find(|entry| entry.username == *username) {
            roster.push(prior.clone());
        } else {
            roster.push(AssignedIntern {
                username: username.clone(),
                assigned_at: now,
                status: DEFAULT_ASSIGNMENT_STATUS.to_string(),
                presentation_order: (index + 1) as i64,
            });
        }
    }

    Ok(roster)
}
