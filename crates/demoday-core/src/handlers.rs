// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request handlers for the demoday API.
//!
//! These handlers process presentation, team, member, and health requests.
//! Each handler runs validation and entity resolution before any mutating
//! call, so the first failure short-circuits the request and nothing is
//! partially written. Handlers are stateless per request and take their
//! persistence backend through [`PresentationHandlerState`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::CoreError;
use crate::model::{
    self, DEFAULT_DURATION_MINUTES, DEFAULT_LOCATION, PresentationStatus, Reminder,
};
use crate::persistence::{
    Persistence, PresentationPatch, PresentationRecord, TeamRecord, UserRecord,
};
use crate::protocol::{
    CreatePresentationRequest, CreatePresentationResponse, CreateTeamRequest, CreateTeamResponse,
    DemoPresentation, GetPresentationResponse, HealthCheckResponse, ListPresentationsRequest,
    ListPresentationsResponse, ListTeamsRequest, ListTeamsResponse, MemberSummary,
    PresentationSummary, RegisterMemberRequest, RegisterMemberResponse, TeamSummary,
    UpdatePresentationRequest, UpdatePresentationResponse,
};
use crate::roster;
use crate::validate;

/// Default page size for list endpoints when the client omits a limit.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Default cap on list page sizes.
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// Shared state for the request handlers.
///
/// Contains the persistence backend and server metadata for health checks.
pub struct PresentationHandlerState {
    /// Persistence implementation.
    pub persistence: Arc<dyn Persistence>,
    /// When the server started (for uptime calculation).
    pub start_time: std::time::Instant,
    /// Server version string.
    pub version: String,
    /// Cap applied to list page sizes.
    pub max_page_size: i64,
}

impl PresentationHandlerState {
    /// Create a new handler state with the given persistence backend.
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self {
            persistence,
            start_time: std::time::Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Override the list page-size cap (from configuration).
    pub fn with_max_page_size(mut self, max_page_size: i64) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Get the server uptime in milliseconds.
    pub fn uptime_ms(&self) -> i64 {
        self.start_time.elapsed().as_millis() as i64
    }

    fn page(&self, limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, self.max_page_size);
        let offset = offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Resolve a username to a member who may mutate presentations and teams
/// in the given organization.
///
/// Fails with `UserNotFound` when the username does not resolve,
/// `Forbidden` when the role is not privileged, and `Forbidden` when
/// either organization field differs. Both fields are compared
/// independently; a single-field check would let a caller spoof the other.
async fn resolve_privileged_user(
    persistence: &dyn Persistence,
    username: &str,
    organization_name: &str,
    organization_id: &str,
) -> Result<UserRecord, CoreError> {
    let user = persistence
        .get_user(username)
        .await?
        .ok_or_else(|| CoreError::UserNotFound {
            username: username.to_string(),
        })?;

    if !model::is_privileged_role(&user.role) {
        return Err(CoreError::Forbidden {
            reason: format!(
                "user '{}' with role '{}' is not allowed to manage presentations",
                user.username, user.role
            ),
        });
    }

    if user.organization_name != organization_name || user.organization_id != organization_id {
        return Err(CoreError::Forbidden {
            reason: format!(
                "user '{}' belongs to a different organization",
                user.username
            ),
        });
    }

    Ok(user)
}

// ============================================================================
// Create Presentation
// ============================================================================

/// Handle a create-presentation request.
///
/// Validates every field, resolves the creator, team, and requested
/// roster, then inserts the document with creation defaults: status
/// `draft`, empty submissions and evaluations, and the three unsent
/// reminders.
#[instrument(skip(state, request))]
pub async fn handle_create_presentation(
    state: &PresentationHandlerState,
    request: CreatePresentationRequest,
) -> Result<CreatePresentationResponse, CoreError> {
    // 1. Required string fields; the first violation is the one reported.
    let title = validate::required_string("title", request.title.as_deref())?;
    let description = validate::required_string("description", request.description.as_deref())?;
    let team_name = validate::required_string("teamName", request.team_name.as_deref())?;
    let organization_name =
        validate::required_string("organizationName", request.organization_name.as_deref())?;
    let organization_id =
        validate::required_string("organizationId", request.organization_id.as_deref())?;
    let created_by = validate::required_string("createdBy", request.created_by.as_deref())?;
    let scheduled_raw =
        validate::required_string("scheduledDate", request.scheduled_date.as_deref())?;

    // 2. Bounded and optional fields.
    let duration_minutes = request.duration.unwrap_or(DEFAULT_DURATION_MINUTES);
    validate::validate_duration(duration_minutes)?;

    let location = request
        .location
        .as_deref()
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .unwrap_or(DEFAULT_LOCATION)
        .to_string();

    let meeting_link = request
        .meeting_link
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_string();
    validate::validate_meeting_link(&meeting_link)?;

    let evaluation_criteria =
        validate::validate_criteria(request.evaluation_criteria.as_deref().unwrap_or(&[]))?;

    // 3. The scheduled date must parse and lie strictly in the future.
    let scheduled_date = validate::parse_scheduled_date("scheduledDate", &scheduled_raw)?;
    let now = Utc::now();
    validate::validate_future_date(scheduled_date, now)?;

    // 4. Resolve the creator and confirm role and organization scope.
    let creator = resolve_privileged_user(
        state.persistence.as_ref(),
        &created_by,
        &organization_name,
        &organization_id,
    )
    .await?;

    // 5. Resolve the owning team.
    let team = state
        .persistence
        .find_team(&team_name, &organization_name, &organization_id)
        .await?;
    if team.is_none() {
        return Err(CoreError::TeamNotFound { team_name });
    }

    // 6. Reconcile the requested roster (empty prior roster on create).
    let assigned_interns = roster::reconcile_roster(
        state.persistence.as_ref(),
        &organization_name,
        &organization_id,
        request.assigned_interns.as_deref().unwrap_or(&[]),
        &[],
        now,
    )
    .await?;

    // 7. Assemble the document with creation defaults and insert it.
    let record = PresentationRecord {
        presentation_id: Uuid::new_v4().to_string(),
        title,
        description,
        team_name,
        organization_name,
        organization_id,
        created_by: creator.username,
        scheduled_date,
        duration_minutes,
        location,
        meeting_link,
        requirements: sqlx::types::Json(request.requirements.unwrap_or_default()),
        evaluation_criteria: sqlx::types::Json(evaluation_criteria),
        assigned_interns: sqlx::types::Json(assigned_interns),
        submissions: sqlx::types::Json(Vec::new()),
        evaluations: sqlx::types::Json(Vec::new()),
        reminders: sqlx::types::Json(Reminder::defaults()),
        tags: sqlx::types::Json(request.tags.unwrap_or_default()),
        status: PresentationStatus::Draft.as_str().to_string(),
        created_at: now,
        updated_at: now,
    };
    state.persistence.insert_presentation(&record).await?;

    info!(
        presentation_id = %record.presentation_id,
        team = %record.team_name,
        "Demo presentation created"
    );

    Ok(CreatePresentationResponse {
        success: true,
        message: "Demo presentation created successfully".to_string(),
        demo_presentation: PresentationSummary::from_record(&record),
    })
}

// ============================================================================
// Update Presentation
// ============================================================================

/// Handle an update-presentation request.
///
/// Loads the target document, resolves the acting user against its
/// organization, validates only the fields present in the patch, checks
/// any requested status change against the transition table, reconciles
/// any requested roster against the existing one, and applies a single
/// sparse update.
#[instrument(skip(state, request), fields(presentation_id = tracing::field::Empty))]
pub async fn handle_update_presentation(
    state: &PresentationHandlerState,
    request: UpdatePresentationRequest,
) -> Result<UpdatePresentationResponse, CoreError> {
    // 1. Required envelope fields.
    let presentation_id =
        validate::required_string("presentationId", request.presentation_id.as_deref())?;
    tracing::Span::current().record("presentation_id", presentation_id.as_str());
    let username = validate::required_string("username", request.username.as_deref())?;
    let updates = request.updates.ok_or_else(|| CoreError::ValidationError {
        field: "updates".to_string(),
        message: "is required".to_string(),
    })?;

    // 2. Load the target document; everything below validates against it.
    let existing = state
        .persistence
        .get_presentation(&presentation_id)
        .await?
        .ok_or_else(|| CoreError::PresentationNotFound {
            presentation_id: presentation_id.clone(),
        })?;

    // 3. Resolve the acting user against the presentation's organization.
    resolve_privileged_user(
        state.persistence.as_ref(),
        &username,
        &existing.organization_name,
        &existing.organization_id,
    )
    .await?;

    // 4. Validate only the fields present in the patch.
    let now = Utc::now();
    let mut patch = PresentationPatch::empty(now);

    if updates.title.is_some() {
        patch.title = Some(validate::required_string("title", updates.title.as_deref())?);
    }
    if updates.description.is_some() {
        patch.description = Some(validate::required_string(
            "description",
            updates.description.as_deref(),
        )?);
    }
    if let Some(duration_minutes) = updates.duration {
        validate::validate_duration(duration_minutes)?;
        patch.duration_minutes = Some(duration_minutes);
    }
    if updates.location.is_some() {
        patch.location = Some(validate::required_string(
            "location",
            updates.location.as_deref(),
        )?);
    }
    if let Some(meeting_link) = updates.meeting_link {
        let meeting_link = meeting_link.trim().to_string();
        validate::validate_meeting_link(&meeting_link)?;
        patch.meeting_link = Some(meeting_link);
    }
    if let Some(criteria) = updates.evaluation_criteria {
        patch.evaluation_criteria = Some(validate::validate_criteria(&criteria)?);
    }
    if let Some(scheduled_raw) = updates.scheduled_date {
        let scheduled_date = validate::parse_scheduled_date("scheduledDate", &scheduled_raw)?;
        validate::validate_future_date(scheduled_date, now)?;
        patch.scheduled_date = Some(scheduled_date);
    }
    if let Some(requirements) = updates.requirements {
        patch.requirements = Some(requirements);
    }
    if let Some(tags) = updates.tags {
        patch.tags = Some(tags);
    }

    // 5. A requested status change must follow the permitted edges.
    if let Some(raw_status) = updates.status {
        let requested =
            PresentationStatus::parse(&raw_status).ok_or_else(|| CoreError::ValidationError {
                field: "status".to_string(),
                message: format!("'{}' is not a valid status", raw_status),
            })?;
        let current = PresentationStatus::parse(&existing.status).ok_or_else(|| {
            CoreError::DatabaseError {
                operation: "status".to_string(),
                details: format!(
                    "presentation '{}' has unknown stored status '{}'",
                    presentation_id, existing.status
                ),
            }
        })?;
        model::check_transition(current, requested)?;
        patch.status = Some(requested);
    }

    // 6. Reconcile a requested roster against the existing assignments.
    if let Some(requested_interns) = updates.assigned_interns {
        let reconciled = roster::reconcile_roster(
            state.persistence.as_ref(),
            &existing.organization_name,
            &existing.organization_id,
            &requested_interns,
            &existing.assigned_interns.0,
            now,
        )
        .await?;
        patch.assigned_interns = Some(reconciled);
    }

    // 7. Apply the sparse patch. Zero rows means the document vanished
    //    between the read above and this write.
    let updated = state
        .persistence
        .update_presentation(&presentation_id, &patch)
        .await?;
    if !updated {
        return Err(CoreError::PresentationNotFound { presentation_id });
    }

    // 8. Re-read and return the reduced projection.
    let record = state
        .persistence
        .get_presentation(&presentation_id)
        .await?
        .ok_or_else(|| CoreError::PresentationNotFound {
            presentation_id: presentation_id.clone(),
        })?;

    info!(status = %record.status, "Demo presentation updated");

    Ok(UpdatePresentationResponse {
        success: true,
        message: "Demo presentation updated successfully".to_string(),
        demo_presentation: PresentationSummary::from_record(&record),
    })
}

// ============================================================================
// Read Presentations
// ============================================================================

/// Handle a get-presentation request, returning the full document.
#[instrument(skip(state))]
pub async fn handle_get_presentation(
    state: &PresentationHandlerState,
    presentation_id: &str,
) -> Result<GetPresentationResponse, CoreError> {
    let record = state
        .persistence
        .get_presentation(presentation_id)
        .await?
        .ok_or_else(|| CoreError::PresentationNotFound {
            presentation_id: presentation_id.to_string(),
        })?;

    Ok(GetPresentationResponse {
        success: true,
        demo_presentation: DemoPresentation::from_record(&record),
    })
}

/// Handle a list-presentations request.
///
/// Returns a paginated page of reduced projections, newest scheduled
/// date first, optionally filtered by organization, team, and status.
#[instrument(skip(state, request))]
pub async fn handle_list_presentations(
    state: &PresentationHandlerState,
    request: ListPresentationsRequest,
) -> Result<ListPresentationsResponse, CoreError> {
    let status_filter = match request.status.as_deref() {
        Some(raw_status) => Some(
            PresentationStatus::parse(raw_status)
                .ok_or_else(|| CoreError::ValidationError {
                    field: "status".to_string(),
                    message: format!("'{}' is not a valid status", raw_status),
                })?
                .as_str(),
        ),
        None => None,
    };

    let (limit, offset) = state.page(request.limit, request.offset);

    debug!(
        organization_id = ?request.organization_id,
        team_name = ?request.team_name,
        status = ?status_filter,
        limit,
        offset,
        "Listing presentations"
    );

    let records = state
        .persistence
        .list_presentations(
            request.organization_id.as_deref(),
            request.team_name.as_deref(),
            status_filter,
            limit,
            offset,
        )
        .await?;
    let total_count = state
        .persistence
        .count_presentations(
            request.organization_id.as_deref(),
            request.team_name.as_deref(),
            status_filter,
        )
        .await?;

    Ok(ListPresentationsResponse {
        success: true,
        total_count,
        demo_presentations: records.iter().map(PresentationSummary::from_record).collect(),
    })
}

// ============================================================================
// Teams
// ============================================================================

/// Handle a create-team request.
///
/// The creator must resolve to a privileged member of the organization;
/// team names are unique per organization.
#[instrument(skip(state, request))]
pub async fn handle_create_team(
    state: &PresentationHandlerState,
    request: CreateTeamRequest,
) -> Result<CreateTeamResponse, CoreError> {
    // 1. Required fields.
    let team_name = validate::required_string("teamName", request.team_name.as_deref())?;
    let organization_name =
        validate::required_string("organizationName", request.organization_name.as_deref())?;
    let organization_id =
        validate::required_string("organizationId", request.organization_id.as_deref())?;
    let created_by = validate::required_string("createdBy", request.created_by.as_deref())?;

    // 2. Resolve the creator.
    let creator = resolve_privileged_user(
        state.persistence.as_ref(),
        &created_by,
        &organization_name,
        &organization_id,
    )
    .await?;

    // 3. Team names are unique per organization.
    let duplicate = state
        .persistence
        .find_team(&team_name, &organization_name, &organization_id)
        .await?;
    if duplicate.is_some() {
        return Err(CoreError::TeamAlreadyExists { team_name });
    }

    // 4. Insert.
    let record = TeamRecord {
        team_name,
        organization_name,
        organization_id,
        created_by: creator.username,
        created_at: Utc::now(),
    };
    state.persistence.insert_team(&record).await?;

    info!(team = %record.team_name, "Team created");

    Ok(CreateTeamResponse {
        success: true,
        message: "Team created successfully".to_string(),
        team: TeamSummary::from_record(&record),
    })
}

/// Handle a list-teams request.
#[instrument(skip(state, request))]
pub async fn handle_list_teams(
    state: &PresentationHandlerState,
    request: ListTeamsRequest,
) -> Result<ListTeamsResponse, CoreError> {
    let (limit, offset) = state.page(request.limit, request.offset);

    let records = state
        .persistence
        .list_teams(request.organization_id.as_deref(), limit, offset)
        .await?;
    let total_count = state
        .persistence
        .count_teams(request.organization_id.as_deref())
        .await?;

    Ok(ListTeamsResponse {
        success: true,
        total_count,
        teams: records.iter().map(TeamSummary::from_record).collect(),
    })
}

// ============================================================================
// Members
// ============================================================================

/// Handle a register-member request.
///
/// Adds an entry to the directory the entity resolvers read. Usernames
/// are unique across the deployment.
#[instrument(skip(state, request))]
pub async fn handle_register_member(
    state: &PresentationHandlerState,
    request: RegisterMemberRequest,
) -> Result<RegisterMemberResponse, CoreError> {
    // 1. Required fields.
    let username = validate::required_string("username", request.username.as_deref())?;
    let full_name = validate::required_string("fullName", request.full_name.as_deref())?;
    let role = validate::required_string("role", request.role.as_deref())?;
    let organization_name =
        validate::required_string("organizationName", request.organization_name.as_deref())?;
    let organization_id =
        validate::required_string("organizationId", request.organization_id.as_deref())?;

    // 2. Role must be one of the known roles.
    if !model::MEMBER_ROLES.contains(&role.as_str()) {
        return Err(CoreError::ValidationError {
            field: "role".to_string(),
            message: format!("role must be one of: {}", model::MEMBER_ROLES.join(", ")),
        });
    }

    // 3. Usernames are unique.
    if state.persistence.get_user(&username).await?.is_some() {
        return Err(CoreError::UserAlreadyExists { username });
    }

    // 4. Insert.
    let record = UserRecord {
        username,
        full_name,
        role,
        organization_name,
        organization_id,
        created_at: Utc::now(),
    };
    state.persistence.insert_user(&record).await?;

    info!(username = %record.username, role = %record.role, "Member registered");

    Ok(RegisterMemberResponse {
        success: true,
        message: "Member registered successfully".to_string(),
        member: MemberSummary::from_record(&record),
    })
}

// ============================================================================
// Health Check
// ============================================================================

/// Handle a health check request.
///
/// Returns server health status including database connectivity, server
/// version, uptime, and the count of active presentations.
#[instrument(skip(state))]
pub async fn handle_health_check(
    state: &PresentationHandlerState,
) -> Result<HealthCheckResponse, CoreError> {
    debug!("Health check requested");

    let db_healthy = state.persistence.health_check_db().await.unwrap_or(false);

    let active_presentations = if db_healthy {
        state
            .persistence
            .count_active_presentations()
            .await
            .unwrap_or(0)
    } else {
        0
    };

    Ok(HealthCheckResponse {
        healthy: db_healthy,
        version: state.version.clone(),
        uptime_ms: state.uptime_ms(),
        active_presentations,
    })
}
