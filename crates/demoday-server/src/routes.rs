// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Route functions for the demoday HTTP API.
//!
//! Thin adapters: extract the JSON body or query parameters, delegate to
//! the core handlers, and map the result to a status code and JSON body.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use demoday_core::handlers;
use demoday_core::protocol::{
    CreatePresentationRequest, CreatePresentationResponse, CreateTeamRequest, CreateTeamResponse,
    GetPresentationResponse, HealthCheckResponse, ListPresentationsRequest,
    ListPresentationsResponse, ListTeamsRequest, ListTeamsResponse, RegisterMemberRequest,
    RegisterMemberResponse, UpdatePresentationRequest, UpdatePresentationResponse,
};

use crate::AppState;
use crate::error::ApiError;

/// `GET /api/health`
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<HealthCheckResponse>, ApiError> {
    let response = handlers::handle_health_check(&state.handlers).await?;
    Ok(Json(response))
}

/// `POST /api/demo-presentations`
pub async fn create_presentation(
    State(state): State<AppState>,
    Json(request): Json<CreatePresentationRequest>,
) -> Result<(StatusCode, Json<CreatePresentationResponse>), ApiError> {
    let response = handlers::handle_create_presentation(&state.handlers, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `PUT /api/demo-presentations`
pub async fn update_presentation(
    State(state): State<AppState>,
    Json(request): Json<UpdatePresentationRequest>,
) -> Result<Json<UpdatePresentationResponse>, ApiError> {
    let response = handlers::handle_update_presentation(&state.handlers, request).await?;
    Ok(Json(response))
}

/// `GET /api/demo-presentations/{id}`
pub async fn get_presentation(
    State(state): State<AppState>,
    Path(presentation_id): Path<String>,
) -> Result<Json<GetPresentationResponse>, ApiError> {
    let response = handlers::handle_get_presentation(&state.handlers, &presentation_id).await?;
    Ok(Json(response))
}

/// `GET /api/demo-presentations`
pub async fn list_presentations(
    State(state): State<AppState>,
    Query(request): Query<ListPresentationsRequest>,
) -> Result<Json<ListPresentationsResponse>, ApiError> {
    let response = handlers::handle_list_presentations(&state.handlers, request).await?;
    Ok(Json(response))
}

/// `POST /api/teams`
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<CreateTeamResponse>), ApiError> {
    let response = handlers::handle_create_team(&state.handlers, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/teams`
pub async fn list_teams(
    State(state): State<AppState>,
    Query(request): Query<ListTeamsRequest>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let response = handlers::handle_list_teams(&state.handlers, request).await?;
    Ok(Json(response))
}

/// `POST /api/members`
pub async fn register_member(
    State(state): State<AppState>,
    Json(request): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<RegisterMemberResponse>), ApiError> {
    let response = handlers::handle_register_member(&state.handlers, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
