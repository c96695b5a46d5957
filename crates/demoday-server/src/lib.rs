// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Demoday Server - HTTP API boundary
//!
//! Hosts the demo presentation, team, member, and health endpoints over
//! axum. All domain logic lives in demoday-core; this crate only wires
//! routes, extracts requests, and maps errors to HTTP statuses.
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | POST | `/api/demo-presentations` | Create a presentation |
//! | PUT | `/api/demo-presentations` | Update a presentation |
//! | GET | `/api/demo-presentations` | List presentations |
//! | GET | `/api/demo-presentations/{id}` | Get one presentation |
//! | POST | `/api/teams` | Create a team |
//! | GET | `/api/teams` | List teams |
//! | POST | `/api/members` | Register a directory member |
//! | GET | `/api/health` | Health check |

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use demoday_core::handlers::PresentationHandlerState;

pub mod error;
pub mod routes;

/// Shared application state handed to every route.
#[derive(Clone)]
pub struct AppState {
    /// Core handler state (persistence backend plus server metadata).
    pub handlers: Arc<PresentationHandlerState>,
}

/// Build the full API router with tracing and CORS layers applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route(
            "/api/demo-presentations",
            post(routes::create_presentation)
                .put(routes::update_presentation)
                .get(routes::list_presentations),
        )
        .route("/api/demo-presentations/{id}", get(routes::get_presentation))
        .route("/api/teams", post(routes::create_team).get(routes::list_teams))
        .route("/api/members", post(routes::register_member))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
