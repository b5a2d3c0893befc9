//! API routes module
//!
//! All resource routes live under the versioned `/v2` prefix; the outer
//! `/api` segment is added by `axum_helpers::create_router`.

pub mod health;
pub mod pokemon;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/v2/pokemon", pokemon::router(state))
        .merge(health::router(state.clone()))
}
