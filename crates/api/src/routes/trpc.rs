//! Typed RPC procedures.
//!
//! Queries are mounted as GET, mutations as POST. Every procedure here is
//! protected: the session guard is applied with `route_layer`, so it runs
//! only for matched procedures and before their handlers.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workflows;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/getWorkflows", get(workflows::get_workflows))
        .route("/createWorkflow", post(workflows::create_workflow))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
