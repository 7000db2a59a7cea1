//! Orchestrator serve route.
//!
//! GET describes the registered functions, PUT pushes that description to
//! the orchestrator, POST (function invocation) is refused because function
//! bodies run in the orchestrator's worker.

use axum::extract::{Query, State};
use axum::Json;
use nodeflow_events::serve::Introspection;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InvokeParams {
    #[serde(rename = "fnId")]
    pub fn_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub url: String,
}

/// GET -- describe this app's functions.
pub async fn introspect(State(state): State<AppState>) -> Json<Introspection> {
    Json(state.serve.introspect())
}

/// PUT -- register this app's functions with the orchestrator.
pub async fn register(State(state): State<AppState>) -> AppResult<Json<RegisterResponse>> {
    let url = state.config.serve_url();
    state.serve.register(&url).await?;
    Ok(Json(RegisterResponse {
        message: "Successfully registered",
        url,
    }))
}

/// POST -- function invocation. Not hosted by this process.
pub async fn invoke(Query(params): Query<InvokeParams>) -> AppError {
    let fn_id = params.fn_id.unwrap_or_else(|| "unknown".to_string());
    tracing::warn!(fn_id = %fn_id, "Orchestrator attempted to invoke a function on the API server");
    AppError::FunctionNotServed(fn_id)
}
