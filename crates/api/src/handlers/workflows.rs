//! Handlers for the workflow procedures.
//!
//! Both run behind [`require_auth`](crate::middleware::auth::require_auth),
//! so an [`AuthUser`] is always present in the request context.

use axum::extract::State;
use axum::{Extension, Json};
use nodeflow_core::job_events::{HELLO_EVENT_EMAIL, HELLO_EVENT_NAME, JOB_QUEUED_MESSAGE};
use nodeflow_db::models::workflow::Workflow;
use nodeflow_events::JobEvent;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Acknowledgement returned by `createWorkflow`.
#[derive(Debug, Serialize)]
pub struct JobQueued {
    pub success: bool,
    pub message: String,
}

/// `getWorkflows` -- every workflow, in the order the store returns them.
pub async fn get_workflows(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<DataResponse<Vec<Workflow>>>> {
    let workflows = state.workflows.list_workflows().await?;
    tracing::debug!(user_id = %user.user_id, count = workflows.len(), "Listed workflows");
    Ok(Json(DataResponse { data: workflows }))
}

/// `createWorkflow` -- enqueue the hello job.
///
/// Despite the name, nothing is created: the procedure takes no input,
/// publishes one fixed event and returns once the orchestrator accepts it.
pub async fn create_workflow(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<DataResponse<JobQueued>>> {
    let event = JobEvent::new(HELLO_EVENT_NAME)
        .with_data(serde_json::json!({ "email": HELLO_EVENT_EMAIL }));

    let ack = state.events.send(event).await?;
    tracing::info!(
        user_id = %user.user_id,
        event = HELLO_EVENT_NAME,
        ids = ?ack.ids,
        "Job queued"
    );

    Ok(Json(DataResponse {
        data: JobQueued {
            success: true,
            message: JOB_QUEUED_MESSAGE.to_string(),
        },
    }))
}
