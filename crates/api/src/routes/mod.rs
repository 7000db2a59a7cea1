pub mod health;
pub mod inngest;
pub mod trpc;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /trpc/getWorkflows      GET    list workflows        (requires session)
/// /trpc/createWorkflow    POST   enqueue the hello job (requires session)
///
/// /inngest                GET    function introspection
///                         PUT    register functions with the orchestrator
///                         POST   function invocation (refused, 501)
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/trpc", trpc::router(state))
        .merge(inngest::router())
}
