use axum::routing::get;
use axum::Router;

use crate::handlers::serve;
use crate::state::AppState;

/// Orchestrator serve route. Public: the orchestrator calls it directly.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/inngest",
        get(serve::introspect)
            .put(serve::register)
            .post(serve::invoke),
    )
}
