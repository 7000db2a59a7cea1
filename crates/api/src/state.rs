use std::sync::Arc;

use nodeflow_db::WorkflowStore;
use nodeflow_events::{EventSender, ServeHandler};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything sits behind an `Arc`. The store and sender
/// wrap the process-wide database pool and orchestrator client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Read access to workflows.
    pub workflows: Arc<dyn WorkflowStore>,
    /// Publishes job events to the orchestrator.
    pub events: Arc<dyn EventSender>,
    /// Answers the orchestrator's serve-route calls.
    pub serve: Arc<ServeHandler>,
}
