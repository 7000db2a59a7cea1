//! The read seam the API layer depends on.
//!
//! Handlers talk to a [`WorkflowStore`] rather than a pool directly so the
//! store can be swapped for an in-memory double in tests.

use async_trait::async_trait;

use crate::models::workflow::Workflow;
use crate::repositories::WorkflowRepo;
use crate::DbPool;

#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// All workflows, in store-native order.
    async fn list_workflows(&self) -> Result<Vec<Workflow>, sqlx::Error>;

    /// Cheap reachability probe used by `/health`.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`WorkflowStore`] backed by the Postgres pool.
#[derive(Clone)]
pub struct PgWorkflowStore {
    pool: DbPool,
}

impl PgWorkflowStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowStore for PgWorkflowStore {
    async fn list_workflows(&self) -> Result<Vec<Workflow>, sqlx::Error> {
        WorkflowRepo::list_all(&self.pool).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
