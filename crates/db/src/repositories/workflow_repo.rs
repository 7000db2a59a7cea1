//! Repository for the `workflows` table.

use sqlx::PgPool;

use crate::models::workflow::Workflow;

/// Column list for workflows queries.
const COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// Read access to workflows.
pub struct WorkflowRepo;

impl WorkflowRepo {
    /// List every workflow in the order the store returns them.
    ///
    /// No `ORDER BY` is applied; callers get store-native order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflows");
        sqlx::query_as::<_, Workflow>(&query).fetch_all(pool).await
    }
}
