//! Workflow model.

use serde::Serialize;
use sqlx::FromRow;
use nodeflow_core::types::{DbId, Timestamp};

/// A workflow row from the `workflows` table.
///
/// Workflows are created and edited outside this service; the API only
/// lists them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Workflow {
    pub id: DbId,
    pub name: String,
    /// Opaque user id issued by the auth provider.
    pub user_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
