use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// Keyed uniquely by (account_id, course_id, material_id). Rows are created
/// lazily on the first completion signal and updated in place afterwards;
/// a material with no row is simply "not started".
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub course_id: Uuid,
    pub material_id: Uuid,
    pub completed: bool,
    pub completed_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Upsert payload for a completion signal. Re-submitting the same tuple is
/// idempotent: the unique key guarantees a single row.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub account_id: Uuid,
    pub course_id: Uuid,
    pub material_id: Uuid,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompleteMaterial {
    pub completed: bool,
}
